//! Required top-level fields per resource type.

use std::collections::HashMap;

use fhir_model::{Resource, ValidationIssue, Validator};

/// Reports required fields that are absent or empty.
#[derive(Debug, Clone)]
pub struct RequiredFieldsValidator {
    required: HashMap<&'static str, &'static [&'static str]>,
}

impl RequiredFieldsValidator {
    pub fn new() -> Self {
        let required: [(&'static str, &'static [&'static str]); 6] = [
            ("Observation", &["status", "code"]),
            ("Condition", &["subject"]),
            ("MedicationRequest", &["status", "intent", "subject"]),
            ("Procedure", &["status", "subject"]),
            ("Encounter", &["status", "class"]),
            ("DiagnosticReport", &["status", "code"]),
        ];
        Self {
            required: required.into_iter().collect(),
        }
    }

    /// Required fields for a resource type; empty for unlisted types.
    pub fn required_fields(&self, resource_type: &str) -> &'static [&'static str] {
        self.required.get(resource_type).copied().unwrap_or_default()
    }
}

impl Default for RequiredFieldsValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredFieldsValidator {
    fn validate(&self, resource: &dyn Resource) -> Vec<ValidationIssue> {
        let element = resource.as_element();
        self.required_fields(resource.resource_type())
            .iter()
            .filter(|field| element.field(field).is_none_or(|value| value.is_empty()))
            .map(|field| ValidationIssue::error(*field, "Required field is missing or empty"))
            .collect()
    }
}
