//! Reference format checks.

use std::collections::HashMap;
use std::sync::LazyLock;

use fhir_model::{Element, FieldValue, Resource, ValidationIssue, Validator};
use regex::Regex;

use crate::util::resolve_values;

static RELATIVE_REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-zA-Z]+/[^/\s]+$").expect("Invalid relative reference regex")
});

/// Whether `reference` is `Type/id`, `#id`, an `http(s)://` URL, or a
/// `urn:` identifier.
pub fn is_valid_reference(reference: &str) -> bool {
    if let Some(local) = reference.strip_prefix('#') {
        return !local.is_empty();
    }
    if ["http://", "https://", "urn:"]
        .iter()
        .any(|scheme| reference.starts_with(scheme))
    {
        return true;
    }
    RELATIVE_REFERENCE_REGEX.is_match(reference)
}

/// Reports `Reference.reference` values with an unrecognised format.
///
/// Arrays of references are checked item by item and reported with their
/// position, e.g. `performer[1].reference`.
#[derive(Debug, Clone)]
pub struct ReferenceValidator {
    fields: HashMap<&'static str, &'static [&'static str]>,
}

impl ReferenceValidator {
    pub fn new() -> Self {
        let fields: [(&'static str, &'static [&'static str]); 13] = [
            (
                "Observation",
                &["subject", "encounter", "performer", "specimen", "hasMember"],
            ),
            (
                "Patient",
                &["generalPractitioner", "managingOrganization"],
            ),
            (
                "Condition",
                &["subject", "encounter", "recorder", "asserter"],
            ),
            (
                "MedicationRequest",
                &["subject", "encounter", "requester", "medicationReference"],
            ),
            (
                "Procedure",
                &["subject", "encounter", "recorder", "performer.actor", "location"],
            ),
            (
                "Encounter",
                &["subject", "participant.individual", "serviceProvider"],
            ),
            (
                "DiagnosticReport",
                &["subject", "encounter", "basedOn", "performer", "specimen", "result"],
            ),
            (
                "Specimen",
                &["subject", "collection.collector", "parent", "request"],
            ),
            ("Organization", &["partOf"]),
            ("Location", &["managingOrganization", "partOf"]),
            (
                "Immunization",
                &["patient", "encounter", "location", "manufacturer", "performer.actor"],
            ),
            (
                "AllergyIntolerance",
                &["patient", "encounter", "recorder", "asserter"],
            ),
            (
                "ServiceRequest",
                &["basedOn", "subject", "encounter", "requester", "performer", "specimen"],
            ),
        ];
        Self {
            fields: fields.into_iter().collect(),
        }
    }
}

impl Default for ReferenceValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for ReferenceValidator {
    fn validate(&self, resource: &dyn Resource) -> Vec<ValidationIssue> {
        let Some(paths) = self.fields.get(resource.resource_type()) else {
            return Vec::new();
        };

        let mut issues = Vec::new();
        for path in *paths {
            for (location, value) in resolve_values(resource.as_element(), path) {
                let Some(reference) = reference_text(&value) else {
                    continue;
                };
                if !is_valid_reference(reference) {
                    issues.push(ValidationIssue::error(
                        format!("{location}.reference"),
                        "Invalid reference format (expected 'ResourceType/id', '#id', or full URL)",
                    ));
                }
            }
        }
        issues
    }
}

fn reference_text<'a>(value: &FieldValue<'a>) -> Option<&'a str> {
    let element: &'a dyn Element = value.as_element()?;
    element
        .field("reference")
        .and_then(|reference| reference.as_text())
        .filter(|text| !text.is_empty())
}
