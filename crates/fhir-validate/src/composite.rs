use fhir_model::{Resource, ValidationIssue, Validator};

use crate::checks::{DateTimeValidator, ReferenceValidator, RequiredFieldsValidator};

/// Runs several validators in order and concatenates their issues.
#[derive(Default)]
pub struct CompositeValidator {
    validators: Vec<Box<dyn Validator>>,
}

impl CompositeValidator {
    pub fn new(validators: Vec<Box<dyn Validator>>) -> Self {
        Self { validators }
    }

    /// Required fields, date-times, and references.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(RequiredFieldsValidator::new()),
            Box::new(DateTimeValidator::new()),
            Box::new(ReferenceValidator::new()),
        ])
    }

    pub fn push(&mut self, validator: Box<dyn Validator>) {
        self.validators.push(validator);
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Validator for CompositeValidator {
    fn validate(&self, resource: &dyn Resource) -> Vec<ValidationIssue> {
        self.validators
            .iter()
            .flat_map(|validator| validator.validate(resource))
            .collect()
    }
}
