//! Validation of built FHIR resources.
//!
//! Every check implements [`fhir_model::Validator`]; [`CompositeValidator`]
//! chains them and [`format_issues`] renders the findings for a row.

pub mod checks;
pub mod composite;
pub mod report;
pub mod util;

pub use checks::{DateTimeValidator, ReferenceValidator, RequiredFieldsValidator};
pub use composite::CompositeValidator;
pub use report::format_issues;
