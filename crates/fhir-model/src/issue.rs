use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// A validation finding on a built resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted field path, with array positions where relevant
    /// (e.g. `subject.reference`, `performer[1].reference`).
    pub field: String,
    pub message: String,
    pub severity: IssueSeverity,
}

impl ValidationIssue {
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: IssueSeverity::Error,
        }
    }

    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: IssueSeverity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }
}

/// Inspects a built resource and reports issues.
///
/// Validators never mutate the resource and never fail; an empty vector
/// means the resource passed.
pub trait Validator: Send + Sync {
    fn validate(&self, resource: &dyn Resource) -> Vec<ValidationIssue>;
}

/// Count of issues at error severity.
pub fn error_count(issues: &[ValidationIssue]) -> usize {
    issues.iter().filter(|issue| issue.is_error()).count()
}
