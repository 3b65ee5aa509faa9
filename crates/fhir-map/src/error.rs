//! Error types for path parsing, substitution, mutation, and building.

use std::fmt;
use std::path::PathBuf;

use fhir_model::{DecodeError, FieldKind, ValueKind};
use thiserror::Error;

/// Malformed path syntax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path cannot be empty")]
    Empty,

    #[error("path cannot start with a dot: {path}")]
    LeadingDot { path: String },

    #[error("path cannot end with a dot: {path}")]
    TrailingDot { path: String },

    #[error("path cannot contain consecutive dots: {path}")]
    ConsecutiveDots { path: String },

    #[error("missing field name before '[' in path segment: {segment}")]
    MissingFieldName { segment: String },

    /// Unclosed bracket, stray `]`, or text after the closing bracket.
    #[error("invalid array notation in path segment: {segment}")]
    InvalidArrayNotation { segment: String },

    #[error("invalid array index '{index}' in path segment: {segment}")]
    InvalidIndex { index: String, segment: String },

    #[error("negative array index {index} not allowed in path segment: {segment}")]
    NegativeIndex { index: String, segment: String },

    #[error("array index {index} exceeds maximum of {max} in path segment: {segment}")]
    IndexOutOfRange {
        index: String,
        max: usize,
        segment: String,
    },
}

/// Placeholders that name no column of the row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing columns in row data: {}", .missing.join(", "))]
pub struct SubstitutionError {
    /// Every unresolved name, in order of first appearance.
    pub missing: Vec<String>,
}

/// Failure to write a literal into an object graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    #[error("empty path")]
    EmptyPath,

    #[error("field '{field}' not found in {owner}")]
    UnknownField { field: String, owner: &'static str },

    #[error("field '{field}' of {owner} is not an array ({kind})")]
    NotAnArray {
        field: String,
        owner: &'static str,
        kind: FieldKind,
    },

    #[error("field '{field}' of {owner} is an array; address an element with [index]")]
    MissingIndex { field: String, owner: &'static str },

    #[error("cannot descend into field '{field}' of {owner} ({kind})")]
    NotNavigable {
        field: String,
        owner: &'static str,
        kind: FieldKind,
    },

    #[error("cannot convert '{literal}' to {kind}: {reason}")]
    Coercion {
        literal: String,
        kind: ValueKind,
        reason: String,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("cannot set object {object_type} from a string: the type has no literal decoder")]
    NoLiteralDecoder { object_type: &'static str },

    #[error("unsupported field kind {kind} for field '{field}'")]
    UnsupportedKind { field: String, kind: FieldKind },
}

/// Invalid mapping configuration. Always fatal for the run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read mapping file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse mapping YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("resource type is required in mapping file")]
    MissingResourceType,

    #[error("invalid {section} path '{path}': {source}")]
    InvalidPath {
        section: &'static str,
        path: String,
        #[source]
        source: PathError,
    },

    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error("missing CSV columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },
}

/// Where in a mapping a row-level failure happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Default(String),
    Mapping(String),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default(path) => write!(f, "default '{path}'"),
            Self::Mapping(path) => write!(f, "mapping '{path}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildErrorKind {
    #[error(transparent)]
    Substitution(#[from] SubstitutionError),

    #[error(transparent)]
    Mutation(#[from] MutationError),

    /// A default names a column the row does not have.
    #[error("unresolved placeholder in default: {0}")]
    UnresolvedDefault(#[source] SubstitutionError),
}

/// A row that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("row {row}: {target}: {kind}")]
pub struct BuildError {
    pub row: u64,
    pub target: Target,
    #[source]
    pub kind: BuildErrorKind,
}

impl BuildError {
    pub fn new(row: u64, target: Target, kind: impl Into<BuildErrorKind>) -> Self {
        Self {
            row,
            target,
            kind: kind.into(),
        }
    }

    /// True for failures caused by the mapping itself rather than the data.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, BuildErrorKind::UnresolvedDefault(_))
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BuildError::new(
            7,
            Target::Mapping("valueQuantity.value".to_string()),
            MutationError::Coercion {
                literal: "abc".to_string(),
                kind: ValueKind::Real,
                reason: "invalid float literal".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "row 7: mapping 'valueQuantity.value': cannot convert 'abc' to real: invalid float literal"
        );
    }

    #[test]
    fn test_missing_names_are_listed() {
        let err = SubstitutionError {
            missing: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(err.to_string(), "missing columns in row data: first, second");
    }
}
