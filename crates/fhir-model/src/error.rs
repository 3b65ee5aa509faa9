use thiserror::Error;

/// A literal rejected by a type's own decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{literal}' is not a valid {type_name}: {reason}")]
pub struct DecodeError {
    pub type_name: &'static str,
    pub literal: String,
    pub reason: String,
}

impl DecodeError {
    pub fn new(type_name: &'static str, literal: &str, reason: impl Into<String>) -> Self {
        Self {
            type_name,
            literal: literal.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
