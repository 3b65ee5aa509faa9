use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Output framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// A single `collection` Bundle written at the end of the run.
    #[default]
    Bundle,
    /// One resource per line, written as records arrive.
    Ndjson,
}

impl OutputFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bundle => "bundle",
            Self::Ndjson => "ndjson",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown output format '{0}' (expected 'bundle' or 'ndjson')")]
pub struct ParseFormatError(String);

impl FromStr for OutputFormat {
    type Err = ParseFormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "bundle" => Ok(Self::Bundle),
            "ndjson" => Ok(Self::Ndjson),
            _ => Err(ParseFormatError(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names() {
        assert_eq!("NDJSON".parse::<OutputFormat>(), Ok(OutputFormat::Ndjson));
        assert_eq!("bundle".parse::<OutputFormat>(), Ok(OutputFormat::Bundle));
        assert_eq!(
            "xml".parse::<OutputFormat>().unwrap_err().to_string(),
            "unknown output format 'xml' (expected 'bundle' or 'ndjson')"
        );
    }
}
