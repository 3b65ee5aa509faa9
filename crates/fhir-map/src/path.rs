//! Field paths such as `code.coding[0].system`.
//!
//! A path is a dot-separated list of segments; each segment names a field
//! and may select an array position with `[<digits>]`. Positions are capped
//! at [`MAX_ARRAY_INDEX`] because the mutator grows arrays up to the
//! requested position.

use std::fmt;
use std::str::FromStr;

use crate::error::PathError;

/// Largest array position a path may address.
pub const MAX_ARRAY_INDEX: usize = 1000;

/// One component of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    pub field: String,
    pub index: Option<usize>,
}

impl PathSegment {
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            field: name.into(),
            index: None,
        }
    }

    pub fn indexed(name: impl Into<String>, index: usize) -> Self {
        Self {
            field: name.into(),
            index: Some(index),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{index}]", self.field),
            None => f.write_str(&self.field),
        }
    }
}

/// A parsed, non-empty path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        if path.starts_with('.') {
            return Err(PathError::LeadingDot {
                path: path.to_string(),
            });
        }
        if path.ends_with('.') {
            return Err(PathError::TrailingDot {
                path: path.to_string(),
            });
        }
        if path.contains("..") {
            return Err(PathError::ConsecutiveDots {
                path: path.to_string(),
            });
        }

        let segments = path
            .split('.')
            .map(parse_segment)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments; never zero.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        Self::parse(path)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            if position > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

fn parse_segment(part: &str) -> Result<PathSegment, PathError> {
    let Some(open) = part.find('[') else {
        if part.contains(']') {
            return Err(PathError::InvalidArrayNotation {
                segment: part.to_string(),
            });
        }
        return Ok(PathSegment::field(part));
    };

    let field = &part[..open];
    if field.is_empty() {
        return Err(PathError::MissingFieldName {
            segment: part.to_string(),
        });
    }

    let Some(digits) = part[open + 1..].strip_suffix(']') else {
        return Err(PathError::InvalidArrayNotation {
            segment: part.to_string(),
        });
    };
    if digits.contains(['[', ']']) {
        return Err(PathError::InvalidArrayNotation {
            segment: part.to_string(),
        });
    }

    Ok(PathSegment::indexed(field, parse_index(part, digits)?))
}

fn parse_index(segment: &str, digits: &str) -> Result<usize, PathError> {
    let all_digits = |text: &str| !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit());

    if digits.strip_prefix('-').is_some_and(all_digits) {
        return Err(PathError::NegativeIndex {
            index: digits.to_string(),
            segment: segment.to_string(),
        });
    }
    if !all_digits(digits) {
        return Err(PathError::InvalidIndex {
            index: digits.to_string(),
            segment: segment.to_string(),
        });
    }

    // Digit strings too long for usize are out of range as well.
    match digits.parse::<usize>() {
        Ok(index) if index <= MAX_ARRAY_INDEX => Ok(index),
        _ => Err(PathError::IndexOutOfRange {
            index: digits.to_string(),
            max: MAX_ARRAY_INDEX,
            segment: segment.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_indexed_path() {
        let path = FieldPath::parse("code.coding[0].system").unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::field("code"),
                PathSegment::indexed("coding", 0),
                PathSegment::field("system"),
            ]
        );
    }

    #[test]
    fn index_bounds() {
        assert_eq!(
            FieldPath::parse("coding[1000]").unwrap().segments()[0].index,
            Some(1000)
        );
        assert!(matches!(
            FieldPath::parse("coding[1001]"),
            Err(PathError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            FieldPath::parse("coding[99999999999999999999999]"),
            Err(PathError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            FieldPath::parse("coding[-1]"),
            Err(PathError::NegativeIndex { .. })
        ));
    }

    #[test]
    fn rejects_malformed_separators() {
        assert_eq!(FieldPath::parse(""), Err(PathError::Empty));
        assert!(matches!(
            FieldPath::parse(".code"),
            Err(PathError::LeadingDot { .. })
        ));
        assert!(matches!(
            FieldPath::parse("code."),
            Err(PathError::TrailingDot { .. })
        ));
        assert!(matches!(
            FieldPath::parse("code..system"),
            Err(PathError::ConsecutiveDots { .. })
        ));
    }

    #[test]
    fn rejects_malformed_brackets() {
        for path in ["coding[0", "coding]", "coding[0]x", "coding[[0]]", "coding[0][1]"] {
            assert!(
                matches!(
                    FieldPath::parse(path),
                    Err(PathError::InvalidArrayNotation { .. })
                ),
                "{path}"
            );
        }
        assert!(matches!(
            FieldPath::parse("coding[]"),
            Err(PathError::InvalidIndex { .. })
        ));
        assert!(matches!(
            FieldPath::parse("coding[one]"),
            Err(PathError::InvalidIndex { .. })
        ));
        assert!(matches!(
            FieldPath::parse("coding[+1]"),
            Err(PathError::InvalidIndex { .. })
        ));
        assert!(matches!(
            FieldPath::parse("[0].code"),
            Err(PathError::MissingFieldName { .. })
        ));
    }

    #[test]
    fn display_matches_source() {
        let source = "dosageInstruction[2].doseAndRate[0].doseQuantity.value";
        assert_eq!(FieldPath::parse(source).unwrap().to_string(), source);
    }
}
