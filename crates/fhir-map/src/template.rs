//! `${column}` placeholder expansion.

use std::sync::LazyLock;

use fhir_model::Row;
use regex::{Captures, Regex};

use crate::error::SubstitutionError;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("Invalid placeholder regex"));

/// Replace every `${name}` with the row's value for `name`.
///
/// Empty values substitute like any other. When a name is not a column of
/// the row, the whole substitution fails and the error lists every missing
/// name once.
pub fn substitute(template: &str, row: &Row) -> Result<String, SubstitutionError> {
    let mut missing: Vec<String> = Vec::new();
    let expanded = PLACEHOLDER.replace_all(template, |captures: &Captures<'_>| {
        let name = &captures[1];
        match row.get(name) {
            Some(value) => value.to_string(),
            None => {
                if !missing.iter().any(|seen| seen == name) {
                    missing.push(name.to_string());
                }
                String::new()
            }
        }
    });

    if missing.is_empty() {
        Ok(expanded.into_owned())
    } else {
        Err(SubstitutionError { missing })
    }
}

/// Placeholder names in order of appearance, repeats included.
pub fn placeholders(template: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str())
}

/// True when the template contains `${`, even if it is not a well-formed
/// placeholder.
pub fn has_placeholder_syntax(template: &str) -> bool {
    template.contains("${")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        Row::from_pairs(1, pairs.iter().copied())
    }

    #[test]
    fn empty_values_substitute() {
        let row = row(&[("name", "John"), ("empty", "")]);
        assert_eq!(substitute("${name}-${empty}", &row).unwrap(), "John-");
    }

    #[test]
    fn reports_every_missing_name_once() {
        let row = row(&[("name", "John")]);
        let err = substitute("${name} ${missing} ${other} ${missing}", &row).unwrap_err();
        assert_eq!(err.missing, vec!["missing", "other"]);
    }

    #[test]
    fn text_without_placeholders_is_untouched() {
        let row = row(&[]);
        assert_eq!(
            substitute("http://loinc.org", &row).unwrap(),
            "http://loinc.org"
        );
        assert_eq!(substitute("$ {x} ${}", &row).unwrap(), "$ {x} ${}");
    }

    #[test]
    fn lists_placeholders() {
        let names: Vec<_> = placeholders("Patient/${patient_id} at ${time}").collect();
        assert_eq!(names, vec!["patient_id", "time"]);
        assert!(has_placeholder_syntax("${unterminated"));
        assert!(!has_placeholder_syntax("plain"));
    }
}
