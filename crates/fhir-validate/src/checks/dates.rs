//! ISO 8601 date and date-time checks.
//!
//! Accepted forms: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, and full date-times
//! `YYYY-MM-DDThh:mm:ss[.fffffffff](Z|±hh:mm)`. Values must also be real
//! calendar dates.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use fhir_model::{Resource, ValidationIssue, Validator};
use regex::Regex;

use crate::util::resolve_values;

static YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("Invalid year regex"));

static YEAR_MONTH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("Invalid year-month regex"));

static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid date regex"));

static DATE_TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{1,9})?(Z|[+-]\d{2}:\d{2})$")
        .expect("Invalid date-time regex")
});

/// Whether `value` is an accepted ISO 8601 date or date-time.
pub fn is_valid_date_time(value: &str) -> bool {
    if YEAR_REGEX.is_match(value) {
        return true;
    }
    if YEAR_MONTH_REGEX.is_match(value) {
        return NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").is_ok();
    }
    if DATE_REGEX.is_match(value) {
        return NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();
    }
    DATE_TIME_REGEX.is_match(value) && DateTime::parse_from_rfc3339(value).is_ok()
}

/// Reports date and date-time fields whose value is not ISO 8601.
///
/// Empty fields are left to [`super::RequiredFieldsValidator`].
#[derive(Debug, Clone)]
pub struct DateTimeValidator {
    fields: HashMap<&'static str, &'static [&'static str]>,
}

impl DateTimeValidator {
    pub fn new() -> Self {
        let fields: [(&'static str, &'static [&'static str]); 12] = [
            (
                "Observation",
                &[
                    "effectiveDateTime",
                    "effectivePeriod.start",
                    "effectivePeriod.end",
                    "issued",
                    "valueDateTime",
                ],
            ),
            ("Patient", &["birthDate", "deceasedDateTime"]),
            (
                "Condition",
                &["onsetDateTime", "abatementDateTime", "recordedDate"],
            ),
            ("MedicationRequest", &["authoredOn"]),
            (
                "Procedure",
                &[
                    "performedDateTime",
                    "performedPeriod.start",
                    "performedPeriod.end",
                ],
            ),
            ("Encounter", &["period.start", "period.end"]),
            (
                "DiagnosticReport",
                &["effectiveDateTime", "effectivePeriod.start", "effectivePeriod.end", "issued"],
            ),
            ("Specimen", &["receivedTime", "collection.collectedDateTime"]),
            ("Practitioner", &["birthDate"]),
            (
                "Immunization",
                &["occurrenceDateTime", "recorded", "expirationDate"],
            ),
            (
                "AllergyIntolerance",
                &["onsetDateTime", "recordedDate", "lastOccurrence"],
            ),
            (
                "ServiceRequest",
                &[
                    "occurrenceDateTime",
                    "occurrencePeriod.start",
                    "occurrencePeriod.end",
                    "authoredOn",
                ],
            ),
        ];
        Self {
            fields: fields.into_iter().collect(),
        }
    }
}

impl Default for DateTimeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for DateTimeValidator {
    fn validate(&self, resource: &dyn Resource) -> Vec<ValidationIssue> {
        let Some(paths) = self.fields.get(resource.resource_type()) else {
            return Vec::new();
        };

        let mut issues = Vec::new();
        for path in *paths {
            for (location, value) in resolve_values(resource.as_element(), path) {
                let Some(text) = value.as_text().filter(|text| !text.is_empty()) else {
                    continue;
                };
                if !is_valid_date_time(text) {
                    issues.push(ValidationIssue::error(
                        location,
                        "Invalid ISO 8601 datetime format",
                    ));
                }
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_partial_and_full_forms() {
        for value in [
            "2024",
            "2024-02",
            "2024-02-29",
            "2024-01-15T10:30:00Z",
            "2024-01-15T10:30:00+05:30",
            "2024-01-15T10:30:00.123Z",
            "2024-01-15T10:30:00.123456789-08:00",
        ] {
            assert!(is_valid_date_time(value), "{value}");
        }
    }

    #[test]
    fn rejects_malformed_and_impossible_values() {
        for value in [
            "24",
            "2024-13",
            "2023-02-29",
            "2024-01-15T10:30:00",
            "2024-01-15 10:30:00Z",
            "2024-01-15T25:00:00Z",
            "15/01/2024",
        ] {
            assert!(!is_valid_date_time(value), "{value}");
        }
    }
}
