use fhir_model::ValidationIssue;

/// Render issues as one line per issue.
///
/// `Row 3: Validation error in field 'status': Required field is missing or empty`
pub fn format_issues(issues: &[ValidationIssue], row: u64) -> String {
    issues
        .iter()
        .map(|issue| {
            format!(
                "Row {row}: Validation {} in field '{}': {}",
                issue.severity, issue.field, issue.message
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
