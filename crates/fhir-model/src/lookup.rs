/// Name equality used wherever a user-supplied name meets a declared one.
///
/// Field names, type names, and column names all go through this single
/// rule: ASCII case-insensitive comparison.
pub fn names_match(declared: &str, requested: &str) -> bool {
    declared.eq_ignore_ascii_case(requested)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_case_is_ignored() {
        assert!(names_match("effectiveDateTime", "EFFECTIVEDATETIME"));
        assert!(!names_match("status", "statuses"));
    }
}
