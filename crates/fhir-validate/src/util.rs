use fhir_model::{Element, FieldValue};

/// Collect the values addressed by a dotted path.
///
/// Arrays met along the way are expanded, and each result is labelled with
/// the concrete location it came from, e.g. `performer[1].actor`.
/// Unknown fields and absent objects yield nothing.
pub fn resolve_values<'a>(element: &'a dyn Element, path: &str) -> Vec<(String, FieldValue<'a>)> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut found = Vec::new();
    walk(element, &segments, "", &mut found);
    found
}

fn walk<'a>(
    element: &'a dyn Element,
    segments: &[&str],
    prefix: &str,
    found: &mut Vec<(String, FieldValue<'a>)>,
) {
    let Some((name, rest)) = segments.split_first() else {
        return;
    };
    let Some(value) = element.field(name) else {
        return;
    };
    let label = if prefix.is_empty() {
        (*name).to_string()
    } else {
        format!("{prefix}.{name}")
    };
    visit(value, label, rest, found);
}

fn visit<'a>(
    value: FieldValue<'a>,
    label: String,
    rest: &[&str],
    found: &mut Vec<(String, FieldValue<'a>)>,
) {
    match value {
        FieldValue::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                visit(item, format!("{label}[{index}]"), rest, found);
            }
        }
        value if rest.is_empty() => found.push((label, value)),
        FieldValue::Object(Some(child)) => walk(child, rest, &label, found),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use fhir_model::datatypes::{ProcedurePerformer, Reference};
    use fhir_model::resources::Procedure;

    use super::*;

    #[test]
    fn expands_arrays_with_positions() {
        let procedure = Procedure {
            performer: vec![
                ProcedurePerformer::default(),
                ProcedurePerformer {
                    actor: Some(Reference {
                        reference: Some("Practitioner/7".to_string()),
                        ..Reference::default()
                    }),
                    ..ProcedurePerformer::default()
                },
            ],
            ..Procedure::default()
        };
        let found = resolve_values(&procedure, "performer.actor");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].0, "performer[0].actor");
        assert!(found[0].1.is_empty());
        assert_eq!(found[1].0, "performer[1].actor");
        assert!(!found[1].1.is_empty());
    }

    #[test]
    fn unknown_fields_yield_nothing() {
        let procedure = Procedure::default();
        assert!(resolve_values(&procedure, "nothing.here").is_empty());
        assert!(resolve_values(&procedure, "subject.reference").is_empty());
    }
}
