//! Writing literals into an object graph by path.
//!
//! [`set_value`] walks a [`FieldPath`] from a root element, allocating
//! absent optional objects and growing arrays on the way, then coerces the
//! literal into the terminal field's declared kind.
//!
//! Coercion is a two-branch policy. Fields whose type carries its own
//! literal decoder (codes, and any object type that declares one) use that
//! decoder exclusively and nothing else. An object without a decoder
//! rejects a bare literal instead of guessing a shape. All other fields are
//! parsed by kind: text verbatim, integers and reals with the standard
//! lexical rules, booleans with `1/t/T/TRUE/true/True` and their negatives.
//!
//! A failing path may leave the intermediate objects it allocated in place;
//! sibling branches and earlier values are never touched.

use fhir_model::{Element, FieldInfo, FieldKind, Slot, ValueKind, resolve_field};

use crate::error::MutationError;
use crate::path::{FieldPath, PathSegment};

/// Write `literal` at `path` below `root`.
pub fn set_value(
    root: &mut dyn Element,
    path: &FieldPath,
    literal: &str,
) -> Result<(), MutationError> {
    let (terminal, spine) = path
        .segments()
        .split_last()
        .ok_or(MutationError::EmptyPath)?;

    let mut cursor = root;
    for segment in spine {
        cursor = descend(cursor, segment)?;
    }

    let (slot, _) = locate(cursor, terminal)?;
    assign(slot, &terminal.field, literal)
}

/// Resolve a segment to the slot it addresses: the field itself, or the
/// selected array item.
fn locate<'a>(
    cursor: &'a mut dyn Element,
    segment: &PathSegment,
) -> Result<(Slot<'a>, &'static FieldInfo), MutationError> {
    let owner = cursor.type_name();
    let info = resolve_field(cursor.field_infos(), &segment.field).ok_or_else(|| {
        MutationError::UnknownField {
            field: segment.field.clone(),
            owner,
        }
    })?;
    let slot = cursor
        .field_mut(info.name)
        .ok_or_else(|| MutationError::UnknownField {
            field: segment.field.clone(),
            owner,
        })?;

    let Some(index) = segment.index else {
        return Ok((slot, info));
    };
    match slot {
        Slot::Array(array) => Ok((array.grow_to(index), info)),
        _ => Err(MutationError::NotAnArray {
            field: segment.field.clone(),
            owner,
            kind: info.kind,
        }),
    }
}

fn descend<'a>(
    cursor: &'a mut dyn Element,
    segment: &PathSegment,
) -> Result<&'a mut dyn Element, MutationError> {
    let owner = cursor.type_name();
    let (slot, info) = locate(cursor, segment)?;
    match slot {
        Slot::Object(object) => Ok(object.allocate()),
        Slot::Array(_) => Err(MutationError::MissingIndex {
            field: segment.field.clone(),
            owner,
        }),
        _ => Err(MutationError::NotNavigable {
            field: segment.field.clone(),
            owner,
            kind: element_kind(info, segment),
        }),
    }
}

/// Kind of the addressed location; an indexed array yields its item kind.
fn element_kind(info: &FieldInfo, segment: &PathSegment) -> FieldKind {
    match (info.kind, segment.index) {
        (FieldKind::Array(item), Some(_)) => FieldKind::Value(item),
        (kind, _) => kind,
    }
}

fn assign(slot: Slot<'_>, field: &str, literal: &str) -> Result<(), MutationError> {
    match slot {
        Slot::Text(target) => target.assign(literal.to_string()),
        Slot::Integer(target) => target.assign(parse_integer(literal)?),
        Slot::Real(target) => target.assign(parse_real(literal)?),
        Slot::Boolean(target) => target.assign(parse_bool(literal)?),
        Slot::Code(target) => target.decode_literal(literal)?,
        Slot::Object(target) => match target.decode_literal(literal) {
            Some(outcome) => outcome?,
            None => {
                return Err(MutationError::NoLiteralDecoder {
                    object_type: target.object_type(),
                });
            }
        },
        Slot::Array(target) => {
            return Err(MutationError::UnsupportedKind {
                field: field.to_string(),
                kind: FieldKind::Array(target.item_kind()),
            });
        }
    }
    Ok(())
}

fn parse_integer(literal: &str) -> Result<i64, MutationError> {
    literal
        .parse::<i64>()
        .map_err(|error| coercion(literal, ValueKind::Integer, error.to_string()))
}

fn parse_real(literal: &str) -> Result<f64, MutationError> {
    let value = literal
        .parse::<f64>()
        .map_err(|error| coercion(literal, ValueKind::Real, error.to_string()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(coercion(literal, ValueKind::Real, "value is not finite"))
    }
}

fn parse_bool(literal: &str) -> Result<bool, MutationError> {
    match literal {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(coercion(literal, ValueKind::Boolean, "not a boolean")),
    }
}

fn coercion(literal: &str, kind: ValueKind, reason: impl Into<String>) -> MutationError {
    MutationError::Coercion {
        literal: literal.to_string(),
        kind,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use fhir_model::resources::Observation;

    use super::*;

    fn set(observation: &mut Observation, path: &str, literal: &str) -> Result<(), MutationError> {
        set_value(observation, &FieldPath::parse(path).unwrap(), literal)
    }

    #[test]
    fn boolean_lexicon() {
        assert_eq!(parse_bool("T"), Ok(true));
        assert_eq!(parse_bool("0"), Ok(false));
        assert!(parse_bool("yes").is_err());
        assert!(parse_bool("tRUE").is_err());
    }

    #[test]
    fn reals_must_be_finite() {
        assert_eq!(parse_real("1e3"), Ok(1000.0));
        assert!(parse_real("NaN").is_err());
        assert!(parse_real("inf").is_err());
    }

    #[test]
    fn unindexed_array_in_spine_asks_for_index() {
        let mut observation = Observation::default();
        let err = set(&mut observation, "code.coding.system", "x").unwrap_err();
        assert!(matches!(
            err,
            MutationError::MissingIndex { ref field, owner: "CodeableConcept" } if field == "coding"
        ));
    }

    #[test]
    fn primitive_in_spine_is_not_navigable() {
        let mut observation = Observation::default();
        let err = set(&mut observation, "issued.value", "x").unwrap_err();
        assert!(matches!(err, MutationError::NotNavigable { .. }));
    }
}
