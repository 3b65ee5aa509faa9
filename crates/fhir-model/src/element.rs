//! Typed field introspection for FHIR elements.
//!
//! Every element type describes its fields through [`FieldInfo`] and hands
//! out a mutable [`Slot`] or a read-only [`FieldValue`] per field. Code that
//! does not know the concrete type at compile time (the mapping engine, the
//! validators) walks object graphs exclusively through these views.
//!
//! # Field kinds
//!
//! | Rust holder          | [`FieldKind`]               |
//! |----------------------|-----------------------------|
//! | `Option<String>`     | `Optional(Text)`            |
//! | `Option<i64>`        | `Optional(Integer)`         |
//! | `Option<f64>`        | `Optional(Real)`            |
//! | `Option<bool>`       | `Optional(Boolean)`         |
//! | `Option<SomeCode>`   | `Optional(Code("SomeCode"))`|
//! | `Option<Coding>`     | `Optional(Object("Coding"))`|
//! | `Vec<T>`             | `Array(<kind of T>)`        |

use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::DecodeError;
use crate::lookup::names_match;

/// Kind of a single value, independent of optionality or repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
    Real,
    Boolean,
    /// Coded value decoded by the type's own literal decoder.
    Code(&'static str),
    /// Nested element.
    Object(&'static str),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Integer => f.write_str("integer"),
            Self::Real => f.write_str("real"),
            Self::Boolean => f.write_str("boolean"),
            Self::Code(name) => write!(f, "code {name}"),
            Self::Object(name) => write!(f, "object {name}"),
        }
    }
}

/// Declared kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Always present (array items).
    Value(ValueKind),
    /// Present or absent.
    Optional(ValueKind),
    /// Repeated.
    Array(ValueKind),
}

impl FieldKind {
    /// The kind of the individual value(s) held by the field.
    pub const fn value(self) -> ValueKind {
        match self {
            Self::Value(kind) | Self::Optional(kind) | Self::Array(kind) => kind,
        }
    }

    pub const fn is_array(self) -> bool {
        matches!(self, Self::Array(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(kind) => write!(f, "{kind}"),
            Self::Optional(kind) => write!(f, "optional {kind}"),
            Self::Array(kind) => write!(f, "array of {kind}"),
        }
    }
}

/// Descriptor of one field of an element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    /// Canonical FHIR name (lower camel case).
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldInfo {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Find the descriptor for a requested field name.
///
/// An exact match wins; otherwise names are compared with
/// [`names_match`], so `Status` and `status` resolve to the same field.
pub fn resolve_field<'a>(fields: &'a [FieldInfo], requested: &str) -> Option<&'a FieldInfo> {
    fields
        .iter()
        .find(|info| info.name == requested)
        .or_else(|| fields.iter().find(|info| names_match(info.name, requested)))
}

/// A node of a FHIR object graph.
///
/// `field` and `field_mut` take canonical names as listed by
/// [`Element::field_infos`]; use [`resolve_field`] for user-supplied names.
pub trait Element: fmt::Debug + Send {
    fn type_name(&self) -> &'static str;

    fn field_infos(&self) -> &'static [FieldInfo];

    fn field_mut(&mut self, name: &str) -> Option<Slot<'_>>;

    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Custom literal decoder.
    ///
    /// Returns `None` when the type declares no decoder, which is the case
    /// for every plain structure: a bare string never becomes a shape.
    fn decode_literal(&mut self, _literal: &str) -> Option<Result<(), DecodeError>> {
        None
    }
}

/// True when no field of the element carries a value.
pub fn is_element_empty(element: &dyn Element) -> bool {
    element.field_infos().iter().all(|info| {
        element
            .field(info.name)
            .is_none_or(|value| value.is_empty())
    })
}

/// Assignment target for a primitive value.
pub trait Assign<T> {
    fn assign(&mut self, value: T);
}

impl<T> Assign<T> for Option<T> {
    fn assign(&mut self, value: T) {
        *self = Some(value);
    }
}

impl Assign<String> for String {
    fn assign(&mut self, value: String) {
        *self = value;
    }
}

/// A field whose value is decoded from text by the type itself.
pub trait Codable {
    fn code_type(&self) -> &'static str;

    fn decode_literal(&mut self, literal: &str) -> Result<(), DecodeError>;
}

/// Decode a literal through the type's serde decoder.
///
/// The literal is re-encoded as a JSON string first, so the decoder sees
/// exactly what it would see in a FHIR JSON document.
pub fn decode_quoted<T: DeserializeOwned>(
    type_name: &'static str,
    literal: &str,
) -> Result<T, DecodeError> {
    let quoted = serde_json::to_string(literal)
        .map_err(|error| DecodeError::new(type_name, literal, error.to_string()))?;
    serde_json::from_str(&quoted)
        .map_err(|error| DecodeError::new(type_name, literal, error.to_string()))
}

/// Run the custom decoder of `T` against a copy of the current value.
///
/// Members already present survive unless the decoder overwrites them. The
/// caller commits the copy only on success, so a rejected literal leaves
/// the existing value untouched.
pub fn decode_merged<T: Element + Clone + Default>(
    current: Option<&T>,
    literal: &str,
) -> Option<Result<T, DecodeError>> {
    let mut draft = current.cloned().unwrap_or_default();
    let outcome = draft.decode_literal(literal)?;
    Some(outcome.map(|()| draft))
}

/// A field holding a nested element, allocated on demand.
pub trait ObjectSlot {
    fn object_type(&self) -> &'static str;

    /// Allocate a default instance if the slot is empty and return it.
    fn allocate(&mut self) -> &mut dyn Element;

    /// Decode a literal into the slot, keeping members it does not set.
    ///
    /// `None` when the element type declares no literal decoder.
    fn decode_literal(&mut self, literal: &str) -> Option<Result<(), DecodeError>>;
}

/// A repeated field that grows on demand.
pub trait ArraySlot {
    fn item_kind(&self) -> ValueKind;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grow to at least `len` items, keeping existing items in place.
    fn ensure_len(&mut self, len: usize);

    /// Slot of item `index`, growing the array with default items first
    /// when it is too short.
    fn grow_to(&mut self, index: usize) -> Slot<'_>;
}

impl<T: Field + Default> ArraySlot for Vec<T> {
    fn item_kind(&self) -> ValueKind {
        T::KIND.value()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn ensure_len(&mut self, len: usize) {
        if Vec::len(self) < len {
            self.resize_with(len, T::default);
        }
    }

    fn grow_to(&mut self, index: usize) -> Slot<'_> {
        ArraySlot::ensure_len(self, index + 1);
        self[index].slot()
    }
}

/// Mutable view of one field.
pub enum Slot<'a> {
    Text(&'a mut dyn Assign<String>),
    Integer(&'a mut dyn Assign<i64>),
    Real(&'a mut dyn Assign<f64>),
    Boolean(&'a mut dyn Assign<bool>),
    Code(&'a mut dyn Codable),
    Object(&'a mut dyn ObjectSlot),
    Array(&'a mut dyn ArraySlot),
}

/// Read-only view of one field.
#[derive(Debug, Clone)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    Integer(Option<i64>),
    Real(Option<f64>),
    Boolean(Option<bool>),
    Code(Option<&'static str>),
    Object(Option<&'a dyn Element>),
    Array(Vec<FieldValue<'a>>),
}

impl<'a> FieldValue<'a> {
    /// Absent, blank text, an element without values, or an array whose
    /// items are all empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(value) => value.is_none_or(str::is_empty),
            Self::Integer(value) => value.is_none(),
            Self::Real(value) => value.is_none(),
            Self::Boolean(value) => value.is_none(),
            Self::Code(value) => value.is_none(),
            Self::Object(value) => value.is_none_or(is_element_empty),
            Self::Array(items) => items.iter().all(FieldValue::is_empty),
        }
    }

    /// Text or code content.
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Self::Text(value) => *value,
            Self::Code(value) => *value,
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&'a dyn Element> {
        match self {
            Self::Object(value) => *value,
            _ => None,
        }
    }
}

/// Binds a Rust field holder to its kind and its views.
pub trait Field {
    const KIND: FieldKind;

    fn slot(&mut self) -> Slot<'_>;

    fn value(&self) -> FieldValue<'_>;
}

impl Field for Option<String> {
    const KIND: FieldKind = FieldKind::Optional(ValueKind::Text);

    fn slot(&mut self) -> Slot<'_> {
        Slot::Text(self)
    }

    fn value(&self) -> FieldValue<'_> {
        FieldValue::Text(self.as_deref())
    }
}

impl Field for String {
    const KIND: FieldKind = FieldKind::Value(ValueKind::Text);

    fn slot(&mut self) -> Slot<'_> {
        Slot::Text(self)
    }

    fn value(&self) -> FieldValue<'_> {
        FieldValue::Text(Some(self.as_str()))
    }
}

impl Field for Option<i64> {
    const KIND: FieldKind = FieldKind::Optional(ValueKind::Integer);

    fn slot(&mut self) -> Slot<'_> {
        Slot::Integer(self)
    }

    fn value(&self) -> FieldValue<'_> {
        FieldValue::Integer(*self)
    }
}

impl Field for Option<f64> {
    const KIND: FieldKind = FieldKind::Optional(ValueKind::Real);

    fn slot(&mut self) -> Slot<'_> {
        Slot::Real(self)
    }

    fn value(&self) -> FieldValue<'_> {
        FieldValue::Real(*self)
    }
}

impl Field for Option<bool> {
    const KIND: FieldKind = FieldKind::Optional(ValueKind::Boolean);

    fn slot(&mut self) -> Slot<'_> {
        Slot::Boolean(self)
    }

    fn value(&self) -> FieldValue<'_> {
        FieldValue::Boolean(*self)
    }
}

impl<T: Field + Default> Field for Vec<T> {
    const KIND: FieldKind = FieldKind::Array(T::KIND.value());

    fn slot(&mut self) -> Slot<'_> {
        Slot::Array(self)
    }

    fn value(&self) -> FieldValue<'_> {
        FieldValue::Array(self.iter().map(T::value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_growth_keeps_existing_items() {
        let mut items = vec!["first".to_string()];
        ArraySlot::ensure_len(&mut items, 3);
        assert_eq!(items, vec!["first", "", ""]);

        ArraySlot::ensure_len(&mut items, 2);
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn array_kind_reports_item_kind() {
        assert_eq!(
            <Vec<String> as Field>::KIND,
            FieldKind::Array(ValueKind::Text)
        );
        assert_eq!(<Vec<String> as Field>::KIND.to_string(), "array of text");
        assert_eq!(
            <Option<i64> as Field>::KIND.to_string(),
            "optional integer"
        );
    }

    #[test]
    fn text_slot_assigns_owned_value() {
        let mut holder: Option<String> = None;
        match holder.slot() {
            Slot::Text(target) => target.assign("final".to_string()),
            _ => panic!("expected text slot"),
        }
        assert_eq!(holder.as_deref(), Some("final"));
    }

    #[test]
    fn empty_values() {
        assert!(FieldValue::Text(Some("")).is_empty());
        assert!(FieldValue::Array(vec![FieldValue::Text(None)]).is_empty());
        assert!(!FieldValue::Boolean(Some(false)).is_empty());
    }

    #[test]
    fn resolve_field_ignores_case() {
        const FIELDS: &[FieldInfo] = &[
            FieldInfo::new("status", FieldKind::Optional(ValueKind::Text)),
            FieldInfo::new("effectiveDateTime", FieldKind::Optional(ValueKind::Text)),
        ];
        assert_eq!(
            resolve_field(FIELDS, "EffectiveDateTime").map(|info| info.name),
            Some("effectiveDateTime")
        );
        assert!(resolve_field(FIELDS, "effective").is_none());
    }
}
