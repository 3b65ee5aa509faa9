//! FHIR resource model with typed field introspection.
//!
//! Resources and datatypes are plain structs generated by a small set of
//! declarative macros; each exposes its fields through
//! [`element::Element`] so that records can be populated by name at run
//! time without reflection.

#[macro_use]
mod macros;

pub mod catalog;
pub mod codes;
pub mod datatypes;
pub mod element;
pub mod error;
pub mod issue;
pub mod lookup;
pub mod record;
pub mod resource;
pub mod resources;
pub mod row;

pub use catalog::{FhirCatalog, TypeCatalog, TypeShape, default_catalog};
pub use element::{
    ArraySlot, Assign, Codable, Element, Field, FieldInfo, FieldKind, FieldValue, ObjectSlot,
    Slot, ValueKind, resolve_field,
};
pub use error::DecodeError;
pub use issue::{IssueSeverity, ValidationIssue, Validator};
pub use lookup::names_match;
pub use record::BuiltRecord;
pub use resource::Resource;
pub use row::{ColumnSet, Row};
