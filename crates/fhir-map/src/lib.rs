//! CSV row to FHIR resource mapping.
//!
//! - [`path`]: parse `code.coding[0].system` style paths.
//! - [`template`]: expand `${column}` placeholders against a row.
//! - [`mutate`]: write a literal into a resource by path.
//! - [`mapping`]: the YAML mapping specification.
//! - [`builder`]: apply a mapping to one row.

pub mod builder;
pub mod error;
pub mod mapping;
pub mod mutate;
pub mod path;
pub mod template;

pub use builder::RecordBuilder;
pub use error::{
    BuildError, BuildErrorKind, ConfigError, MutationError, PathError, SubstitutionError, Target,
};
pub use mapping::MappingSpec;
pub use mutate::set_value;
pub use path::{FieldPath, MAX_ARRAY_INDEX, PathSegment};
pub use template::{has_placeholder_syntax, placeholders, substitute};
