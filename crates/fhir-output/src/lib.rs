//! Output sinks for built FHIR resources.
//!
//! - [`NdjsonWriter`]: streams one resource per line.
//! - [`BundleWriter`]: buffers resources into a single `collection` Bundle,
//!   bounded by a configurable ceiling.

pub mod bundle;
pub mod error;
pub mod format;
pub mod ndjson;
pub mod sink;

pub use bundle::BundleWriter;
pub use error::{OutputError, Result};
pub use format::{OutputFormat, ParseFormatError};
pub use ndjson::NdjsonWriter;
pub use sink::{DEFAULT_MAX_RESOURCES, Output, OutputSink, create_sink, open_output};
