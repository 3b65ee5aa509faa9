//! CSV ingestion: turns delimited text into numbered [`fhir_model::Row`]s.

pub mod error;
pub mod reader;

pub use error::{IngestError, Result};
pub use reader::{CsvOptions, CsvRowSource};
