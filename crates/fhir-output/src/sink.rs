//! Record sinks.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use fhir_model::BuiltRecord;

use crate::bundle::BundleWriter;
use crate::error::{OutputError, Result};
use crate::format::OutputFormat;
use crate::ndjson::NdjsonWriter;

/// Default ceiling on resources buffered for Bundle output.
pub const DEFAULT_MAX_RESOURCES: usize = 10_000;

/// Destination for built records.
///
/// A sink is driven by a single consumer. `finalize` completes the output;
/// calling it again has no effect.
pub trait OutputSink: Send {
    fn accept(&mut self, record: BuiltRecord) -> Result<()>;

    fn finalize(&mut self) -> Result<()>;

    /// Records accepted so far.
    fn accepted(&self) -> usize;
}

/// Byte stream a sink writes to.
pub type Output = Box<dyn Write + Send>;

/// Open `path` for writing; `None` or `-` means standard output.
pub fn open_output(path: Option<&Path>) -> Result<Output> {
    match path {
        None => Ok(Box::new(std::io::stdout())),
        Some(path) if path.as_os_str() == "-" => Ok(Box::new(std::io::stdout())),
        Some(path) => {
            let file = File::create(path).map_err(|source| OutputError::Create {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
    }
}

/// Create the sink for `format` writing to `path`.
///
/// `max_resources` bounds Bundle output; zero selects
/// [`DEFAULT_MAX_RESOURCES`].
pub fn create_sink(
    path: Option<&Path>,
    format: OutputFormat,
    max_resources: usize,
) -> Result<Box<dyn OutputSink>> {
    let output = open_output(path)?;
    tracing::debug!(
        format = %format,
        path = %path.map_or_else(|| "-".into(), |path| path.display().to_string()),
        "opened output"
    );
    Ok(match format {
        OutputFormat::Ndjson => Box::new(NdjsonWriter::new(output)),
        OutputFormat::Bundle => Box::new(BundleWriter::with_limit(output, max_resources)),
    })
}
