use std::path::PathBuf;
use std::time::Duration;

use fhir_cli::pipeline::RunSummary;
use fhir_output::OutputFormat;

/// Outcome of a completed `convert` run.
#[derive(Debug)]
pub struct ConvertResult {
    pub resource_type: &'static str,
    pub input: PathBuf,
    /// `None` when records went to stdout.
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub validated: bool,
    pub summary: RunSummary,
    pub elapsed: Duration,
}
