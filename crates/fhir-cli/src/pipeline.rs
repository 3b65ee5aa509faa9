//! Concurrent row pipeline.
//!
//! One producer feeds rows into a bounded job queue, a fixed pool of
//! workers builds (and optionally validates) a record per row, and the
//! calling thread consumes the results: it applies the validation policy,
//! hands accepted records to the sink and keeps the run counters.
//!
//! ```text
//! rows -> producer -> [jobs] -> workers x N -> [results] -> consumer -> sink
//! ```
//!
//! Records reach the sink in completion order, not row order.

use std::thread;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, bounded};
use fhir_ingest::IngestError;
use fhir_map::{BuildError, BuildErrorKind, MutationError, RecordBuilder};
use fhir_model::{BuiltRecord, Row, ValidationIssue, Validator};
use fhir_model::issue::error_count;
use fhir_output::{OutputError, OutputSink};
use fhir_validate::format_issues;
use thiserror::Error;
use tracing::{debug, error, info, info_span, trace, warn};

use crate::logging::{REDACTED_VALUE, log_data_enabled, redact_value};

/// Written records between progress messages.
const PROGRESS_INTERVAL: usize = 100;

/// What to do with a record that carries validation errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationLevel {
    /// Drop records with at least one error-severity issue.
    #[default]
    Error,
    /// Log the issues and write the record anyway.
    Warn,
}

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub workers: usize,
    /// Capacity of the job and result queues; `None` means `workers * 4`.
    pub queue_depth: Option<usize>,
    pub validation_level: ValidationLevel,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            workers: 4,
            queue_depth: None,
            validation_level: ValidationLevel::default(),
        }
    }
}

impl PipelineOptions {
    fn worker_count(&self) -> usize {
        self.workers.max(1)
    }

    fn depth(&self) -> usize {
        self.queue_depth
            .unwrap_or(self.worker_count() * 4)
            .max(1)
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows that came back from the workers.
    pub rows: usize,
    pub written: usize,
    /// Rows that could not be built.
    pub failed: usize,
    /// Records dropped by the validation policy.
    pub rejected: usize,
    /// Records with at least one validation issue.
    pub flagged: usize,
}

/// Fate of a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Written,
    Rejected { errors: usize },
    Failed(BuildError),
}

impl RowOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Written => "written",
            Self::Rejected { .. } => "rejected",
            Self::Failed(_) => "failed",
        }
    }
}

/// Run-level failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The row source failed; rows already queued were still processed.
    #[error("reading rows failed: {0}")]
    Source(#[source] IngestError),

    #[error("writing output failed: {0}")]
    Sink(#[source] OutputError),
}

struct Processed {
    row: u64,
    result: Result<(BuiltRecord, Vec<ValidationIssue>), BuildError>,
}

pub struct Pipeline<'a> {
    builder: &'a RecordBuilder<'a>,
    validator: Option<&'a dyn Validator>,
    options: PipelineOptions,
}

impl<'a> Pipeline<'a> {
    pub fn new(builder: &'a RecordBuilder<'a>) -> Self {
        Self {
            builder,
            validator: None,
            options: PipelineOptions::default(),
        }
    }

    #[must_use]
    pub fn with_validator(mut self, validator: &'a dyn Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run every row through the pool and finalize the sink.
    pub fn run<I>(&self, rows: I, sink: &mut dyn OutputSink) -> Result<RunSummary, PipelineError>
    where
        I: Iterator<Item = fhir_ingest::Result<Row>> + Send,
    {
        self.run_with(rows, sink, |_, _| {})
    }

    /// Like [`Pipeline::run`], reporting each row's outcome to `observer`.
    ///
    /// A sink error stops the run at once and `finalize` is not called. A
    /// source error stops reading; rows already queued are still consumed
    /// before the error is returned.
    pub fn run_with<I, F>(
        &self,
        rows: I,
        sink: &mut dyn OutputSink,
        mut observer: F,
    ) -> Result<RunSummary, PipelineError>
    where
        I: Iterator<Item = fhir_ingest::Result<Row>> + Send,
        F: FnMut(u64, &RowOutcome),
    {
        let span = info_span!(
            "pipeline",
            resource = self.builder.resource_type(),
            workers = self.options.worker_count()
        );
        let _guard = span.enter();
        let start = Instant::now();
        let depth = self.options.depth();
        let (job_tx, job_rx) = bounded::<Row>(depth);
        let (result_tx, result_rx) = bounded::<Processed>(depth);
        let mut summary = RunSummary::default();

        let (consumed, source_error) = thread::scope(|scope| {
            let producer = scope.spawn(move || produce(rows, &job_tx));
            for _ in 0..self.options.worker_count() {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || self.work(&job_rx, &result_tx));
            }
            drop(job_rx);
            drop(result_tx);

            let consumed = self.consume(&result_rx, sink, &mut summary, &mut observer);
            // Unblocks workers, and through them the producer, after a sink error.
            drop(result_rx);
            let source_error = producer
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
            (consumed, source_error)
        });

        consumed.map_err(PipelineError::Sink)?;
        if let Some(error) = source_error {
            return Err(PipelineError::Source(error));
        }
        sink.finalize().map_err(PipelineError::Sink)?;

        debug!(
            elapsed_ms = start.elapsed().as_millis(),
            rows = summary.rows,
            "pipeline finished"
        );
        Ok(summary)
    }

    fn work(&self, jobs: &Receiver<Row>, results: &Sender<Processed>) {
        for row in jobs {
            let processed = Processed {
                row: row.number(),
                result: self.builder.build_and_validate(&row, self.validator),
            };
            if results.send(processed).is_err() {
                break;
            }
        }
    }

    fn consume<F>(
        &self,
        results: &Receiver<Processed>,
        sink: &mut dyn OutputSink,
        summary: &mut RunSummary,
        observer: &mut F,
    ) -> Result<(), OutputError>
    where
        F: FnMut(u64, &RowOutcome),
    {
        for Processed { row, result } in results {
            summary.rows += 1;
            let outcome = match result {
                Err(error) => {
                    summary.failed += 1;
                    if error.is_configuration() {
                        error!(row, "{}", describe_failure(&error));
                    } else {
                        warn!(row, "{}", describe_failure(&error));
                    }
                    RowOutcome::Failed(error)
                }
                Ok((record, issues)) => {
                    if !issues.is_empty() {
                        summary.flagged += 1;
                        for line in format_issues(&issues, row).lines() {
                            warn!(row, "{line}");
                        }
                    }
                    let errors = error_count(&issues);
                    if self.options.validation_level == ValidationLevel::Error && errors > 0 {
                        summary.rejected += 1;
                        RowOutcome::Rejected { errors }
                    } else {
                        sink.accept(record)?;
                        summary.written += 1;
                        if summary.written % PROGRESS_INTERVAL == 0 {
                            info!(written = summary.written, "progress");
                        }
                        RowOutcome::Written
                    }
                }
            };
            trace!(row, outcome = outcome.label(), "row consumed");
            observer(row, &outcome);
        }
        Ok(())
    }
}

/// Push rows until the source ends, fails, or nobody is listening.
fn produce<I>(rows: I, jobs: &Sender<Row>) -> Option<IngestError>
where
    I: Iterator<Item = fhir_ingest::Result<Row>>,
{
    for row in rows {
        match row {
            Ok(row) => {
                if jobs.send(row).is_err() {
                    return None;
                }
            }
            Err(error) => return Some(error),
        }
    }
    None
}

/// Render a row failure for the log, keeping cell values out of it unless
/// row-level logging is enabled.
pub fn describe_failure(error: &BuildError) -> String {
    match &error.kind {
        BuildErrorKind::Mutation(MutationError::Coercion {
            literal,
            kind,
            reason,
        }) => format!(
            "row {}: {}: cannot convert '{}' to {kind}: {reason}",
            error.row,
            error.target,
            redact_value(literal)
        ),
        BuildErrorKind::Mutation(MutationError::Decode(decode)) if !log_data_enabled() => format!(
            "row {}: {}: '{REDACTED_VALUE}' is not a valid {}",
            error.row, error.target, decode.type_name
        ),
        _ => error.to_string(),
    }
}
