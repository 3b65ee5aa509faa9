use std::io::Write;

use fhir_model::BuiltRecord;
use serde::Serialize;
use serde_json::Value;

use crate::error::{OutputError, Result};
use crate::sink::{DEFAULT_MAX_RESOURCES, OutputSink};

#[derive(Serialize)]
struct Bundle<'a> {
    #[serde(rename = "resourceType")]
    resource_type: &'static str,
    #[serde(rename = "type")]
    bundle_type: &'static str,
    total: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    entry: Vec<BundleEntry<'a>>,
}

#[derive(Serialize)]
struct BundleEntry<'a> {
    resource: &'a Value,
}

/// Buffers resources and writes a pretty-printed `collection` Bundle on
/// finalize.
///
/// Holds at most `limit` resources. A warning is logged once the buffer
/// reaches 90 % of the limit; the record after the limit is refused with
/// [`OutputError::Capacity`].
pub struct BundleWriter<W: Write> {
    writer: W,
    resources: Vec<Value>,
    limit: usize,
    warned: bool,
    finished: bool,
}

impl<W: Write> BundleWriter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_limit(writer, DEFAULT_MAX_RESOURCES)
    }

    /// A zero `limit` selects [`DEFAULT_MAX_RESOURCES`].
    pub fn with_limit(writer: W, limit: usize) -> Self {
        let limit = if limit == 0 { DEFAULT_MAX_RESOURCES } else { limit };
        Self {
            writer,
            resources: Vec::new(),
            limit,
            warned: false,
            finished: false,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn warn_threshold(&self) -> usize {
        self.limit - self.limit / 10
    }
}

impl<W: Write + Send> OutputSink for BundleWriter<W> {
    fn accept(&mut self, record: BuiltRecord) -> Result<()> {
        let buffered = self.resources.len();
        if !self.warned && buffered >= self.warn_threshold() {
            self.warned = true;
            tracing::warn!(
                buffered,
                limit = self.limit,
                "approaching bundle resource limit; consider --format ndjson for large files"
            );
        }
        if buffered >= self.limit {
            return Err(OutputError::Capacity { limit: self.limit });
        }
        self.resources.push(record.to_json()?);
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;

        let bundle = Bundle {
            resource_type: "Bundle",
            bundle_type: "collection",
            total: self.resources.len(),
            entry: self
                .resources
                .iter()
                .map(|resource| BundleEntry { resource })
                .collect(),
        };
        serde_json::to_writer_pretty(&mut self.writer, &bundle)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        tracing::debug!(total = bundle.total, "wrote bundle");
        Ok(())
    }

    fn accepted(&self) -> usize {
        self.resources.len()
    }
}
