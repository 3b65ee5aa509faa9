use std::io::Write;

use fhir_model::BuiltRecord;

use crate::error::Result;
use crate::sink::OutputSink;

/// Streams one compact JSON resource per line.
pub struct NdjsonWriter<W: Write> {
    writer: W,
    accepted: usize,
    finished: bool,
}

impl<W: Write> NdjsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            accepted: 0,
            finished: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> OutputSink for NdjsonWriter<W> {
    fn accept(&mut self, record: BuiltRecord) -> Result<()> {
        let value = record.to_json()?;
        serde_json::to_writer(&mut self.writer, &value)?;
        self.writer.write_all(b"\n")?;
        self.accepted += 1;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }

    fn accepted(&self) -> usize {
        self.accepted
    }
}
