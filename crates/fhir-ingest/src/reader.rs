//! Streaming CSV row source.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord, Trim};
use fhir_model::{ColumnSet, Row};

use crate::error::{IngestError, Result};

/// Reader settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Lazy, single-pass sequence of [`Row`]s.
///
/// The first record is the header. Data rows are numbered from 1; records
/// shorter than the header read their missing cells as empty strings.
/// Iteration ends after the first read error.
pub struct CsvRowSource<R: Read> {
    reader: csv::Reader<R>,
    origin: String,
    columns: Arc<ColumnSet>,
    record: StringRecord,
    rows_read: u64,
    finished: bool,
}

impl CsvRowSource<File> {
    /// Open a CSV file and read its header.
    pub fn open(path: &Path, options: &CsvOptions) -> Result<Self> {
        if !path.exists() {
            return Err(IngestError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_origin(file, path.display().to_string(), options)
    }
}

impl<R: Read> CsvRowSource<R> {
    pub fn from_reader(reader: R, options: &CsvOptions) -> Result<Self> {
        Self::with_origin(reader, "<input>".to_string(), options)
    }

    fn with_origin(input: R, origin: String, options: &CsvOptions) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input);

        let headers = reader.headers().map_err(|source| IngestError::Csv {
            origin: origin.clone(),
            line: source.position().map(csv::Position::line),
            source,
        })?;
        if headers.is_empty() {
            return Err(IngestError::EmptyCsv { origin });
        }
        let columns = Arc::new(ColumnSet::new(headers.iter().map(normalize_header)));
        tracing::debug!(origin = %origin, columns = columns.len(), "opened CSV source");

        Ok(Self {
            reader,
            origin,
            columns,
            record: StringRecord::new(),
            rows_read: 0,
            finished: false,
        })
    }

    /// Header columns.
    pub fn columns(&self) -> &Arc<ColumnSet> {
        &self.columns
    }

    /// Data rows yielded so far.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }
}

impl<R: Read> Iterator for CsvRowSource<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                self.rows_read += 1;
                let values = self.record.iter().map(normalize_cell).collect();
                Some(Ok(Row::new(
                    self.rows_read,
                    Arc::clone(&self.columns),
                    values,
                )))
            }
            Ok(false) => {
                self.finished = true;
                None
            }
            Err(source) => {
                self.finished = true;
                Some(Err(IngestError::Csv {
                    origin: self.origin.clone(),
                    line: source.position().map(csv::Position::line),
                    source,
                }))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for CsvRowSource<R> {}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_header("\u{feff} patient   id "), "patient id");
        assert_eq!(normalize_header("status"), "status");
    }
}
