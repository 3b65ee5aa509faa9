//! Error types for CSV ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading rows.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input has no header record.
    #[error("CSV input is empty: {origin}")]
    EmptyCsv { origin: String },

    /// Malformed record or I/O failure mid-stream.
    #[error("failed to parse CSV {origin}{}: {source}", line_suffix(.line))]
    Csv {
        origin: String,
        line: Option<u64>,
        #[source]
        source: csv::Error,
    },
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|line| format!(" at line {line}")).unwrap_or_default()
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/file.csv");

        let err = IngestError::EmptyCsv {
            origin: "labs.csv".to_string(),
        };
        assert_eq!(err.to_string(), "CSV input is empty: labs.csv");
    }
}
