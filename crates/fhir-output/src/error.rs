//! Error types for output sinks.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create output file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize resource: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Bundle output buffers every resource; the ceiling bounds memory.
    #[error(
        "resource limit exceeded ({limit} resources); use --format ndjson for large files or increase --max-resources"
    )]
    Capacity { limit: usize },
}

pub type Result<T> = std::result::Result<T, OutputError>;
