use std::path::PathBuf;
use thiserror::Error;

/// Failures that can occur while persisting an execution report.
///
/// None of these ever reach the caller of
/// [`ReportGenerator::generate`](crate::report::ReportGenerator::generate);
/// they are logged and the report is dropped.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to create report directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move report into place at {path:?}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Report path has no parent directory: {0:?}")]
    InvalidPath(PathBuf),
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;
