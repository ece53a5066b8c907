//! Error types for loading the salary dataset.

use std::path::PathBuf;

use thiserror::Error;

/// Why the dataset could not be loaded. Fatal to the session; never retried.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Error reading a local file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request could not be completed.
    #[error("request to '{url}' failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("'{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Malformed CSV or a cell that does not fit its column type.
    #[error("CSV error at row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },

    /// Error from the CSV library outside of a data row (e.g. the header).
    #[error("CSV error: {0}")]
    Header(#[from] csv::Error),

    /// One or more required columns are absent from the header.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A value parsed but is out of range for its column.
    #[error("invalid value at row {row}, column '{column}': {message}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        message: String,
    },
}
