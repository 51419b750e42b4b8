//! Error types for Commute Estimator.

use thiserror::Error;

/// Result type alias for Commute Estimator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Commute Estimator.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid configuration file {path}: {reason}")]
    InvalidConfig { path: String, reason: String },

    // Data source errors (20-29)
    #[error("route data source not found: {path}")]
    MissingDataSource { path: String },

    #[error("malformed route record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("route data unreadable: {0}")]
    DataSource(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidConfig { .. } => 11,
            Error::MissingDataSource { .. } => 20,
            Error::InvalidRecord { .. } => 21,
            Error::DataSource(_) => 22,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Whether the process can keep running in a degraded state.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::MissingDataSource { .. })
    }
}
