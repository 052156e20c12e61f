//! Error types shared by the GOES fetch tools.

use thiserror::Error;

/// Result type alias using GoesError.
pub type GoesResult<T> = Result<T, GoesError>;

/// Primary error type for catalog, transfer and correction operations.
#[derive(Debug, Error)]
pub enum GoesError {
    // === Request construction ===
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Invalid time specification: {0}")]
    InvalidTime(String),

    #[error("Invalid time window: start {start} is after end {end}")]
    InvalidWindow { start: String, end: String },

    #[error("Invalid bounding box: {0}")]
    InvalidBbox(String),

    #[error("Unknown domain: {0}")]
    UnknownDomain(String),

    #[error("Unknown band: {0}")]
    UnknownBand(String),

    #[error("Unknown scene: {0}")]
    UnknownScene(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // === Per-file ===
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Transfer of {path} failed: {message}")]
    Transfer { path: String, message: String },

    #[error("Invalid NetCDF data: {0}")]
    NetCdf(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GoesError {
    /// Whether this error was raised while building the request, before any
    /// network or disk work. These abort the whole invocation.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            GoesError::Usage(_)
                | GoesError::InvalidTime(_)
                | GoesError::InvalidWindow { .. }
                | GoesError::InvalidBbox(_)
                | GoesError::UnknownDomain(_)
                | GoesError::UnknownBand(_)
                | GoesError::UnknownScene(_)
                | GoesError::Config(_)
        )
    }
}

impl From<std::io::Error> for GoesError {
    fn from(err: std::io::Error) -> Self {
        GoesError::Internal(err.to_string())
    }
}

impl From<serde_yaml::Error> for GoesError {
    fn from(err: serde_yaml::Error) -> Self {
        GoesError::Config(format!("YAML error: {}", err))
    }
}
