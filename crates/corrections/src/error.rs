//! Error types for the corrections crate.

use goes_common::GoesError;
use netcdf_parser::NetCdfError;
use thiserror::Error;

/// Errors that can occur while correcting a file.
#[derive(Error, Debug)]
pub enum CorrectionError {
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("NetCDF error: {0}")]
    NetCdf(#[from] NetCdfError),

    #[error("Failed to scan directory: {0}")]
    DirectoryScan(String),

    #[error("Not a file or directory: {0}")]
    InvalidTarget(String),
}

/// Result type for correction operations.
pub type Result<T> = std::result::Result<T, CorrectionError>;

impl From<CorrectionError> for GoesError {
    fn from(err: CorrectionError) -> Self {
        match err {
            CorrectionError::NetCdf(e) => e.into(),
            other => GoesError::Internal(other.to_string()),
        }
    }
}
