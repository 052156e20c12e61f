//! Error types for NetCDF reading and rewriting.

use goes_common::GoesError;
use grid_processor::GridProcessorError;
use thiserror::Error;

/// Result type for NetCDF parser operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF operations.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reported by libnetcdf/HDF5
    #[error("NetCDF library error: {0}")]
    Library(#[from] netcdf::Error),

    /// Missing required variable or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Selection or mask does not fit the variable being rewritten
    #[error("Grid error: {0}")]
    Grid(#[from] GridProcessorError),
}

impl From<NetCdfError> for GoesError {
    fn from(err: NetCdfError) -> Self {
        match err {
            NetCdfError::IoError(e) => GoesError::Internal(e.to_string()),
            other => GoesError::NetCdf(other.to_string()),
        }
    }
}
