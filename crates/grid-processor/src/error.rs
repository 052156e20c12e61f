//! Error types for grid processing.

use thiserror::Error;

/// Errors that can occur while selecting, masking or slicing a grid.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GridProcessorError {
    /// Data length does not match the declared shape.
    #[error("data has {actual} values but shape {shape:?} needs {expected}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    /// Mask and data disagree on the grid size.
    #[error("mask covers {mask} samples but data has {data}")]
    MaskMismatch { mask: usize, data: usize },

    /// One index list per axis is required.
    #[error("expected {expected} axis selections, got {actual}")]
    AxisCount { expected: usize, actual: usize },

    /// A kept index is past the end of its axis.
    #[error("index {index} out of range for axis {axis} of length {len}")]
    IndexOutOfRange { axis: usize, index: usize, len: usize },
}

/// Result type for grid processor operations.
pub type Result<T> = std::result::Result<T, GridProcessorError>;
