//! Spatial subsetting of GOES fixed-grid data.
//!
//! ```text
//! x, y scan angles ──► GeoGrid (projection) ──► select(grid, bbox)
//!                                                   │
//!                                   ┌───────────────┴──────────────┐
//!                                   ▼                              ▼
//!                      Selection (rows/cols kept)      DomainMask (strict interior)
//!                                   │                              │
//!                                   │        apply_mask(data) ◄────┘
//!                                   └──────► crop / slice_axes
//! ```

pub mod error;
pub mod slice;
pub mod subset;

pub use error::{GridProcessorError, Result};
pub use slice::slice_axes;
pub use subset::{apply_mask, apply_mask_axes, crop, select, DomainMask, Selection};
