//! NetCDF-4 access for GOES-R ABI fixed-grid products.
//!
//! Reads the geolocation content of Cloud and Moisture Imagery files
//! (packed `x`/`y` scan angles, `goes_imager_projection`, band identity) and
//! rewrites files cropped to a selection or with a corrected band wavelength.
//!
//! # GOES-R ABI Data Structure
//!
//! The main data variable is `CMI`, dimensioned `(y, x)`. Rows follow the
//! elevation angle `y` (north to south) and columns the scan angle `x`
//! (west to east). Axes are always located by dimension name.

pub mod error;
pub mod native;
pub mod projection;
pub mod reader;
pub mod writer;

pub use error::{NetCdfError, NetCdfResult};
pub use native::silence_hdf5_errors;
pub use projection::GoesProjection;
pub use reader::{
    has_fixed_grid, read_band_info, BandInfo, FixedGridFile, GridLayout, COL_DIM, DEFAULT_PRIMARY,
    ROW_DIM,
};
pub use writer::{write_band_wavelength, write_subset, SubsetSpec, SubsetSummary};
