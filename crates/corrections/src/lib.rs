//! Post-download corrections applied to GOES files on disk.
//!
//! - [`wavelength`]: force `band_wavelength` to the expected value
//! - [`domain`]: crop a fixed-grid file to a bounding box
//!
//! Both rewrite the file through a `.temp` sibling and rename it over the
//! original.

pub mod batch;
pub mod domain;
pub mod error;
pub mod rewrite;
pub mod wavelength;

pub use batch::{run_batch, BatchOutcome, Target};
pub use domain::{reduce_domain, DomainReduction};
pub use error::{CorrectionError, Result};
pub use wavelength::{fix_band_wavelength, WavelengthFix};
