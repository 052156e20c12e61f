//! Band wavelength correction.
//!
//! Archive files sometimes publish a `band_wavelength` a few hundredths of a
//! micrometer away from the value display systems expect, which stops them
//! from decoding the file. The correction rewrites that one value.

use std::fs;
use std::path::Path;

use goes_common::BandTable;
use netcdf_parser::{read_band_info, write_band_wavelength};
use tracing::{debug, info};

use crate::error::Result;
use crate::rewrite::replace_via_temp;

/// What happened to a file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WavelengthFix {
    /// `band_wavelength` was rewritten.
    Corrected { band: u8, from: f32, to: f32 },
    /// Already matches the table; the file was not touched.
    AlreadyCorrect { band: u8 },
    /// No band variables, or a band the table does not cover.
    NotApplicable,
}

/// Correct `band_wavelength` in place when it disagrees with `table`.
///
/// Idempotent: a second run reports [`WavelengthFix::AlreadyCorrect`] and
/// leaves the file alone.
pub fn fix_band_wavelength(path: &Path, table: &BandTable) -> Result<WavelengthFix> {
    let Some(info) = read_band_info(path)? else {
        debug!(path = %path.display(), "No band information, skipping wavelength check");
        return Ok(WavelengthFix::NotApplicable);
    };

    let Some(expected) = table.expected(info.band_id) else {
        debug!(path = %path.display(), band = info.band_id, "Band not in wavelength table");
        return Ok(WavelengthFix::NotApplicable);
    };

    if table.matches(info.band_id, info.wavelength) {
        return Ok(WavelengthFix::AlreadyCorrect { band: info.band_id });
    }

    info!(
        path = %path.display(),
        band = info.band_id,
        from_um = info.wavelength,
        to_um = expected,
        "Changing band_wavelength"
    );

    replace_via_temp(path, |temp| {
        fs::copy(path, temp)?;
        write_band_wavelength(temp, expected)?;
        Ok(())
    })?;

    Ok(WavelengthFix::Corrected {
        band: info.band_id,
        from: info.wavelength,
        to: expected,
    })
}
