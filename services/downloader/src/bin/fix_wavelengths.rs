//! Set `band_wavelength` in GOES files to the value display systems expect.
//!
//! Usage:
//!   fix-wavelengths -f OR_ABI-L2-CMIPC-M6C13_G16_s20201441201169_e..._c....nc
//!   fix-wavelengths -p ./satellite

use anyhow::Result;
use tracing::info;

use corrections::{fix_band_wavelength, run_batch};
use downloader::cli::{exit_on_request_error, init_tracing, parse_or_exit, FixWavelengthsArgs};
use goes_common::BandTable;
use netcdf_parser::silence_hdf5_errors;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args: FixWavelengthsArgs = parse_or_exit();
    init_tracing(&args.logging)?;
    silence_hdf5_errors();

    let bands = exit_on_request_error(BandTable::load(&args.config_dir))?;
    let target = exit_on_request_error(args.target.target())?;
    let files = target.files()?;

    info!(files = files.len(), "Checking band wavelengths");
    let outcome = run_batch(&files, |path| fix_band_wavelength(path, &bands));
    info!(
        succeeded = outcome.succeeded,
        failed = outcome.failed.len(),
        "Wavelength check complete"
    );
    Ok(())
}
