//! Crop GOES fixed-grid files to a domain, in place.
//!
//! Usage:
//!   domain-reduce -d MW -f OR_ABI-L2-CMIPC-M6C13_G16_s20201441201169_e..._c....nc
//!   domain-reduce --dbox '-105 35 -82 49.5' -p ./satellite

use anyhow::Result;
use tracing::info;

use corrections::{reduce_domain, run_batch};
use downloader::cli::{exit_on_request_error, init_tracing, parse_or_exit, DomainReduceArgs};
use goes_common::DomainTable;
use netcdf_parser::silence_hdf5_errors;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args: DomainReduceArgs = parse_or_exit();
    init_tracing(&args.logging)?;
    silence_hdf5_errors();

    let domains = exit_on_request_error(DomainTable::load(&args.config_dir))?;
    let bbox = exit_on_request_error(args.domain.require(&domains))?;
    let target = exit_on_request_error(args.target.target())?;
    let files = target.files()?;

    info!(files = files.len(), bbox = %bbox, "Reducing domain");
    let outcome = run_batch(&files, |path| reduce_domain(path, &bbox));
    info!(
        succeeded = outcome.succeeded,
        failed = outcome.failed.len(),
        "Domain reduction complete"
    );
    Ok(())
}
