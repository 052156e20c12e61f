//! Download GOES imagery for a time range.
//!
//! Usage:
//!   get-goes 2020-05-23/1200 2020-05-24/0300 -p ./satellite -b 2,5,10 -d MW
//!   get-goes 2020-05-23/1200 2020-05-23/1300 -b all -g -y

use std::io;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{info, warn};

use downloader::cli::{exit_on_request_error, init_tracing, parse_or_exit, GetGoesArgs};
use downloader::gridsat::{GridSatClient, GRIDSAT_BASE_URL};
use downloader::prompt::{confirm_download, print_goodbye};
use downloader::{Archive, FetchPlan, Orchestrator, Tables, WorkerPool};
use netcdf_parser::silence_hdf5_errors;
use storage::{CatalogMatcher, ObjectStorage, ObjectStorageConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args: GetGoesArgs = parse_or_exit();
    init_tracing(&args.logging)?;
    silence_hdf5_errors();

    let tables = exit_on_request_error(Tables::load(&args.config_dir))?;
    let plan = exit_on_request_error(FetchPlan::from_args(&args, &tables.domains))?;
    let cwd = std::env::current_dir().context("Failed to read current directory")?;

    let report = match &plan.archive {
        Archive::Unsupported => {
            warn!(window = %plan.window, "Window straddles the GOES-N and GOES-R archives");
            println!("Dates straddling GOES-N and GOES-R data are not supported.");
            return Ok(());
        }
        Archive::GridSat => {
            let dir = plan.prepare_output_dir(&cwd, Local::now().naive_local())?;
            let client = GridSatClient::new(GRIDSAT_BASE_URL)?;
            client.fetch_window(&plan.window, &dir, args.max_concurrent).await
        }
        Archive::GoesR { scene, request } => {
            let storage = ObjectStorage::new(&ObjectStorageConfig::for_satellite(scene.satellite))?;
            info!(bucket = %storage.bucket(), scene = %scene, window = %plan.window, "Querying archive");

            let catalog = CatalogMatcher::new(storage.clone())
                .match_entries(&plan.window.partition_keys(), request, scene, &plan.window)
                .await?;

            if !args.yes {
                let proceed = confirm_download(
                    io::stdin().lock(),
                    io::stdout(),
                    catalog.len(),
                    catalog.total_size_bytes(),
                )?;
                if !proceed {
                    print_goodbye(io::stdout())?;
                    return Ok(());
                }
            }

            let dir = plan.prepare_output_dir(&cwd, Local::now().naive_local())?;
            Orchestrator::new(storage, WorkerPool::new(args.max_concurrent), tables.bands, dir)
                .with_domain(plan.domain)
                .run(catalog.into_entries())
                .await
        }
    };

    report.log_summary();
    Ok(())
}
