//! Acquisition orchestrator.
//!
//! Each catalog entry is an independent unit: download, then wavelength
//! correction, then optional domain reduction. Units run concurrently up to
//! the pool size; a failed unit is recorded and its siblings continue.

use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use futures::FutureExt;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tracing::{error, info, instrument};

use corrections::{fix_band_wavelength, reduce_domain, DomainReduction, WavelengthFix};
use goes_common::{BandTable, BoundingBox};
use storage::{CatalogEntry, ObjectStorage};

use crate::config::DEFAULT_MAX_CONCURRENT;

/// Bounds the number of units in flight.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    size: usize,
}

impl WorkerPool {
    /// A pool of `size` slots (at least one).
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            permits: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    async fn acquire(&self) -> Result<OwnedSemaphorePermit> {
        self.permits
            .clone()
            .acquire_owned()
            .await
            .context("worker pool closed")
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENT)
    }
}

/// A completed unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitReport {
    pub file_name: String,
    pub bytes: u64,
    /// `None` when the file is not subject to correction (GridSat)
    pub wavelength: Option<WavelengthFix>,
    pub domain: Option<DomainReduction>,
}

/// Outcome of a whole batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<UnitReport>,
    /// (file name, error)
    pub failed: Vec<(String, String)>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn total_bytes(&self) -> u64 {
        self.succeeded.iter().map(|u| u.bytes).sum()
    }

    pub fn log_summary(&self) {
        info!(
            succeeded = self.succeeded.len(),
            failed = self.failed.len(),
            bytes = self.total_bytes(),
            elapsed_secs = self.elapsed.as_secs(),
            "Download took {} minutes",
            self.elapsed.as_secs() / 60
        );
        for (file, reason) in &self.failed {
            error!(file = %file, error = %reason, "Unit failed");
        }
    }
}

/// Everything a unit needs, cloned into each task.
#[derive(Clone)]
struct UnitContext {
    storage: ObjectStorage,
    bands: Arc<BandTable>,
    domain: Option<BoundingBox>,
    output_dir: PathBuf,
}

/// Runs the download and correction units of one batch.
pub struct Orchestrator {
    context: UnitContext,
    pool: WorkerPool,
}

impl Orchestrator {
    pub fn new(storage: ObjectStorage, pool: WorkerPool, bands: BandTable, output_dir: PathBuf) -> Self {
        Self {
            context: UnitContext {
                storage,
                bands: Arc::new(bands),
                domain: None,
                output_dir,
            },
            pool,
        }
    }

    /// Crop every downloaded file to `domain`.
    pub fn with_domain(mut self, domain: Option<BoundingBox>) -> Self {
        self.context.domain = domain;
        self
    }

    /// Run every unit and wait for all of them. Consumes the orchestrator and
    /// its pool.
    pub async fn run(self, entries: Vec<CatalogEntry>) -> BatchReport {
        let started = Instant::now();
        info!(
            files = entries.len(),
            max_concurrent = self.pool.size(),
            "Starting downloads"
        );

        let mut tasks = JoinSet::new();
        for entry in entries {
            let context = self.context.clone();
            let pool = self.pool.clone();
            tasks.spawn(async move {
                let file_name = entry.file_name().to_string();
                let outcome = match pool.acquire().await {
                    Ok(_permit) => AssertUnwindSafe(process_unit(&context, &entry))
                        .catch_unwind()
                        .await
                        .unwrap_or_else(|_| Err(anyhow!("unit panicked"))),
                    Err(e) => Err(e),
                };
                (file_name, outcome)
            });
        }

        let mut report = BatchReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(unit))) => report.succeeded.push(unit),
                Ok((file_name, Err(e))) => {
                    error!(file = %file_name, error = %e, "Failed to process file");
                    report.failed.push((file_name, format!("{:#}", e)));
                }
                Err(e) => {
                    error!(error = %e, "Unit task aborted");
                    report.failed.push(("<unknown>".to_string(), e.to_string()));
                }
            }
        }

        report.elapsed = started.elapsed();
        report
    }
}

#[instrument(skip_all, fields(file = %entry.file_name()))]
async fn process_unit(context: &UnitContext, entry: &CatalogEntry) -> Result<UnitReport> {
    let dest = context.output_dir.join(entry.file_name());
    info!(path = %dest.display(), "Downloading");

    let bytes = context
        .storage
        .fetch_to_file(&entry.remote_path, &dest)
        .await?;

    let bands = context.bands.clone();
    let domain = context.domain;
    let path = dest.clone();
    let (wavelength, reduction) = tokio::task::spawn_blocking(move || {
        let wavelength = fix_band_wavelength(&path, &bands)?;
        let reduction = domain
            .map(|bbox| reduce_domain(&path, &bbox))
            .transpose()?;
        corrections::Result::Ok((wavelength, reduction))
    })
    .await
    .context("correction task failed")?
    .with_context(|| format!("correcting {}", dest.display()))?;

    Ok(UnitReport {
        file_name: entry.file_name().to_string(),
        bytes,
        wavelength: Some(wavelength),
        domain: reduction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_size_is_at_least_one() {
        assert_eq!(WorkerPool::new(0).size(), 1);
        assert_eq!(WorkerPool::default().size(), DEFAULT_MAX_CONCURRENT);
    }

    #[tokio::test]
    async fn test_pool_bounds_permits() {
        let pool = WorkerPool::new(2);
        let a = pool.acquire().await.unwrap();
        let _b = pool.acquire().await.unwrap();
        assert_eq!(pool.permits.available_permits(), 0);
        drop(a);
        assert_eq!(pool.permits.available_permits(), 1);
    }

    #[test]
    fn test_report_totals() {
        let report = BatchReport {
            succeeded: vec![UnitReport {
                file_name: "OR_a.nc".to_string(),
                bytes: 10,
                wavelength: None,
                domain: None,
            }],
            failed: vec![("OR_b.nc".to_string(), "boom".to_string())],
            elapsed: Duration::from_secs(1),
        };
        assert_eq!(report.total(), 2);
        assert_eq!(report.total_bytes(), 10);
    }
}
