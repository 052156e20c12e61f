//! GOES-N GridSat-CONUS archive (windows before 2017-03-01).
//!
//! Files are published every 15 minutes as
//! `{base}/{YYYY}/{mm}/GridSat-CONUS.goes13.YYYY.mm.dd.HHMM.v01.nc`.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration as ChronoDuration, Timelike, Utc};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, instrument};

use goes_common::TimeWindow;
use storage::object_store::partial_path;

use crate::orchestrator::{BatchReport, UnitReport};

pub const GRIDSAT_BASE_URL: &str = "https://www.ncei.noaa.gov/data/gridsat-goes/access/conus";

/// Minutes between GridSat files.
pub const GRIDSAT_STEP_MINUTES: i64 = 15;

/// One remote GridSat file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSatFile {
    pub url: String,
    pub file_name: String,
}

/// Every GridSat file inside the window, on the quarter-hour grid.
pub fn gridsat_files(base_url: &str, window: &TimeWindow) -> Vec<GridSatFile> {
    let mut cursor = ceil_to_step(window.start());
    let mut files = Vec::new();
    while cursor <= window.end() {
        let file_name = format!("GridSat-CONUS.goes13.{}.v01.nc", cursor.format("%Y.%m.%d.%H%M"));
        files.push(GridSatFile {
            url: format!(
                "{}/{}/{}",
                base_url.trim_end_matches('/'),
                cursor.format("%Y/%m"),
                file_name
            ),
            file_name,
        });
        cursor += ChronoDuration::minutes(GRIDSAT_STEP_MINUTES);
    }
    files
}

/// Round up to the next quarter hour (unchanged when already on one).
fn ceil_to_step(dt: DateTime<Utc>) -> DateTime<Utc> {
    let floored = dt
        - ChronoDuration::minutes(dt.minute() as i64 % GRIDSAT_STEP_MINUTES)
        - ChronoDuration::seconds(dt.second() as i64)
        - ChronoDuration::nanoseconds(dt.nanosecond() as i64);
    if floored == dt {
        dt
    } else {
        floored + ChronoDuration::minutes(GRIDSAT_STEP_MINUTES)
    }
}

/// HTTPS client for the GridSat archive.
pub struct GridSatClient {
    client: Client,
    base_url: String,
}

impl GridSatClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Download every file of the window into `dir`; failures are recorded and
    /// the rest continue.
    pub async fn fetch_window(&self, window: &TimeWindow, dir: &Path, max_concurrent: usize) -> BatchReport {
        let started = Instant::now();
        let files = gridsat_files(&self.base_url, window);
        info!(files = files.len(), "Starting GridSat downloads");

        let results: Vec<(String, Result<u64>)> = stream::iter(files)
            .map(|file| async move {
                let result = self.fetch(&file, dir).await;
                (file.file_name, result)
            })
            .buffer_unordered(max_concurrent.max(1))
            .collect()
            .await;

        let mut report = BatchReport::default();
        for (file_name, result) in results {
            match result {
                Ok(bytes) => report.succeeded.push(UnitReport {
                    file_name,
                    bytes,
                    wavelength: None,
                    domain: None,
                }),
                Err(e) => {
                    error!(file = %file_name, error = %e, "GridSat download failed");
                    report.failed.push((file_name, format!("{:#}", e)));
                }
            }
        }
        report.elapsed = started.elapsed();
        report
    }

    /// Stream one file to `{dir}/{file_name}` through a `.partial` file.
    #[instrument(skip(self, dir), fields(url = %file.url))]
    pub async fn fetch(&self, file: &GridSatFile, dir: &Path) -> Result<u64> {
        let dest = dir.join(&file.file_name);
        let partial = partial_path(&dest);

        let result = self.stream_to_file(&file.url, &partial).await;
        match result {
            Ok(bytes) => {
                fs::rename(&partial, &dest).await?;
                info!(path = %dest.display(), bytes = bytes, "Download completed");
                Ok(bytes)
            }
            Err(e) => {
                fs::remove_file(&partial).await.ok();
                Err(e)
            }
        }
    }

    async fn stream_to_file(&self, url: &str, path: &Path) -> Result<u64> {
        let response = self.client.get(url).send().await.context("HTTP request failed")?;
        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {}", response.status()));
        }

        let mut file = fs::File::create(path)
            .await
            .context("Failed to open output file")?;

        let mut stream = response.bytes_stream();
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.context("Error reading response chunk")?;
            file.write_all(&chunk).await.context("Error writing to file")?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        file.sync_all().await?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_hour_files() {
        let window = TimeWindow::parse("2016-01-31/2350", "2016-02-01/0030").unwrap();
        let files = gridsat_files(GRIDSAT_BASE_URL, &window);
        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "GridSat-CONUS.goes13.2016.02.01.0000.v01.nc",
                "GridSat-CONUS.goes13.2016.02.01.0015.v01.nc",
                "GridSat-CONUS.goes13.2016.02.01.0030.v01.nc",
            ]
        );
        assert_eq!(
            files[0].url,
            "https://www.ncei.noaa.gov/data/gridsat-goes/access/conus/2016/02/GridSat-CONUS.goes13.2016.02.01.0000.v01.nc"
        );
    }

    #[test]
    fn test_window_on_boundary_is_inclusive() {
        let window = TimeWindow::parse("2016-06-01/1215", "2016-06-01/1215").unwrap();
        assert_eq!(gridsat_files("http://mirror/", &window).len(), 1);
    }

    #[test]
    fn test_window_between_files_is_empty() {
        let window = TimeWindow::parse("2016-06-01/1201", "2016-06-01/1214").unwrap();
        assert!(gridsat_files(GRIDSAT_BASE_URL, &window).is_empty());
    }
}
