//! Object storage interface for the public NOAA GOES buckets.

use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use futures::StreamExt;
use object_store::{aws::AmazonS3Builder, path::Path, ObjectStore};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

use goes_common::{GoesError, GoesResult, Satellite};

/// Region hosting the NOAA open-data buckets.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Suffix of a download in progress.
const PARTIAL_SUFFIX: &str = ".partial";

/// Configuration for object storage connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStorageConfig {
    /// Bucket name
    pub bucket: String,
    /// AWS region
    pub region: String,
    /// Custom endpoint (S3-compatible mirrors); `None` for AWS
    pub endpoint: Option<String>,
}

impl ObjectStorageConfig {
    /// Anonymous access to a satellite's public bucket.
    pub fn for_satellite(satellite: Satellite) -> Self {
        Self {
            bucket: satellite.bucket().to_string(),
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
        }
    }
}

/// One object returned by a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObject {
    pub path: String,
    pub size_bytes: u64,
}

/// Object storage client for GOES data.
#[derive(Clone)]
pub struct ObjectStorage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl ObjectStorage {
    /// Create an unsigned (anonymous) S3 client from config.
    pub fn new(config: &ObjectStorageConfig) -> GoesResult<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .with_skip_signature(true);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.with_endpoint(endpoint).with_allow_http(true);
        }

        let store = builder
            .build()
            .map_err(|e| GoesError::Storage(format!("Failed to create S3 client: {}", e)))?;

        Ok(Self {
            store: Arc::new(store),
            bucket: config.bucket.clone(),
        })
    }

    /// Wrap an existing store (used with `InMemory` in tests).
    pub fn from_store(store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// List the objects directly under `prefix`. A missing prefix lists as empty.
    #[instrument(skip(self), fields(bucket = %self.bucket))]
    pub async fn list_partition(&self, prefix: &str) -> GoesResult<Vec<RemoteObject>> {
        let prefix_path = Path::from(prefix);

        let listing = self
            .store
            .list_with_delimiter(Some(&prefix_path))
            .await
            .map_err(|e| GoesError::Storage(format!("List of {} failed: {}", prefix, e)))?;

        let objects: Vec<RemoteObject> = listing
            .objects
            .into_iter()
            .map(|meta| RemoteObject {
                path: meta.location.to_string(),
                size_bytes: meta.size as u64,
            })
            .collect();

        debug!(count = objects.len(), "Listed partition");
        Ok(objects)
    }

    /// Stream an object to `dest` through `dest.partial`.
    ///
    /// Returns the number of bytes written. On failure the partial file is
    /// removed and `dest` is not created.
    #[instrument(skip(self, dest), fields(bucket = %self.bucket, path = %remote_path))]
    pub async fn fetch_to_file(&self, remote_path: &str, dest: &FsPath) -> GoesResult<u64> {
        let partial = partial_path(dest);

        match self.stream_to(remote_path, &partial).await {
            Ok(bytes) => {
                fs::rename(&partial, dest).await.map_err(|e| GoesError::Transfer {
                    path: remote_path.to_string(),
                    message: format!("rename to {} failed: {}", dest.display(), e),
                })?;
                info!(path = %dest.display(), bytes = bytes, "Download completed");
                Ok(bytes)
            }
            Err(e) => {
                fs::remove_file(&partial).await.ok();
                Err(e)
            }
        }
    }

    async fn stream_to(&self, remote_path: &str, partial: &FsPath) -> GoesResult<u64> {
        let transfer_error = |message: String| GoesError::Transfer {
            path: remote_path.to_string(),
            message,
        };

        let result = self
            .store
            .get(&Path::from(remote_path))
            .await
            .map_err(|e| transfer_error(e.to_string()))?;

        let mut file = fs::File::create(partial)
            .await
            .map_err(|e| transfer_error(format!("create {}: {}", partial.display(), e)))?;

        let mut stream = result.into_stream();
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| transfer_error(e.to_string()))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| transfer_error(e.to_string()))?;
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(|e| transfer_error(e.to_string()))?;
        file.sync_all().await.map_err(|e| transfer_error(e.to_string()))?;
        Ok(written)
    }
}

/// `dest` with `.partial` appended to the file name.
pub fn partial_path(dest: &FsPath) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}
