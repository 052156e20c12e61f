//! Remote catalog matching.
//!
//! For every partition key the listing directory of each requested product
//! stream is read, and objects are kept when the filename prefix, a band or
//! product token and the scan time all match.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use goes_common::product::band_from_filename;
use goes_common::{parse_scan_time, GoesResult, PartitionKey, ProductRequest, ProductStream, Scene, TimeWindow};

use crate::object_store::{ObjectStorage, RemoteObject};

/// Listings issued concurrently.
const LISTING_CONCURRENCY: usize = 8;

/// A remote file selected for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub remote_path: String,
    /// e.g. `ABI-L2-CMIPC`, `GLM-L2-LCFA`
    pub product_code: String,
    /// `C02` for ABI bands, the product token for others
    pub band_or_product_id: String,
    /// Scan start, to the second
    pub scan_time: DateTime<Utc>,
    pub size_bytes: u64,
}

impl CatalogEntry {
    /// Final path segment; used as the local file name.
    pub fn file_name(&self) -> &str {
        self.remote_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.remote_path)
    }
}

/// Keep the objects of one listing that belong to `stream` and fall in `window`.
pub fn filter_listing(
    objects: &[RemoteObject],
    stream: &ProductStream,
    window: &TimeWindow,
) -> Vec<CatalogEntry> {
    objects
        .iter()
        .filter_map(|object| {
            let file_name = object.path.rsplit('/').next()?;
            if !file_name.starts_with(&stream.file_prefix) {
                return None;
            }
            let token = stream.tokens.iter().find(|t| object.path.contains(t.as_str()))?;
            let scan_time = parse_scan_time(&object.path)?;
            if !window.contains(&scan_time) {
                return None;
            }

            let band_or_product_id = band_from_filename(file_name)
                .map(|band| format!("C{:02}", band))
                .unwrap_or_else(|| token.clone());

            Some(CatalogEntry {
                remote_path: object.path.clone(),
                product_code: stream.product_code.clone(),
                band_or_product_id,
                scan_time,
                size_bytes: object.size_bytes,
            })
        })
        .collect()
}

/// Matched entries, unique by remote path and ordered by it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchedCatalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl MatchedCatalog {
    pub fn insert(&mut self, entry: CatalogEntry) {
        self.entries.insert(entry.remote_path.clone(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn get(&self, remote_path: &str) -> Option<&CatalogEntry> {
        self.entries.get(remote_path)
    }

    /// Sum of listed object sizes.
    pub fn total_size_bytes(&self) -> u64 {
        self.entries.values().map(|e| e.size_bytes).sum()
    }

    pub fn into_entries(self) -> Vec<CatalogEntry> {
        self.entries.into_values().collect()
    }
}

/// Lists a satellite bucket and matches it against a request.
pub struct CatalogMatcher {
    storage: ObjectStorage,
}

impl CatalogMatcher {
    pub fn new(storage: ObjectStorage) -> Self {
        Self { storage }
    }

    /// Every object under `keys` that matches `request` for `scene` within `window`.
    ///
    /// A listing failure aborts the match.
    #[instrument(skip_all, fields(bucket = %self.storage.bucket(), scene = %scene, window = %window))]
    pub async fn match_entries(
        &self,
        keys: &[PartitionKey],
        request: &ProductRequest,
        scene: &Scene,
        window: &TimeWindow,
    ) -> GoesResult<MatchedCatalog> {
        let streams = request.streams(scene);
        let listings: Vec<(&ProductStream, PartitionKey)> = streams
            .iter()
            .flat_map(|s| keys.iter().map(move |k| (s, *k)))
            .collect();

        let batches: Vec<Vec<CatalogEntry>> = stream::iter(listings)
            .map(|(product, key)| async move {
                let prefix = key.prefix(&product.root);
                let objects = self.storage.list_partition(&prefix).await?;
                let matched = filter_listing(&objects, product, window);
                debug!(
                    prefix = %prefix,
                    listed = objects.len(),
                    matched = matched.len(),
                    "Filtered partition"
                );
                GoesResult::Ok(matched)
            })
            .buffer_unordered(LISTING_CONCURRENCY)
            .try_collect()
            .await?;

        let mut catalog = MatchedCatalog::default();
        for entry in batches.into_iter().flatten() {
            catalog.insert(entry);
        }

        info!(
            files = catalog.len(),
            bytes = catalog.total_size_bytes(),
            "Catalog match complete"
        );
        Ok(catalog)
    }
}
