//! Catalog matching and downloads against an in-memory bucket.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Duration, TimeZone, Utc};
use object_store::{memory::InMemory, path::Path, ObjectStore};

use goes_common::{BandSelection, GoesError, ProductRequest, Scene, TimeWindow};
use storage::object_store::partial_path;
use storage::{CatalogMatcher, ObjectStorage};
use test_utils::{abi_object_path, glm_object_path, temp_test_dir};

fn scan(h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 5, 23, h, m, s).unwrap()
}

async fn bucket_with(paths: &[(String, usize)]) -> ObjectStorage {
    let store = Arc::new(InMemory::new());
    for (path, size) in paths {
        store
            .put(&Path::from(path.as_str()), Bytes::from(vec![0u8; *size]).into())
            .await
            .unwrap();
    }
    ObjectStorage::from_store(store, "noaa-goes16")
}

fn abi_request(bands: &str, glm: bool) -> ProductRequest {
    ProductRequest::new(Some(BandSelection::parse(bands).unwrap()), glm).unwrap()
}

#[tokio::test]
async fn test_five_minute_window_bands_2_and_5() {
    let mut objects = Vec::new();
    for minute in [0, 1, 6, 11] {
        for band in [2u8, 5, 13] {
            objects.push((abi_object_path("C", "M6", band, "G16", &scan(12, minute, 16)), 1_000));
        }
    }
    // Mesoscale files live under a different root and never match a CONUS request
    objects.push((abi_object_path("M1", "M6", 2, "G16", &scan(12, 1, 0)), 1_000));
    let storage = bucket_with(&objects).await;

    let window = TimeWindow::parse("2020-05-23/1200", "2020-05-23/1205").unwrap();
    let keys = window.partition_keys();
    assert_eq!(keys.len(), 1);
    assert_eq!((keys[0].year, keys[0].day_of_year, keys[0].hour), (2020, 144, 12));

    let catalog = CatalogMatcher::new(storage)
        .match_entries(&keys, &abi_request("2,5", false), &Scene::default(), &window)
        .await
        .unwrap();

    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.total_size_bytes(), 4_000);
    let mut ids: Vec<_> = catalog.iter().map(|e| e.band_or_product_id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["C02", "C02", "C05", "C05"]);
    for entry in catalog.iter() {
        assert!(window.contains(&entry.scan_time));
        assert!(entry.file_name().starts_with("OR_ABI-L2-CMIPC-"));
    }
}

#[tokio::test]
async fn test_window_spanning_hours_lists_both_partitions() {
    let objects = vec![
        (abi_object_path("C", "M6", 13, "G16", &scan(11, 58, 0)), 10),
        (abi_object_path("C", "M6", 13, "G16", &scan(12, 1, 0)), 10),
        (abi_object_path("C", "M6", 13, "G16", &scan(12, 6, 0)), 10),
    ];
    let storage = bucket_with(&objects).await;

    let window = TimeWindow::parse("2020-05-23/1158", "2020-05-23/1202").unwrap();
    let catalog = CatalogMatcher::new(storage)
        .match_entries(&window.partition_keys(), &abi_request("13", false), &Scene::default(), &window)
        .await
        .unwrap();

    let times: Vec<_> = catalog.iter().map(|e| e.scan_time).collect();
    assert_eq!(times.len(), 2);
    assert!(times.contains(&scan(11, 58, 0)));
    assert!(times.contains(&scan(12, 1, 0)));
}

#[tokio::test]
async fn test_glm_and_abi_together() {
    let objects = vec![
        (abi_object_path("C", "M3", 2, "G16", &scan(12, 2, 0)), 100),
        (glm_object_path("G16", &scan(12, 0, 0)), 7),
        (glm_object_path("G16", &scan(12, 0, 20)), 7),
        (glm_object_path("G16", &scan(12, 30, 0)), 7),
    ];
    let storage = bucket_with(&objects).await;

    let window = TimeWindow::parse("2020-05-23/1200", "2020-05-23/1205").unwrap();
    let catalog = CatalogMatcher::new(storage)
        .match_entries(&window.partition_keys(), &abi_request("2", true), &Scene::default(), &window)
        .await
        .unwrap();

    assert_eq!(catalog.len(), 3);
    let glm: Vec<_> = catalog
        .iter()
        .filter(|e| e.product_code == "GLM-L2-LCFA")
        .collect();
    assert_eq!(glm.len(), 2);
    assert!(glm.iter().all(|e| e.band_or_product_id == "LCFA"));
}

#[tokio::test]
async fn test_path_matching_two_tokens_appears_once() {
    // Contains both M3C02 and M6C02
    let path = format!(
        "ABI-L2-CMIPC/2020/144/12/OR_ABI-L2-CMIPC-M6C02_M3C02_G16_s{}_e1_c1.nc",
        "20201441201000"
    );
    let storage = bucket_with(&[(path.clone(), 42)]).await;

    let window = TimeWindow::parse("2020-05-23/1200", "2020-05-23/1205").unwrap();
    let catalog = CatalogMatcher::new(storage)
        .match_entries(&window.partition_keys(), &abi_request("2", false), &Scene::default(), &window)
        .await
        .unwrap();

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get(&path).unwrap().size_bytes, 42);
}

#[tokio::test]
async fn test_empty_partition_matches_nothing() {
    let storage = bucket_with(&[]).await;
    let window = TimeWindow::parse("2020-05-23/1200", "2020-05-23/1205").unwrap();
    let catalog = CatalogMatcher::new(storage)
        .match_entries(&window.partition_keys(), &abi_request("all", true), &Scene::default(), &window)
        .await
        .unwrap();
    assert!(catalog.is_empty());
    assert_eq!(catalog.total_size_bytes(), 0);
}

#[tokio::test]
async fn test_fetch_to_file() {
    let path = abi_object_path("C", "M6", 2, "G16", &(scan(12, 1, 0) + Duration::seconds(1)));
    let storage = bucket_with(&[(path.clone(), 4096)]).await;
    let dir = temp_test_dir();
    let dest = dir.path().join("OR_file.nc");

    let bytes = storage.fetch_to_file(&path, &dest).await.unwrap();
    assert_eq!(bytes, 4096);
    assert_eq!(std::fs::metadata(&dest).unwrap().len(), 4096);
    assert!(!partial_path(&dest).exists());
}

#[tokio::test]
async fn test_fetch_missing_object_leaves_nothing() {
    let storage = bucket_with(&[]).await;
    let dir = temp_test_dir();
    let dest = dir.path().join("OR_missing.nc");

    let result = storage.fetch_to_file("ABI-L2-CMIPC/2020/144/12/OR_missing.nc", &dest).await;
    assert!(matches!(result, Err(GoesError::Transfer { .. })));
    assert!(!dest.exists());
    assert!(!partial_path(&dest).exists());
}
