//! End-to-end batches against an in-memory bucket.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{TimeZone, Utc};
use object_store::{memory::InMemory, path::Path, ObjectStore};

use corrections::{DomainReduction, WavelengthFix};
use downloader::{Orchestrator, WorkerPool};
use goes_common::{BandSelection, BandTable, BoundingBox, ProductRequest, Scene, TimeWindow};
use netcdf_parser::{read_band_info, FixedGridFile};
use storage::{CatalogEntry, CatalogMatcher, ObjectStorage};
use test_utils::{
    abi_object_path, assert_approx_eq, bbox, temp_test_dir, write_goes_fixture, GoesFileFixture,
    CONUS_COARSE,
};

/// Upload one synthetic band-13 file and return the storage and its remote path.
async fn bucket_with_fixture() -> (ObjectStorage, String) {
    let scratch = temp_test_dir();
    let local = scratch.path().join("fixture.nc");
    write_goes_fixture(&local, &GoesFileFixture::new(CONUS_COARSE).band(13, 10.33)).unwrap();
    let content = std::fs::read(&local).unwrap();

    let scan = Utc.with_ymd_and_hms(2020, 5, 23, 12, 1, 16).unwrap();
    let remote = abi_object_path("C", "M6", 13, "G16", &scan);

    let store = Arc::new(InMemory::new());
    store
        .put(&Path::from(remote.as_str()), Bytes::from(content).into())
        .await
        .unwrap();
    (ObjectStorage::from_store(store, "noaa-goes16"), remote)
}

fn midwest() -> BoundingBox {
    let (w, s, e, n) = bbox::MIDWEST;
    BoundingBox::new(w, s, e, n).unwrap()
}

#[tokio::test]
async fn test_download_corrects_and_reduces() {
    let (storage, remote) = bucket_with_fixture().await;
    let window = TimeWindow::parse("2020-05-23/1200", "2020-05-23/1205").unwrap();
    let request = ProductRequest::new(Some(BandSelection::parse("13").unwrap()), false).unwrap();

    let catalog = CatalogMatcher::new(storage.clone())
        .match_entries(&window.partition_keys(), &request, &Scene::default(), &window)
        .await
        .unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.get(&remote).is_some());

    let out = temp_test_dir();
    let report = Orchestrator::new(storage, WorkerPool::new(2), BandTable::builtin(), out.path().to_path_buf())
        .with_domain(Some(midwest()))
        .run(catalog.into_entries())
        .await;

    assert!(report.failed.is_empty(), "{:?}", report.failed);
    assert_eq!(report.succeeded.len(), 1);
    let unit = &report.succeeded[0];
    assert!(matches!(unit.wavelength, Some(WavelengthFix::Corrected { band: 13, .. })));
    let Some(DomainReduction::Reduced { rows, cols, .. }) = unit.domain else {
        panic!("expected a domain reduction, got {:?}", unit.domain);
    };

    let local = out.path().join(&unit.file_name);
    let info = read_band_info(&local).unwrap().unwrap();
    assert_approx_eq!(info.wavelength, 10.35, 1e-6);
    assert_eq!(FixedGridFile::open(&local).unwrap().shape(), (rows, cols));
    assert!(rows < CONUS_COARSE.ny && cols < CONUS_COARSE.nx);
}

#[tokio::test]
async fn test_failed_unit_does_not_stop_siblings() {
    let (storage, remote) = bucket_with_fixture().await;
    let scan_time = Utc.with_ymd_and_hms(2020, 5, 23, 12, 1, 16).unwrap();
    let good = CatalogEntry {
        remote_path: remote,
        product_code: "ABI-L2-CMIPC".to_string(),
        band_or_product_id: "C13".to_string(),
        scan_time,
        size_bytes: 0,
    };
    let missing = CatalogEntry {
        remote_path: "ABI-L2-CMIPC/2020/144/12/OR_ABI-L2-CMIPC-M6C02_G16_s20201441201169_e1_c1.nc"
            .to_string(),
        band_or_product_id: "C02".to_string(),
        ..good.clone()
    };

    let out = temp_test_dir();
    let report = Orchestrator::new(storage, WorkerPool::new(1), BandTable::builtin(), out.path().to_path_buf())
        .run(vec![missing, good])
        .await;

    assert_eq!(report.total(), 2);
    assert_eq!(report.succeeded.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.contains("M6C02"));
    assert_eq!(report.succeeded[0].domain, None);
    assert!(!out.path().join(&report.failed[0].0).exists());
}
