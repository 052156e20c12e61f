//! Read and rewrite synthetic fixed-grid files.

use goes_common::BoundingBox;
use grid_processor::select;
use netcdf_parser::{
    has_fixed_grid, read_band_info, write_band_wavelength, write_subset, FixedGridFile, SubsetSpec,
    COL_DIM, ROW_DIM,
};
use projection::GeoGrid;
use test_utils::{
    assert_approx_eq, cmi_value, temp_test_dir, write_goes_fixture, GoesFileFixture, CMI_FILL,
    CONUS_COARSE, NADIR_5X5,
};

#[test]
fn test_open_decodes_scan_angles() {
    let dir = temp_test_dir();
    let path = dir.path().join("OR_fixture.nc");
    write_goes_fixture(&path, &GoesFileFixture::new(CONUS_COARSE)).unwrap();

    let file = FixedGridFile::open(&path).unwrap();
    assert_eq!(file.shape(), (CONUS_COARSE.ny, CONUS_COARSE.nx));
    assert_eq!(file.layout.dims, vec!["y", "x"]);
    assert_eq!((file.layout.row_axis, file.layout.col_axis), (0, 1));

    for (decoded, expected) in file.x.iter().zip(CONUS_COARSE.x_axis()) {
        assert_approx_eq!(*decoded, expected, 1e-6);
    }
    for (decoded, expected) in file.y.iter().zip(CONUS_COARSE.y_axis()) {
        assert_approx_eq!(*decoded, expected, 1e-6);
    }

    assert_approx_eq!(file.projection.longitude_origin, -75.0, 1e-12);
    assert_approx_eq!(file.geostationary().nadir_longitude(), -75.0, 1e-9);
}

#[test]
fn test_axes_resolved_by_dimension_name() {
    let dir = temp_test_dir();
    let path = dir.path().join("OR_transposed.nc");
    write_goes_fixture(&path, &GoesFileFixture::new(NADIR_5X5).transposed()).unwrap();

    let file = FixedGridFile::open(&path).unwrap();
    assert_eq!(file.layout.dims, vec!["x", "y"]);
    assert_eq!((file.layout.row_axis, file.layout.col_axis), (1, 0));
}

#[test]
fn test_band_info() {
    let dir = temp_test_dir();
    let path = dir.path().join("OR_band.nc");
    write_goes_fixture(&path, &GoesFileFixture::new(NADIR_5X5).band(7, 3.89)).unwrap();

    let info = read_band_info(&path).unwrap().unwrap();
    assert_eq!(info.band_id, 7);
    assert_approx_eq!(info.wavelength, 3.89, 1e-6);
    assert!(has_fixed_grid(&path, "CMI").unwrap());
    assert!(!has_fixed_grid(&path, "flash_lat").unwrap());
}

#[test]
fn test_write_band_wavelength() {
    let dir = temp_test_dir();
    let path = dir.path().join("OR_wavelength.nc");
    write_goes_fixture(&path, &GoesFileFixture::new(NADIR_5X5).band(13, 10.33)).unwrap();

    write_band_wavelength(&path, 10.35).unwrap();

    let info = read_band_info(&path).unwrap().unwrap();
    assert_eq!(info.band_id, 13);
    assert_approx_eq!(info.wavelength, 10.35, 1e-6);
}

#[test]
fn test_write_subset_crops_and_masks() {
    let dir = temp_test_dir();
    let src = dir.path().join("OR_src.nc");
    let dst = dir.path().join("OR_src.nc.temp");
    write_goes_fixture(&src, &GoesFileFixture::new(CONUS_COARSE)).unwrap();

    let file = FixedGridFile::open(&src).unwrap();
    let grid = GeoGrid::from_scan_angles(&file.geostationary(), &file.x, &file.y);
    let bbox = BoundingBox::new(-100.0, 35.0, -90.0, 42.0).unwrap();
    let (selection, mask) = select(&grid, &bbox);
    assert!(!selection.is_empty());

    let summary = write_subset(
        &src,
        &dst,
        &SubsetSpec {
            row_dim: ROW_DIM,
            col_dim: COL_DIM,
            selection: &selection,
            masked_variable: "CMI",
            mask: &mask,
        },
    )
    .unwrap();
    assert_eq!(summary.shape, selection.shape());
    assert_eq!(summary.masked_samples, mask.outside_count());
    assert!(summary.skipped.is_empty());

    let out = netcdf::open(&dst).unwrap();
    assert_eq!(out.dimension("y").unwrap().len(), selection.rows.len());
    assert_eq!(out.dimension("x").unwrap().len(), selection.cols.len());
    assert_eq!(out.dimension("band").unwrap().len(), 1);

    let cmi: Vec<i16> = out.variable("CMI").unwrap().get_values(..).unwrap();
    let ncols = selection.cols.len();
    for (i, value) in cmi.iter().enumerate() {
        let row = selection.rows[i / ncols];
        let col = selection.cols[i % ncols];
        if mask.is_inside(row, col) {
            assert_eq!(*value, cmi_value(row, col));
        } else {
            assert_eq!(*value, CMI_FILL);
        }
    }

    // Cropped axes keep their packing and the selected values
    let reopened = FixedGridFile::open(&dst).unwrap();
    for (k, &col) in selection.cols.iter().enumerate() {
        assert_approx_eq!(reopened.x[k], file.x[col], 1e-9);
    }
    for (k, &row) in selection.rows.iter().enumerate() {
        assert_approx_eq!(reopened.y[k], file.y[row], 1e-9);
    }
    assert_eq!(reopened.band, file.band);
}

#[test]
fn test_write_subset_with_empty_selection() {
    let dir = temp_test_dir();
    let src = dir.path().join("OR_src.nc");
    let dst = dir.path().join("OR_src.nc.temp");
    write_goes_fixture(&src, &GoesFileFixture::new(CONUS_COARSE)).unwrap();

    let file = FixedGridFile::open(&src).unwrap();
    let grid = GeoGrid::from_scan_angles(&file.geostationary(), &file.x, &file.y);
    let bbox = BoundingBox::new(60.0, -40.0, 90.0, -20.0).unwrap();
    let (selection, mask) = select(&grid, &bbox);
    assert!(selection.is_empty());

    let summary = write_subset(
        &src,
        &dst,
        &SubsetSpec {
            row_dim: ROW_DIM,
            col_dim: COL_DIM,
            selection: &selection,
            masked_variable: "CMI",
            mask: &mask,
        },
    )
    .unwrap();
    assert_eq!(summary.shape, (0, 0));
    assert_eq!(summary.masked_samples, CONUS_COARSE.len());

    let out = netcdf::open(&dst).unwrap();
    assert_eq!(out.dimension("y").unwrap().len(), 0);
    assert_eq!(out.dimension("x").unwrap().len(), 0);
    assert!(out.variable("CMI").is_some());
}
