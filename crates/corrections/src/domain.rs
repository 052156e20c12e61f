//! Domain reduction: crop a fixed-grid file to a bounding box.

use std::path::Path;

use goes_common::BoundingBox;
use grid_processor::select;
use netcdf_parser::{has_fixed_grid, write_subset, FixedGridFile, SubsetSpec, COL_DIM, DEFAULT_PRIMARY, ROW_DIM};
use projection::GeoGrid;
use tracing::{info, warn};

use crate::error::Result;
use crate::rewrite::replace_via_temp;

/// What happened to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainReduction {
    Reduced {
        rows: usize,
        cols: usize,
        masked: usize,
    },
    /// The file has no `CMI` on a `(y, x)` grid (e.g. GLM); left untouched.
    NoFixedGrid,
}

/// Crop `path` to the rows/columns touching `bbox` and mask `CMI` outside it.
///
/// The file is rewritten through `path.temp`. A box that misses the sector
/// leaves a file with zero-length `y`/`x`.
pub fn reduce_domain(path: &Path, bbox: &BoundingBox) -> Result<DomainReduction> {
    if !has_fixed_grid(path, DEFAULT_PRIMARY)? {
        info!(path = %path.display(), "No fixed grid, skipping domain reduction");
        return Ok(DomainReduction::NoFixedGrid);
    }

    let file = FixedGridFile::open(path)?;
    let grid = GeoGrid::from_scan_angles(&file.geostationary(), &file.x, &file.y);
    let (selection, mask) = select(&grid, bbox);

    if selection.is_empty() {
        warn!(path = %path.display(), bbox = %bbox, "Domain does not intersect the file");
    }
    info!(
        path = %path.display(),
        bbox = %bbox,
        rows = selection.rows.len(),
        cols = selection.cols.len(),
        "Altering domain"
    );

    let spec = SubsetSpec {
        row_dim: ROW_DIM,
        col_dim: COL_DIM,
        selection: &selection,
        masked_variable: &file.primary,
        mask: &mask,
    };
    let summary = replace_via_temp(path, |temp| Ok(write_subset(path, temp, &spec)?))?;

    Ok(DomainReduction::Reduced {
        rows: summary.shape.0,
        cols: summary.shape.1,
        masked: summary.masked_samples,
    })
}
