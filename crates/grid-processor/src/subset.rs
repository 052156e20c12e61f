//! Bounding-box subsetting of fixed-grid arrays.
//!
//! Two different tests are applied to the same box:
//!
//! - rows/columns are KEPT when any sample on them falls inside the box with
//!   inclusive bounds, evaluated separately for latitude and longitude and then
//!   intersected per axis;
//! - samples are MASKED unless they fall strictly inside the box.
//!
//! A box that touches the grid only on its edges therefore keeps the edge
//! rows/columns but masks them.

use rayon::prelude::*;
use tracing::debug;

use goes_common::BoundingBox;
use projection::GeoGrid;

use crate::error::{GridProcessorError, Result};
use crate::slice::slice_axes;

/// Rows and columns to keep, ascending and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
}

impl Selection {
    /// True when nothing survives the crop.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.cols.is_empty()
    }

    /// `(rows, cols)` of the cropped array.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.cols.len())
    }
}

/// Per-sample flag: `true` = strictly inside the box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainMask {
    rows: usize,
    cols: usize,
    inside: Vec<bool>,
}

impl DomainMask {
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_inside(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.inside[row * self.cols + col]
    }

    /// Number of samples that keep their value.
    pub fn inside_count(&self) -> usize {
        self.inside.iter().filter(|v| **v).count()
    }

    /// Number of samples that will be replaced by the fill value.
    pub fn outside_count(&self) -> usize {
        self.inside.len() - self.inside_count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.inside
    }
}

/// Compute the kept rows/columns and the interior mask for `bbox`.
///
/// NaN coordinates (off-disk samples) are never inside. A box that misses the
/// grid entirely yields an empty selection and an all-outside mask.
pub fn select(grid: &GeoGrid, bbox: &BoundingBox) -> (Selection, DomainMask) {
    let (rows, cols) = grid.shape();
    let lat = grid.lat();
    let lon = grid.lon();

    let mut rows_lat = vec![false; rows];
    let mut rows_lon = vec![false; rows];
    let mut cols_lat = vec![false; cols];
    let mut cols_lon = vec![false; cols];

    for r in 0..rows {
        for c in 0..cols {
            let idx = r * cols + c;
            if bbox.contains_lat(lat[idx]) {
                rows_lat[r] = true;
                cols_lat[c] = true;
            }
            if bbox.contains_lon(lon[idx]) {
                rows_lon[r] = true;
                cols_lon[c] = true;
            }
        }
    }

    let intersect = |a: &[bool], b: &[bool]| -> Vec<usize> {
        a.iter()
            .zip(b)
            .enumerate()
            .filter(|(_, (x, y))| **x && **y)
            .map(|(i, _)| i)
            .collect()
    };

    let mut selection = Selection {
        rows: intersect(&rows_lat, &rows_lon),
        cols: intersect(&cols_lat, &cols_lon),
    };
    if selection.is_empty() {
        selection = Selection::default();
    }

    let inside: Vec<bool> = lon
        .par_iter()
        .zip(lat.par_iter())
        .map(|(&x, &y)| bbox.strictly_contains(x, y))
        .collect();

    let mask = DomainMask { rows, cols, inside };

    debug!(
        bbox = %bbox,
        kept_rows = selection.rows.len(),
        kept_cols = selection.cols.len(),
        masked = mask.outside_count(),
        "Computed domain selection"
    );

    (selection, mask)
}

/// Replace every sample outside the mask with `fill`. Returns how many were replaced.
pub fn apply_mask<T: Copy + Send + Sync>(data: &mut [T], mask: &DomainMask, fill: T) -> Result<usize> {
    if data.len() != mask.inside.len() {
        return Err(GridProcessorError::MaskMismatch {
            mask: mask.inside.len(),
            data: data.len(),
        });
    }

    Ok(data
        .par_iter_mut()
        .zip(mask.inside.par_iter())
        .filter(|(_, inside)| !**inside)
        .map(|(value, _)| *value = fill)
        .count())
}

/// Mask an N-D row-major array whose `row_axis`/`col_axis` match the mask.
///
/// Lets variables stored as `(x, y)`, or with extra leading axes, share the
/// mask computed on the `(y, x)` grid.
pub fn apply_mask_axes<T: Copy>(
    data: &mut [T],
    shape: &[usize],
    row_axis: usize,
    col_axis: usize,
    mask: &DomainMask,
    fill: T,
) -> Result<usize> {
    let expected: usize = shape.iter().product();
    if data.len() != expected {
        return Err(GridProcessorError::ShapeMismatch {
            shape: shape.to_vec(),
            expected,
            actual: data.len(),
        });
    }
    let (row_len, col_len) = match (shape.get(row_axis), shape.get(col_axis)) {
        (Some(&r), Some(&c)) if row_axis != col_axis => (r, c),
        _ => {
            return Err(GridProcessorError::AxisCount {
                expected: 2,
                actual: shape.len(),
            })
        }
    };
    if (row_len, col_len) != mask.shape() {
        return Err(GridProcessorError::MaskMismatch {
            mask: mask.inside.len(),
            data: row_len * col_len,
        });
    }

    let stride = |axis: usize| shape[axis + 1..].iter().product::<usize>();
    let (row_stride, col_stride) = (stride(row_axis), stride(col_axis));

    let mut replaced = 0;
    for (i, value) in data.iter_mut().enumerate() {
        let row = (i / row_stride) % row_len;
        let col = (i / col_stride) % col_len;
        if !mask.inside[row * col_len + col] {
            *value = fill;
            replaced += 1;
        }
    }
    Ok(replaced)
}

/// Crop a `(rows, cols)` array to the selection.
pub fn crop<T: Copy>(data: &[T], shape: (usize, usize), selection: &Selection) -> Result<Vec<T>> {
    let (out, _) = slice_axes(
        data,
        &[shape.0, shape.1],
        &[Some(selection.rows.as_slice()), Some(selection.cols.as_slice())],
    )?;
    Ok(out)
}
