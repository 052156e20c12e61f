//! Per-sample latitude/longitude grids for fixed-grid sectors.

use rayon::prelude::*;

use crate::geostationary::Geostationary;

/// Row-major geographic coordinates aligned 1:1 with a `(y, x)` data array.
///
/// Row `r` corresponds to `y[r]` and column `c` to `x[c]`. Samples whose
/// line of sight misses the Earth hold NaN in both arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoGrid {
    rows: usize,
    cols: usize,
    lat: Vec<f64>,
    lon: Vec<f64>,
}

impl GeoGrid {
    /// Project every `(x[c], y[r])` pair. Rows are computed in parallel.
    pub fn from_scan_angles(proj: &Geostationary, x: &[f64], y: &[f64]) -> Self {
        let rows = y.len();
        let cols = x.len();

        let projected: Vec<(Vec<f64>, Vec<f64>)> = y
            .par_iter()
            .map(|&y_rad| x.iter().map(|&x_rad| proj.project(x_rad, y_rad)).unzip())
            .collect();

        let mut lat = Vec::with_capacity(rows * cols);
        let mut lon = Vec::with_capacity(rows * cols);
        for (row_lon, row_lat) in projected {
            lon.extend(row_lon);
            lat.extend(row_lat);
        }

        Self { rows, cols, lat, lon }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Latitudes in degrees, row-major.
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Longitudes in degrees, row-major.
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// `(lon, lat)` at one sample.
    pub fn get(&self, row: usize, col: usize) -> Option<(f64, f64)> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let idx = row * self.cols + col;
        Some((self.lon[idx], self.lat[idx]))
    }

    /// Number of samples that landed on the Earth.
    pub fn on_disk_count(&self) -> usize {
        self.lat.iter().filter(|v| !v.is_nan()).count()
    }
}
