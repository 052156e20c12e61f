//! Fixed-grid layouts and bounding boxes used across the test suite.

/// Layout of a fixed-grid sector: scan-angle axes in radians.
///
/// `x[i] = x0 + i * dx`, `y[j] = y0 + j * dy`. GOES files store `y`
/// north to south, so `dy` is negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGridSpec {
    pub nx: usize,
    pub ny: usize,
    pub x0: f64,
    pub dx: f64,
    pub y0: f64,
    pub dy: f64,
}

impl FixedGridSpec {
    /// Scan-angle (`x`) axis values.
    pub fn x_axis(&self) -> Vec<f64> {
        scan_axis(self.x0, self.dx, self.nx)
    }

    /// Elevation-angle (`y`) axis values.
    pub fn y_axis(&self) -> Vec<f64> {
        scan_axis(self.y0, self.dy, self.ny)
    }

    /// Number of samples in a `(y, x)` array.
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Evenly spaced axis.
pub fn scan_axis(start: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// GOES-East CONUS sector at 2 km, decimated to 100 × 60 samples.
///
/// Spans the same scan angles as the full 2500 × 1500 sector.
pub const CONUS_COARSE: FixedGridSpec = FixedGridSpec {
    nx: 100,
    ny: 60,
    x0: -0.101332,
    dx: 0.0014,
    y0: 0.128212,
    dy: -0.0014,
};

/// A tiny grid centred on the sub-satellite point.
pub const NADIR_5X5: FixedGridSpec = FixedGridSpec {
    nx: 5,
    ny: 5,
    x0: -0.002,
    dx: 0.001,
    y0: 0.002,
    dy: -0.001,
};

/// A grid whose corners look past the Earth's limb.
pub const FULL_DISK_EDGE: FixedGridSpec = FixedGridSpec {
    nx: 7,
    ny: 7,
    x0: -0.18,
    dx: 0.06,
    y0: 0.18,
    dy: -0.06,
};

/// Common bounding boxes as (west, south, east, north).
pub mod bbox {
    /// Midwest, well inside the GOES-East CONUS sector.
    pub const MIDWEST: (f64, f64, f64, f64) = (-105.0, 35.0, -82.0, 49.5);

    /// Southern Indian Ocean, never seen from GOES-East.
    pub const INDIAN_OCEAN: (f64, f64, f64, f64) = (60.0, -40.0, 90.0, -20.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_lengths() {
        assert_eq!(CONUS_COARSE.x_axis().len(), 100);
        assert_eq!(CONUS_COARSE.y_axis().len(), 60);
        assert_eq!(CONUS_COARSE.len(), 6000);
    }

    #[test]
    fn test_y_axis_runs_north_to_south() {
        let y = NADIR_5X5.y_axis();
        assert!(y.windows(2).all(|w| w[0] > w[1]));
        assert!(y[2].abs() < 1e-12);
    }
}
