//! Geostationary satellite projection.
//!
//! This projection is used for GOES-R series satellite imagery.
//! The satellite views Earth from a fixed position above the equator,
//! and coordinates are expressed as scan angles in radians from nadir.
//!
//! Reference: GOES-R Product Definition and Users' Guide (PUG) Volume 4

/// Geostationary projection parameters.
///
/// These parameters define the projection from satellite scan angle (x, y)
/// coordinates to geographic (lat/lon) and back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geostationary {
    /// Satellite height above Earth center (meters)
    /// This is perspective_point_height + semi_major_axis
    pub h: f64,
    /// Perspective point height above Earth surface (meters)
    pub perspective_point_height: f64,
    /// Semi-major axis of Earth ellipsoid (meters)
    pub req: f64,
    /// Semi-minor axis of Earth ellipsoid (meters)
    pub rpol: f64,
    /// Longitude of satellite nadir point (radians)
    pub lambda_0: f64,
}

/// GRS80 ellipsoid used by every GOES-R fixed grid.
const GRS80_SEMI_MAJOR: f64 = 6378137.0;
const GRS80_SEMI_MINOR: f64 = 6356752.31414;
const GOES_PERSPECTIVE_HEIGHT: f64 = 35786023.0;

impl Geostationary {
    /// Create a projection from the `goes_imager_projection` attributes.
    ///
    /// # Arguments
    /// * `perspective_point_height` - Satellite altitude above Earth surface (meters)
    /// * `semi_major_axis` - Earth equatorial radius (meters)
    /// * `semi_minor_axis` - Earth polar radius (meters)
    /// * `longitude_origin_deg` - Satellite longitude (degrees, negative for west)
    pub fn from_goes(
        perspective_point_height: f64,
        semi_major_axis: f64,
        semi_minor_axis: f64,
        longitude_origin_deg: f64,
    ) -> Self {
        Self {
            h: perspective_point_height + semi_major_axis,
            perspective_point_height,
            req: semi_major_axis,
            rpol: semi_minor_axis,
            lambda_0: longitude_origin_deg.to_radians(),
        }
    }

    /// GOES-16 (GOES-East at 75.0°W).
    pub fn goes16() -> Self {
        Self::from_goes(GOES_PERSPECTIVE_HEIGHT, GRS80_SEMI_MAJOR, GRS80_SEMI_MINOR, -75.0)
    }

    /// GOES-17 (GOES-West at 137.2°W).
    pub fn goes17() -> Self {
        Self::from_goes(GOES_PERSPECTIVE_HEIGHT, GRS80_SEMI_MAJOR, GRS80_SEMI_MINOR, -137.2)
    }

    /// GOES-18 (GOES-West at 137.0°W).
    pub fn goes18() -> Self {
        Self::from_goes(GOES_PERSPECTIVE_HEIGHT, GRS80_SEMI_MAJOR, GRS80_SEMI_MINOR, -137.0)
    }

    /// Sub-satellite longitude in degrees.
    pub fn nadir_longitude(&self) -> f64 {
        self.lambda_0.to_degrees()
    }

    /// Convert scan angles (radians) to geographic `(lon, lat)` in degrees.
    ///
    /// Based on GOES-R PUG Volume 4, Section 4.2.8. A scan angle that misses
    /// the Earth has a negative discriminant, and the square root turns both
    /// outputs into NaN. No branch is taken, so whole grids can be projected
    /// without special cases.
    #[inline]
    pub fn project(&self, x_rad: f64, y_rad: f64) -> (f64, f64) {
        let sin_x = x_rad.sin();
        let cos_x = x_rad.cos();
        let sin_y = y_rad.sin();
        let cos_y = y_rad.cos();
        let axis_ratio = (self.req / self.rpol).powi(2);

        // Quadratic coefficients for finding distance to Earth surface
        let a = sin_x.powi(2) + cos_x.powi(2) * (cos_y.powi(2) + axis_ratio * sin_y.powi(2));
        let b = -2.0 * self.h * cos_x * cos_y;
        let c = self.h.powi(2) - self.req.powi(2);

        let rs = (-b - (b * b - 4.0 * a * c).sqrt()) / (2.0 * a);

        // 3D coordinates (satellite-centered, Earth-fixed)
        let sx = rs * cos_x * cos_y;
        let sy = -rs * sin_x;
        let sz = rs * cos_x * sin_y;

        let lat = (axis_ratio * sz / ((self.h - sx).powi(2) + sy.powi(2)).sqrt()).atan();
        let lon = self.lambda_0 - (sy / (self.h - sx)).atan();

        (lon.to_degrees(), lat.to_degrees())
    }

    /// Convert scan angles (radians) to geographic `(lon, lat)` in degrees.
    ///
    /// Returns None if the scan angle points to space (off Earth).
    pub fn scan_to_geo(&self, x_rad: f64, y_rad: f64) -> Option<(f64, f64)> {
        let (lon, lat) = self.project(x_rad, y_rad);
        if lon.is_nan() || lat.is_nan() {
            None
        } else {
            Some((lon, lat))
        }
    }

    /// Convert geographic coordinates (degrees) to scan angles `(x, y)` in radians.
    ///
    /// Based on GOES-R PUG Volume 4, Section 4.2.8.
    /// Returns None if the point is not visible from the satellite.
    pub fn geo_to_scan(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        let lat_rad = lat_deg.to_radians();
        let dlon = lon_deg.to_radians() - self.lambda_0;

        // Geocentric latitude (accounting for Earth's oblateness)
        let phi_c = ((self.rpol / self.req).powi(2) * lat_rad.tan()).atan();

        // Eccentricity squared
        let e2 = 1.0 - (self.rpol / self.req).powi(2);

        // Radius from Earth center to surface point
        let rc = self.rpol / (1.0 - e2 * phi_c.cos().powi(2)).sqrt();

        let sx = self.h - rc * phi_c.cos() * dlon.cos();
        let sy = -rc * phi_c.cos() * dlon.sin();
        let sz = rc * phi_c.sin();

        // Point is on the far side of the limb
        if self.h * (self.h - sx) < sy.powi(2) + (self.req / self.rpol).powi(2) * sz.powi(2) {
            return None;
        }

        let range = (sx.powi(2) + sy.powi(2) + sz.powi(2)).sqrt();
        let x_rad = (-sy / range).asin();
        let y_rad = (sz / sx).atan();

        Some((x_rad, y_rad))
    }
}
