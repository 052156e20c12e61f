//! `goes_imager_projection` attributes.

use netcdf::Variable;
use projection::Geostationary;

use crate::error::NetCdfResult;
use crate::native::{get_string_attr, require_f64_attr};

/// Name of the grid-mapping variable in GOES-R fixed-grid files.
pub const PROJECTION_VARIABLE: &str = "goes_imager_projection";

/// GOES ABI projection parameters as stored in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct GoesProjection {
    /// Satellite height above the ellipsoid (meters)
    pub perspective_point_height: f64,
    /// Semi-major axis of Earth ellipsoid (meters)
    pub semi_major_axis: f64,
    /// Semi-minor axis of Earth ellipsoid (meters)
    pub semi_minor_axis: f64,
    /// Longitude of satellite nadir point (degrees)
    pub longitude_origin: f64,
    /// Sweep angle axis ("x" for GOES-R)
    pub sweep_angle_axis: String,
}

impl GoesProjection {
    /// Read the grid-mapping attributes. All four numeric attributes are required.
    pub fn from_variable(var: &Variable) -> NetCdfResult<Self> {
        Ok(Self {
            perspective_point_height: require_f64_attr(var, "perspective_point_height")?,
            semi_major_axis: require_f64_attr(var, "semi_major_axis")?,
            semi_minor_axis: require_f64_attr(var, "semi_minor_axis")?,
            longitude_origin: require_f64_attr(var, "longitude_of_projection_origin")?,
            sweep_angle_axis: get_string_attr(var, "sweep_angle_axis").unwrap_or_else(|| "x".to_string()),
        })
    }

    /// Projection engine for these parameters.
    pub fn to_geostationary(&self) -> Geostationary {
        Geostationary::from_goes(
            self.perspective_point_height,
            self.semi_major_axis,
            self.semi_minor_axis,
            self.longitude_origin,
        )
    }
}
