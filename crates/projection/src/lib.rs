//! GOES-R fixed-grid coordinate transformations.
//!
//! Implements the geostationary projection from scratch without external
//! dependencies, plus a parallel builder for per-sample lat/lon grids.

pub mod geogrid;
pub mod geostationary;

pub use geogrid::GeoGrid;
pub use geostationary::Geostationary;
