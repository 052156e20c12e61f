//! Common types and utilities shared by the GOES fetch tools.

pub mod bands;
pub mod bbox;
pub mod domains;
pub mod error;
pub mod product;
pub mod time;

pub use bands::BandTable;
pub use bbox::BoundingBox;
pub use domains::DomainTable;
pub use error::{GoesError, GoesResult};
pub use product::{BandSelection, ProductRequest, ProductStream, Satellite, Scene, Sector};
pub use time::{parse_cli_time, parse_scan_time, Era, PartitionKey, TimeWindow};
