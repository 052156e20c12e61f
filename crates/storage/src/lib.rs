//! Remote GOES archive access.
//!
//! Provides:
//! - Object storage (anonymous S3) listing and streamed downloads
//! - Catalog matching of listed objects against a product request and time window

pub mod catalog;
pub mod object_store;

pub use self::object_store::{ObjectStorage, ObjectStorageConfig, RemoteObject};
pub use catalog::{filter_listing, CatalogEntry, CatalogMatcher, MatchedCatalog};
