//! Named crop domains.
//!
//! The built-in table can be replaced by a `domains.yaml` file in the config
//! directory:
//!
//! ```yaml
//! MW: { west: -105.0, south: 35.0, east: -82.0, north: 49.5 }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use crate::bbox::BoundingBox;
use crate::error::{GoesError, GoesResult};

/// File name looked up in the config directory.
pub const DOMAINS_FILE: &str = "domains.yaml";

/// (name, west, south, east, north)
const BUILTIN_DOMAINS: [(&str, f64, f64, f64, f64); 10] = [
    ("CONUS", -125.0, 23.0, -66.0, 50.0),
    ("NW", -125.0, 40.0, -104.0, 49.5),
    ("SW", -125.0, 30.0, -102.0, 42.0),
    ("NP", -110.0, 40.0, -93.0, 49.5),
    ("CP", -106.0, 34.0, -90.0, 44.0),
    ("SP", -107.0, 25.5, -88.0, 37.5),
    ("MW", -105.0, 35.0, -82.0, 49.5),
    ("GL", -93.5, 40.0, -74.0, 49.5),
    ("NE", -82.0, 37.0, -66.5, 47.8),
    ("SE", -92.0, 24.0, -75.0, 37.5),
];

/// Immutable mapping from domain name to bounding box. Lookups ignore case.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainTable {
    domains: BTreeMap<String, BoundingBox>,
}

impl DomainTable {
    pub fn builtin() -> Self {
        let domains = BUILTIN_DOMAINS
            .iter()
            .map(|(name, west, south, east, north)| {
                (
                    name.to_ascii_uppercase(),
                    BoundingBox {
                        west: *west,
                        south: *south,
                        east: *east,
                        north: *north,
                    },
                )
            })
            .collect();
        Self { domains }
    }

    /// Parse and validate a YAML table.
    pub fn from_yaml_str(yaml: &str) -> GoesResult<Self> {
        let raw: BTreeMap<String, BoundingBox> = serde_yaml::from_str(yaml)?;
        if raw.is_empty() {
            return Err(GoesError::Config("domain table is empty".to_string()));
        }

        let mut domains = BTreeMap::new();
        for (name, bbox) in raw {
            bbox.validate()
                .map_err(|e| GoesError::Config(format!("domain '{}': {}", name, e)))?;
            if domains.insert(name.to_ascii_uppercase(), bbox).is_some() {
                return Err(GoesError::Config(format!(
                    "domain '{}' is defined more than once",
                    name
                )));
            }
        }
        Ok(Self { domains })
    }

    /// Load `domains.yaml` from `config_dir`, or fall back to the built-in table.
    pub fn load(config_dir: &Path) -> GoesResult<Self> {
        let path = config_dir.join(DOMAINS_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "No domain table found, using built-in domains");
            return Ok(Self::builtin());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| GoesError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let table = Self::from_yaml_str(&content)?;
        info!(path = %path.display(), count = table.len(), "Loaded domain table");
        Ok(table)
    }

    /// Look up a domain; unknown names are an error.
    pub fn get(&self, name: &str) -> GoesResult<BoundingBox> {
        self.domains
            .get(&name.trim().to_ascii_uppercase())
            .copied()
            .ok_or_else(|| {
                GoesError::UnknownDomain(format!(
                    "'{}' (known domains: {})",
                    name,
                    self.names().collect::<Vec<_>>().join(", ")
                ))
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl Default for DomainTable {
    fn default() -> Self {
        Self::builtin()
    }
}
