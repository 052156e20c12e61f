//! Expected ABI band wavelengths.
//!
//! Some archive files publish a `band_wavelength` that is a few hundredths of
//! a micrometer off the nominal value that downstream decoders key on. This
//! table holds the value the wavelength correction enforces.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{GoesError, GoesResult};
use crate::product::MAX_BAND;

/// File name looked up in the config directory.
pub const BANDS_FILE: &str = "bands.yaml";

/// Two wavelengths closer than this (micrometers) are considered equal.
pub const WAVELENGTH_TOLERANCE: f32 = 1e-4;

/// (band, wavelength in micrometers)
const BUILTIN_WAVELENGTHS: [(u8, f32); 16] = [
    (1, 0.47),
    (2, 0.64),
    (3, 0.87),
    (4, 1.38),
    (5, 1.61),
    (6, 2.25),
    (7, 3.90),
    (8, 6.19),
    (9, 6.95),
    (10, 7.34),
    (11, 8.50),
    (12, 9.61),
    (13, 10.35),
    (14, 11.20),
    (15, 12.30),
    (16, 13.30),
];

/// Immutable band → expected wavelength mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct BandTable {
    wavelengths: BTreeMap<u8, f32>,
}

impl BandTable {
    pub fn builtin() -> Self {
        Self {
            wavelengths: BUILTIN_WAVELENGTHS.iter().copied().collect(),
        }
    }

    /// Parse and validate a YAML table of `band: wavelength` pairs.
    pub fn from_yaml_str(yaml: &str) -> GoesResult<Self> {
        let wavelengths: BTreeMap<u8, f32> = serde_yaml::from_str(yaml)?;
        for (band, wavelength) in &wavelengths {
            if *band == 0 || *band > MAX_BAND {
                return Err(GoesError::Config(format!(
                    "band table: unknown band {}",
                    band
                )));
            }
            if !wavelength.is_finite() || *wavelength <= 0.0 {
                return Err(GoesError::Config(format!(
                    "band table: invalid wavelength {} for band {}",
                    wavelength, band
                )));
            }
        }
        Ok(Self { wavelengths })
    }

    /// Load `bands.yaml` from `config_dir`, or fall back to the built-in table.
    pub fn load(config_dir: &Path) -> GoesResult<Self> {
        let path = config_dir.join(BANDS_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "No band table found, using built-in wavelengths");
            return Ok(Self::builtin());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| GoesError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let table = Self::from_yaml_str(&content)?;
        info!(path = %path.display(), count = table.wavelengths.len(), "Loaded band table");
        Ok(table)
    }

    /// Expected wavelength for a band, if the table covers it.
    pub fn expected(&self, band: u8) -> Option<f32> {
        self.wavelengths.get(&band).copied()
    }

    /// Whether `actual` already matches the expected value for `band`.
    ///
    /// Bands missing from the table always match.
    pub fn matches(&self, band: u8, actual: f32) -> bool {
        self.expected(band)
            .map_or(true, |expected| (expected - actual).abs() < WAVELENGTH_TOLERANCE)
    }
}

impl Default for BandTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_all_bands() {
        let table = BandTable::builtin();
        for band in 1..=MAX_BAND {
            assert!(table.expected(band).is_some(), "band {} missing", band);
        }
        assert!(table.expected(17).is_none());
    }

    #[test]
    fn test_matches_with_tolerance() {
        let table = BandTable::builtin();
        assert!(table.matches(13, 10.35));
        assert!(!table.matches(13, 10.33));
        assert!(table.matches(99, 1.0));
    }

    #[test]
    fn test_yaml_override() {
        let table = BandTable::from_yaml_str("3: 0.865\n13: 10.3\n").unwrap();
        assert_eq!(table.expected(3), Some(0.865));
        assert_eq!(table.expected(2), None);
    }

    #[test]
    fn test_yaml_rejects_bad_entries() {
        assert!(BandTable::from_yaml_str("17: 1.0\n").is_err());
        assert!(BandTable::from_yaml_str("2: -0.64\n").is_err());
    }
}
