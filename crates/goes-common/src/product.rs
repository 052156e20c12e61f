//! GOES products, scenes and the filename tokens used to select them.
//!
//! Example object name:
//! `OR_ABI-L2-CMIPC-M6C02_G16_s20201441201169_e20201441203542_c20201441204108.nc`
//!
//! The ABI reports each scene under two scan modes (`M3` before April 2019,
//! `M6` after), so every requested band is searched under both.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{GoesError, GoesResult};

/// Scan-mode prefixes searched for every band.
pub const SCAN_MODES: [&str; 2] = ["M3", "M6"];

/// Highest ABI band number.
pub const MAX_BAND: u8 = 16;

/// Product root of the Geostationary Lightning Mapper stream.
pub const GLM_PRODUCT_ROOT: &str = "GLM-L2-LCFA";

/// Token that identifies GLM objects.
pub const GLM_TOKEN: &str = "LCFA";

/// GOES-R series satellites with public archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Satellite {
    Goes16,
    Goes17,
    Goes18,
}

impl Satellite {
    /// Public NOAA bucket holding this satellite's products.
    pub fn bucket(&self) -> &'static str {
        match self {
            Satellite::Goes16 => "noaa-goes16",
            Satellite::Goes17 => "noaa-goes17",
            Satellite::Goes18 => "noaa-goes18",
        }
    }

    /// Identifier used in object names (`_G16_`).
    pub fn file_id(&self) -> &'static str {
        match self {
            Satellite::Goes16 => "G16",
            Satellite::Goes17 => "G17",
            Satellite::Goes18 => "G18",
        }
    }
}

/// ABI scan sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    Conus,
    Meso1,
    Meso2,
}

impl Sector {
    /// Code used in object names (`CMIPC`, `CMIPM1`, `CMIPM2`).
    pub fn code(&self) -> &'static str {
        match self {
            Sector::Conus => "C",
            Sector::Meso1 => "M1",
            Sector::Meso2 => "M2",
        }
    }

    /// Code used in listing directories. Both mesoscale sectors share `CMIPM`.
    pub fn root_code(&self) -> &'static str {
        match self {
            Sector::Conus => "C",
            Sector::Meso1 | Sector::Meso2 => "M",
        }
    }
}

/// A satellite/sector pair, selected by name on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scene {
    pub satellite: Satellite,
    pub sector: Sector,
}

/// Named scenes accepted by `--goes-domain`.
const SCENES: [(&str, Satellite, Sector); 6] = [
    ("econus", Satellite::Goes16, Sector::Conus),
    ("emeso-1", Satellite::Goes16, Sector::Meso1),
    ("emeso-2", Satellite::Goes16, Sector::Meso2),
    ("wconus", Satellite::Goes17, Sector::Conus),
    ("wmeso-1", Satellite::Goes17, Sector::Meso1),
    ("wmeso-2", Satellite::Goes17, Sector::Meso2),
];

impl Scene {
    /// Names of all known scenes.
    pub fn names() -> impl Iterator<Item = &'static str> {
        SCENES.iter().map(|(name, _, _)| *name)
    }

    /// Listing root for the imagery product, e.g. `ABI-L2-CMIPC`.
    pub fn imagery_root(&self) -> String {
        format!("ABI-L2-CMIP{}", self.sector.root_code())
    }

    /// Filename prefix selecting this sector's imagery, e.g. `OR_ABI-L2-CMIPM1-`.
    pub fn imagery_file_prefix(&self) -> String {
        format!("OR_ABI-L2-CMIP{}-", self.sector.code())
    }

    /// Product code stored on catalog entries, e.g. `ABI-L2-CMIPM1`.
    pub fn imagery_product_code(&self) -> String {
        format!("ABI-L2-CMIP{}", self.sector.code())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            satellite: Satellite::Goes16,
            sector: Sector::Conus,
        }
    }
}

impl FromStr for Scene {
    type Err = GoesError;

    fn from_str(s: &str) -> GoesResult<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        SCENES
            .iter()
            .find(|(name, _, _)| *name == wanted)
            .map(|(_, satellite, sector)| Scene {
                satellite: *satellite,
                sector: *sector,
            })
            .ok_or_else(|| {
                GoesError::UnknownScene(format!(
                    "'{}' (expected one of: {})",
                    s,
                    Scene::names().collect::<Vec<_>>().join(", ")
                ))
            })
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = SCENES
            .iter()
            .find(|(_, sat, sec)| *sat == self.satellite && *sec == self.sector)
            .map(|(name, _, _)| *name)
            .unwrap_or("custom");
        write!(f, "{}", name)
    }
}

/// ABI bands requested by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandSelection {
    bands: Vec<u8>,
}

impl BandSelection {
    /// All sixteen ABI bands.
    pub fn all() -> Self {
        Self {
            bands: (1..=MAX_BAND).collect(),
        }
    }

    /// Parse `all` or a comma separated list such as `2,5,13`.
    ///
    /// Duplicates are collapsed; order of first appearance is kept.
    pub fn parse(s: &str) -> GoesResult<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::all());
        }

        let mut bands = Vec::new();
        for part in trimmed.split(',').map(str::trim) {
            let band: u8 = part
                .parse()
                .map_err(|_| GoesError::UnknownBand(format!("'{}' is not a band number", part)))?;
            if band == 0 || band > MAX_BAND {
                return Err(GoesError::UnknownBand(format!(
                    "{} (ABI bands are 1-{})",
                    band, MAX_BAND
                )));
            }
            if !bands.contains(&band) {
                bands.push(band);
            }
        }

        Ok(Self { bands })
    }

    pub fn bands(&self) -> &[u8] {
        &self.bands
    }

    /// Filename tokens: `M3Cnn` and `M6Cnn` for every band.
    pub fn tokens(&self) -> Vec<String> {
        self.bands
            .iter()
            .flat_map(|band| SCAN_MODES.iter().map(move |mode| band_token(mode, *band)))
            .collect()
    }
}

/// Token for one band in one scan mode, e.g. `M6C02`.
pub fn band_token(mode: &str, band: u8) -> String {
    format!("{}C{:02}", mode, band)
}

/// Extract the ABI band number from an object name (`...-M6C13_G16_...`).
pub fn band_from_filename(filename: &str) -> Option<u8> {
    SCAN_MODES.iter().find_map(|mode| {
        let marker = format!("{}C", mode);
        let pos = filename.find(&marker)?;
        filename
            .get(pos + marker.len()..pos + marker.len() + 2)?
            .parse()
            .ok()
    })
}

/// Everything the operator asked for: ABI bands, GLM, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub bands: Option<BandSelection>,
    pub glm: bool,
}

impl ProductRequest {
    /// At least one of bands or GLM must be requested.
    pub fn new(bands: Option<BandSelection>, glm: bool) -> GoesResult<Self> {
        let empty = bands.as_ref().map_or(true, |b| b.bands().is_empty());
        if empty && !glm {
            return Err(GoesError::Usage(
                "no ABI bands or GLM data requested (use -b and/or -g)".to_string(),
            ));
        }
        Ok(Self { bands, glm })
    }

    /// The product streams to list and filter, imagery first.
    pub fn streams(&self, scene: &Scene) -> Vec<ProductStream> {
        let mut streams = Vec::new();
        if let Some(bands) = &self.bands {
            streams.push(ProductStream {
                root: scene.imagery_root(),
                file_prefix: scene.imagery_file_prefix(),
                product_code: scene.imagery_product_code(),
                tokens: bands.tokens(),
            });
        }
        if self.glm {
            streams.push(ProductStream {
                root: GLM_PRODUCT_ROOT.to_string(),
                file_prefix: format!("OR_{}_", GLM_PRODUCT_ROOT),
                product_code: GLM_PRODUCT_ROOT.to_string(),
                tokens: vec![GLM_TOKEN.to_string()],
            });
        }
        streams
    }
}

/// One remote catalog to search and how to recognise its objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductStream {
    /// Listing root, e.g. `ABI-L2-CMIPC`
    pub root: String,
    /// Required object filename prefix, e.g. `OR_ABI-L2-CMIPC-`
    pub file_prefix: String,
    /// Product code recorded on matched entries
    pub product_code: String,
    /// Substrings of which at least one must appear in the path
    pub tokens: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_tokens() {
        let bands = BandSelection::parse("2,5").unwrap();
        assert_eq!(bands.tokens(), vec!["M3C02", "M6C02", "M3C05", "M6C05"]);
    }

    #[test]
    fn test_band_selection_all() {
        let bands = BandSelection::parse("ALL").unwrap();
        assert_eq!(bands.bands().len(), 16);
        assert_eq!(bands.tokens().len(), 32);
    }

    #[test]
    fn test_band_selection_rejects_unknown() {
        assert!(matches!(BandSelection::parse("0"), Err(GoesError::UnknownBand(_))));
        assert!(matches!(BandSelection::parse("17"), Err(GoesError::UnknownBand(_))));
        assert!(matches!(BandSelection::parse("2,x"), Err(GoesError::UnknownBand(_))));
    }

    #[test]
    fn test_scene_lookup() {
        let scene: Scene = "wmeso-2".parse().unwrap();
        assert_eq!(scene.satellite.bucket(), "noaa-goes17");
        assert_eq!(scene.imagery_root(), "ABI-L2-CMIPM");
        assert_eq!(scene.imagery_file_prefix(), "OR_ABI-L2-CMIPM2-");
        assert_eq!(scene.to_string(), "wmeso-2");
        assert!(matches!("pacific".parse::<Scene>(), Err(GoesError::UnknownScene(_))));
    }

    #[test]
    fn test_product_request_requires_something() {
        assert!(matches!(ProductRequest::new(None, false), Err(GoesError::Usage(_))));
        let glm_only = ProductRequest::new(None, true).unwrap();
        let streams = glm_only.streams(&Scene::default());
        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0].file_prefix, "OR_GLM-L2-LCFA_");
    }

    #[test]
    fn test_band_from_filename() {
        assert_eq!(
            band_from_filename("OR_ABI-L2-CMIPC-M6C13_G16_s20201441201169.nc"),
            Some(13)
        );
        assert_eq!(band_from_filename("OR_GLM-L2-LCFA_G16_s20201441200000.nc"), None);
    }
}
