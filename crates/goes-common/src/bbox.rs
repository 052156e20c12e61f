//! Geographic bounding box used to crop fixed-grid imagery.

use serde::{Deserialize, Serialize};

use crate::error::{GoesError, GoesResult};

/// A geographic bounding box in degrees longitude/latitude.
///
/// Construction through [`BoundingBox::new`] guarantees `west < east` and
/// `south < north`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    /// Create a validated bounding box.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> GoesResult<Self> {
        let bbox = Self {
            west,
            south,
            east,
            north,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    /// Parse a domain box string: `"LonW LatS LonE LatN"`.
    ///
    /// Values may be separated by whitespace or commas.
    pub fn from_domain_box(s: &str) -> GoesResult<Self> {
        let parts: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 4 {
            return Err(GoesError::InvalidBbox(format!(
                "'{}': expected 'LonW LatS LonE LatN'",
                s
            )));
        }

        let mut values = [0.0f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| GoesError::InvalidBbox(format!("invalid number '{}'", part)))?;
        }

        Self::new(values[0], values[1], values[2], values[3])
    }

    /// Check the ordering invariants.
    pub fn validate(&self) -> GoesResult<()> {
        let finite = [self.west, self.south, self.east, self.north]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(GoesError::InvalidBbox(format!(
                "non-finite coordinate in {:?}",
                self
            )));
        }
        if self.west >= self.east {
            return Err(GoesError::InvalidBbox(format!(
                "west ({}) must be less than east ({})",
                self.west, self.east
            )));
        }
        if self.south >= self.north {
            return Err(GoesError::InvalidBbox(format!(
                "south ({}) must be less than north ({})",
                self.south, self.north
            )));
        }
        Ok(())
    }

    /// Inclusive latitude test, used when choosing rows/columns to keep.
    #[inline]
    pub fn contains_lat(&self, lat: f64) -> bool {
        lat >= self.south && lat <= self.north
    }

    /// Inclusive longitude test, used when choosing rows/columns to keep.
    #[inline]
    pub fn contains_lon(&self, lon: f64) -> bool {
        lon >= self.west && lon <= self.east
    }

    /// Strict interior test, used when masking samples. Boundary points are outside.
    #[inline]
    pub fn strictly_contains(&self, lon: f64, lat: f64) -> bool {
        lat > self.south && lat < self.north && lon > self.west && lon < self.east
    }

    /// Grow the box by `margin` degrees on every side.
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            west: self.west - margin,
            south: self.south - margin,
            east: self.east + margin,
            north: self.north + margin,
        }
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.west, self.south, self.east, self.north)
    }
}
