//! Reading GOES-R fixed-grid files.

use std::path::{Path, PathBuf};

use netcdf::{File, Variable};
use projection::Geostationary;
use tracing::{debug, warn};

use crate::error::{NetCdfError, NetCdfResult};
use crate::native::{dimension_names, read_as_f64, read_unpacked, silence_hdf5_errors};
use crate::projection::{GoesProjection, PROJECTION_VARIABLE};

/// Primary data variable of ABI Cloud and Moisture Imagery products.
pub const DEFAULT_PRIMARY: &str = "CMI";

/// Dimension that indexes grid rows (elevation angle).
pub const ROW_DIM: &str = "y";

/// Dimension that indexes grid columns (scan angle).
pub const COL_DIM: &str = "x";

const BAND_ID_VARIABLE: &str = "band_id";
const BAND_WAVELENGTH_VARIABLE: &str = "band_wavelength";

/// Band identity stored in an ABI file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandInfo {
    pub band_id: u8,
    /// Micrometers
    pub wavelength: f32,
}

/// Where the row and column dimensions sit in the primary variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub dims: Vec<String>,
    pub row_axis: usize,
    pub col_axis: usize,
}

/// The geolocation content of a fixed-grid file, decoded.
#[derive(Debug, Clone)]
pub struct FixedGridFile {
    pub path: PathBuf,
    pub primary: String,
    /// Scan angles (radians), one per column
    pub x: Vec<f64>,
    /// Elevation angles (radians), one per row
    pub y: Vec<f64>,
    pub projection: GoesProjection,
    pub layout: GridLayout,
    pub band: Option<BandInfo>,
}

impl FixedGridFile {
    /// Open a file whose primary variable is `CMI`.
    pub fn open(path: &Path) -> NetCdfResult<Self> {
        Self::open_with(path, DEFAULT_PRIMARY)
    }

    /// Open a file and locate the `y`/`x` axes of `primary` by dimension name.
    pub fn open_with(path: &Path, primary: &str) -> NetCdfResult<Self> {
        silence_hdf5_errors();

        let file = netcdf::open(path)?;
        let primary_var = require_variable(&file, primary)?;

        let dims = dimension_names(&primary_var);
        let row_axis = axis_of(&dims, ROW_DIM, primary)?;
        let col_axis = axis_of(&dims, COL_DIM, primary)?;

        let x = read_unpacked(&require_variable(&file, COL_DIM)?)?;
        let y = read_unpacked(&require_variable(&file, ROW_DIM)?)?;

        let projection = GoesProjection::from_variable(&require_variable(&file, PROJECTION_VARIABLE)?)?;
        let band = read_band(&file)?;

        debug!(
            path = %path.display(),
            rows = y.len(),
            cols = x.len(),
            dims = ?dims,
            "Opened fixed-grid file"
        );

        Ok(Self {
            path: path.to_path_buf(),
            primary: primary.to_string(),
            x,
            y,
            projection,
            layout: GridLayout {
                dims,
                row_axis,
                col_axis,
            },
            band,
        })
    }

    pub fn geostationary(&self) -> Geostationary {
        self.projection.to_geostationary()
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.y.len(), self.x.len())
    }
}

/// Whether the file carries `primary` with both grid dimensions.
///
/// GLM and other point products have no fixed grid and are skipped by the
/// spatial tools.
pub fn has_fixed_grid(path: &Path, primary: &str) -> NetCdfResult<bool> {
    silence_hdf5_errors();
    let file = netcdf::open(path)?;
    Ok(file.variable(primary).map_or(false, |var| {
        let dims = dimension_names(&var);
        dims.iter().any(|d| d == ROW_DIM) && dims.iter().any(|d| d == COL_DIM)
    }))
}

/// Read `band_id` and `band_wavelength`, if present.
pub fn read_band_info(path: &Path) -> NetCdfResult<Option<BandInfo>> {
    silence_hdf5_errors();
    let file = netcdf::open(path)?;
    read_band(&file)
}

fn read_band(file: &File) -> NetCdfResult<Option<BandInfo>> {
    let (id_var, wl_var) = match (
        file.variable(BAND_ID_VARIABLE),
        file.variable(BAND_WAVELENGTH_VARIABLE),
    ) {
        (Some(id), Some(wl)) => (id, wl),
        (None, None) => return Ok(None),
        _ => {
            warn!("File has only one of band_id/band_wavelength");
            return Ok(None);
        }
    };

    let band_id = first_value(&id_var)?;
    let wavelength = first_value(&wl_var)?;
    if !(1.0..=255.0).contains(&band_id) {
        return Err(NetCdfError::InvalidFormat(format!("band_id {} out of range", band_id)));
    }

    Ok(Some(BandInfo {
        band_id: band_id as u8,
        wavelength: wavelength as f32,
    }))
}

fn first_value(var: &Variable) -> NetCdfResult<f64> {
    read_as_f64(var)?
        .first()
        .copied()
        .ok_or_else(|| NetCdfError::MissingData(format!("{} is empty", var.name())))
}

fn require_variable<'f>(file: &'f File, name: &str) -> NetCdfResult<Variable<'f>> {
    file.variable(name)
        .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", name)))
}

fn axis_of(dims: &[String], name: &str, primary: &str) -> NetCdfResult<usize> {
    dims.iter().position(|d| d == name).ok_or_else(|| {
        NetCdfError::InvalidFormat(format!(
            "{} has dimensions {:?}, expected one named '{}'",
            primary, dims, name
        ))
    })
}
