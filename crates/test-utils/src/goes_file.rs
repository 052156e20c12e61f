//! Small synthetic GOES-R Cloud and Moisture Imagery files.

use std::path::Path;

use crate::fixtures::FixedGridSpec;
use crate::generators::pack_axis;

/// Fill value of the packed `CMI` variable.
pub const CMI_FILL: i16 = -1;

/// Description of a synthetic file.
#[derive(Debug, Clone)]
pub struct GoesFileFixture {
    pub grid: FixedGridSpec,
    pub band_id: u8,
    /// Micrometers, as published in the file
    pub wavelength: f32,
    /// Degrees
    pub longitude_origin: f64,
    /// Store `CMI` as `(x, y)` instead of `(y, x)`
    pub transposed: bool,
}

impl GoesFileFixture {
    pub fn new(grid: FixedGridSpec) -> Self {
        Self {
            grid,
            band_id: 13,
            wavelength: 10.33,
            longitude_origin: -75.0,
            transposed: false,
        }
    }

    pub fn band(mut self, band_id: u8, wavelength: f32) -> Self {
        self.band_id = band_id;
        self.wavelength = wavelength;
        self
    }

    pub fn transposed(mut self) -> Self {
        self.transposed = true;
        self
    }
}

/// Packed `CMI` count at a grid position: `col * 100 + row`.
pub fn cmi_value(row: usize, col: usize) -> i16 {
    (col * 100 + row) as i16
}

/// Write a fixed-grid file laid out like an ABI L2 CMIP product.
///
/// `x`/`y` are packed `int16` with `scale_factor`/`add_offset`; `CMI` holds
/// [`cmi_value`]; `DQF` is all zero.
pub fn write_goes_fixture(path: &Path, fixture: &GoesFileFixture) -> Result<(), netcdf::Error> {
    let grid = &fixture.grid;
    let mut file = netcdf::create(path)?;

    file.add_attribute("title", "ABI L2 Cloud and Moisture Imagery")?;
    file.add_attribute("platform_ID", "G16")?;

    file.add_dimension("y", grid.ny)?;
    file.add_dimension("x", grid.nx)?;
    file.add_dimension("band", 1)?;
    file.add_dimension("number_of_image_bounds", 2)?;

    let x_axis = grid.x_axis();
    let y_axis = grid.y_axis();

    let mut x = file.add_variable::<i16>("x", &["x"])?;
    x.put_attribute("scale_factor", grid.dx as f32)?;
    x.put_attribute("add_offset", grid.x0 as f32)?;
    x.put_attribute("units", "rad")?;
    x.put_values(&pack_axis(&x_axis, f64::from(grid.dx as f32), f64::from(grid.x0 as f32)), ..)?;

    let mut y = file.add_variable::<i16>("y", &["y"])?;
    y.put_attribute("scale_factor", grid.dy as f32)?;
    y.put_attribute("add_offset", grid.y0 as f32)?;
    y.put_attribute("units", "rad")?;
    y.put_values(&pack_axis(&y_axis, f64::from(grid.dy as f32), f64::from(grid.y0 as f32)), ..)?;

    let (cmi_dims, cmi): ([&str; 2], Vec<i16>) = if fixture.transposed {
        let data = (0..grid.nx)
            .flat_map(|col| (0..grid.ny).map(move |row| cmi_value(row, col)))
            .collect();
        (["x", "y"], data)
    } else {
        let data = (0..grid.ny)
            .flat_map(|row| (0..grid.nx).map(move |col| cmi_value(row, col)))
            .collect();
        (["y", "x"], data)
    };
    let mut var = file.add_variable::<i16>("CMI", &cmi_dims)?;
    var.put_attribute("_FillValue", CMI_FILL)?;
    var.put_attribute("_Unsigned", "true")?;
    var.put_attribute("scale_factor", 0.1f32)?;
    var.put_attribute("add_offset", 150.0f32)?;
    var.put_attribute("grid_mapping", "goes_imager_projection")?;
    var.put_values(&cmi, ..)?;

    let mut dqf = file.add_variable::<u8>("DQF", &["y", "x"])?;
    dqf.put_attribute("_FillValue", 255u8)?;
    dqf.put_values(&vec![0u8; grid.len()], ..)?;

    let mut proj = file.add_variable::<i32>("goes_imager_projection", &[])?;
    proj.put_attribute("grid_mapping_name", "geostationary")?;
    proj.put_attribute("perspective_point_height", 35786023.0f64)?;
    proj.put_attribute("semi_major_axis", 6378137.0f64)?;
    proj.put_attribute("semi_minor_axis", 6356752.31414f64)?;
    proj.put_attribute("longitude_of_projection_origin", fixture.longitude_origin)?;
    proj.put_attribute("sweep_angle_axis", "x")?;
    proj.put_values(&[-2147483647i32], ..)?;

    let mut band_id = file.add_variable::<u8>("band_id", &["band"])?;
    band_id.put_values(&[fixture.band_id], ..)?;

    let mut band_wavelength = file.add_variable::<f32>("band_wavelength", &["band"])?;
    band_wavelength.put_attribute("units", "um")?;
    band_wavelength.put_values(&[fixture.wavelength], ..)?;

    let mut bounds = file.add_variable::<f32>("x_image_bounds", &["number_of_image_bounds"])?;
    bounds.put_values(&[x_axis[0] as f32, x_axis[x_axis.len() - 1] as f32], ..)?;

    let mut t = file.add_variable::<f64>("t", &[])?;
    t.put_attribute("units", "seconds since 2000-01-01 12:00:00")?;
    t.put_values(&[643_507_276.6f64], ..)?;

    Ok(())
}
