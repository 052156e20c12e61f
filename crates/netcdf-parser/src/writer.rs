//! Rewriting fixed-grid files.
//!
//! Both operations write a complete file at a destination path; callers
//! rename it over the original once it is closed.

use std::path::Path;

use grid_processor::{apply_mask_axes, slice_axes, DomainMask, Selection};
use netcdf::{FileMut, NcTypeDescriptor, Variable};
use tracing::{debug, warn};

use crate::error::{NetCdfError, NetCdfResult};
use crate::native::{dimension_names, dispatch_numeric, get_f64_attr, silence_hdf5_errors};

/// What to cut out of a file and which variable to mask.
#[derive(Debug, Clone, Copy)]
pub struct SubsetSpec<'a> {
    pub row_dim: &'a str,
    pub col_dim: &'a str,
    pub selection: &'a Selection,
    /// Variable whose outside samples are replaced by fill
    pub masked_variable: &'a str,
    /// Computed on the `(row_dim, col_dim)` grid
    pub mask: &'a DomainMask,
}

/// Outcome of a subset rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubsetSummary {
    pub variables_written: usize,
    /// Variables of a type this writer cannot copy
    pub skipped: Vec<String>,
    pub masked_samples: usize,
    /// `(rows, cols)` after cropping
    pub shape: (usize, usize),
}

/// Value written over masked samples.
trait MaskFill: Copy {
    fn mask_fill(var: &Variable) -> Self;
}

macro_rules! impl_int_mask_fill {
    ($($t:ty => $default:expr),* $(,)?) => {
        $(impl MaskFill for $t {
            // Declared _FillValue, else the netCDF default fill for the type
            fn mask_fill(var: &Variable) -> Self {
                get_f64_attr(var, "_FillValue").map(|v| v as $t).unwrap_or($default)
            }
        })*
    };
}

impl_int_mask_fill! {
    u8 => 255,
    i8 => -127,
    u16 => 65535,
    i16 => -32767,
    u32 => 4294967295,
    i32 => -2147483647,
    u64 => 18446744073709551614,
    i64 => -9223372036854775806,
}

impl MaskFill for f32 {
    fn mask_fill(_: &Variable) -> Self {
        f32::NAN
    }
}

impl MaskFill for f64 {
    fn mask_fill(_: &Variable) -> Self {
        f64::NAN
    }
}

/// Write a cropped copy of `src` to `dst`.
///
/// Dimensions, global attributes, variable attributes and data are copied.
/// Every variable carrying `row_dim` or `col_dim` is sliced to the selection;
/// `masked_variable` is masked before slicing. An empty selection produces
/// zero-length grid dimensions.
pub fn write_subset(src: &Path, dst: &Path, spec: &SubsetSpec<'_>) -> NetCdfResult<SubsetSummary> {
    silence_hdf5_errors();

    let input = netcdf::open(src)?;
    let mut output = netcdf::create(dst)?;

    for attr in input.attributes() {
        let name = attr.name().to_string();
        output.add_attribute(&name, attr.value()?)?;
    }

    let mut row_len = None;
    let mut col_len = None;
    for dim in input.dimensions() {
        let name = dim.name().to_string();
        let len = if name == spec.row_dim {
            *row_len.insert(spec.selection.rows.len())
        } else if name == spec.col_dim {
            *col_len.insert(spec.selection.cols.len())
        } else {
            dim.len()
        };
        // A zero length makes the dimension unlimited
        output.add_dimension(&name, len)?;
    }
    if row_len.is_none() || col_len.is_none() {
        return Err(NetCdfError::MissingData(format!(
            "dimensions '{}' and '{}'",
            spec.row_dim, spec.col_dim
        )));
    }

    let mut summary = SubsetSummary {
        shape: spec.selection.shape(),
        ..Default::default()
    };

    for var in input.variables() {
        let name = var.name().to_string();
        let copied = dispatch_numeric!(var.vartype(), T => {
            copy_variable::<T>(&var, &mut output, spec).map(Some)
        }, _other => Ok(None))?;

        match copied {
            Some(masked) => {
                summary.variables_written += 1;
                summary.masked_samples += masked;
            }
            None => {
                warn!(variable = %name, "Skipping variable with unsupported type");
                summary.skipped.push(name);
            }
        }
    }

    debug!(
        src = %src.display(),
        dst = %dst.display(),
        variables = summary.variables_written,
        masked = summary.masked_samples,
        "Wrote subset"
    );

    Ok(summary)
}

/// Copy one variable, returning how many samples were masked.
fn copy_variable<T>(var: &Variable, output: &mut FileMut, spec: &SubsetSpec<'_>) -> NetCdfResult<usize>
where
    T: NcTypeDescriptor + MaskFill,
{
    let name = var.name().to_string();
    let dims = dimension_names(var);
    let dim_refs: Vec<&str> = dims.iter().map(String::as_str).collect();
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();

    let mut out_var = output.add_variable::<T>(&name, &dim_refs)?;
    for attr in var.attributes() {
        let attr_name = attr.name().to_string();
        out_var.put_attribute(&attr_name, attr.value()?)?;
    }

    let mut data: Vec<T> = var.get_values::<T, _>(..)?;

    let row_axis = dims.iter().position(|d| d == spec.row_dim);
    let col_axis = dims.iter().position(|d| d == spec.col_dim);

    let mut masked = 0;
    if name == spec.masked_variable {
        let (row_axis, col_axis) = row_axis.zip(col_axis).ok_or_else(|| {
            NetCdfError::InvalidFormat(format!("{} does not span both grid dimensions", name))
        })?;
        masked = apply_mask_axes(&mut data, &shape, row_axis, col_axis, spec.mask, T::mask_fill(var))?;
    }

    let keep: Vec<Option<&[usize]>> = dims
        .iter()
        .map(|d| {
            if d == spec.row_dim {
                Some(spec.selection.rows.as_slice())
            } else if d == spec.col_dim {
                Some(spec.selection.cols.as_slice())
            } else {
                None
            }
        })
        .collect();
    let (sliced, _) = slice_axes(&data, &shape, &keep)?;

    if !sliced.is_empty() {
        out_var.put_values(&sliced, ..)?;
    }
    Ok(masked)
}

/// Overwrite the `band_wavelength` value of an existing file in place.
///
/// Operate on a scratch copy; the file is modified directly.
pub fn write_band_wavelength(path: &Path, wavelength: f32) -> NetCdfResult<()> {
    silence_hdf5_errors();

    let mut file = netcdf::append(path)?;
    let mut var = file
        .variable_mut("band_wavelength")
        .ok_or_else(|| NetCdfError::MissingData("band_wavelength variable".to_string()))?;

    let len = var.len().max(1);
    dispatch_numeric!(var.vartype(), T => {
        let values = vec![wavelength as T; len];
        var.put_values(&values, ..)?;
        Ok(())
    }, other => Err(NetCdfError::InvalidFormat(format!(
        "band_wavelength has unsupported type {:?}",
        other
    ))))
}
