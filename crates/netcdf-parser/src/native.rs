//! Low-level helpers over the netcdf library.

use std::sync::Once;

use netcdf::types::{IntType, NcVariableType};
use netcdf::{AttributeValue, Variable};

use crate::error::{NetCdfError, NetCdfResult};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist). This creates confusing log spam like:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 3:
///   #003: ../../../src/H5Adense.c line 397 in H5A__dense_open(): can't locate attribute in name index
/// ```
///
/// Call early in `main()`, before any NetCDF operation. Safe to call repeatedly.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Run `$body` with `$T` bound to the Rust type of a numeric NetCDF variable.
///
/// Non-numeric types (strings, chars, user-defined types) fall through to
/// `$other => $fallback`.
macro_rules! dispatch_numeric {
    ($vartype:expr, $T:ident => $body:block, $other:ident => $fallback:expr) => {{
        use netcdf::types::{FloatType, IntType, NcVariableType};
        match $vartype {
            NcVariableType::Int(IntType::U8) => {
                type $T = u8;
                $body
            }
            NcVariableType::Int(IntType::I8) => {
                type $T = i8;
                $body
            }
            NcVariableType::Int(IntType::U16) => {
                type $T = u16;
                $body
            }
            NcVariableType::Int(IntType::I16) => {
                type $T = i16;
                $body
            }
            NcVariableType::Int(IntType::U32) => {
                type $T = u32;
                $body
            }
            NcVariableType::Int(IntType::I32) => {
                type $T = i32;
                $body
            }
            NcVariableType::Int(IntType::U64) => {
                type $T = u64;
                $body
            }
            NcVariableType::Int(IntType::I64) => {
                type $T = i64;
                $body
            }
            NcVariableType::Float(FloatType::F32) => {
                type $T = f32;
                $body
            }
            NcVariableType::Float(FloatType::F64) => {
                type $T = f64;
                $body
            }
            $other => $fallback,
        }
    }};
}
pub(crate) use dispatch_numeric;

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
pub(crate) fn has_attr(var: &Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get a numeric attribute as f64.
pub(crate) fn get_f64_attr(var: &Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}

/// Helper to get a string attribute.
pub(crate) fn get_string_attr(var: &Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

/// Helper to get a required numeric attribute.
pub(crate) fn require_f64_attr(var: &Variable, name: &str) -> NetCdfResult<f64> {
    get_f64_attr(var, name)
        .ok_or_else(|| NetCdfError::MissingData(format!("{}:{}", var.name(), name)))
}

/// Read every value of a numeric variable, widened to f64. No unpacking.
pub(crate) fn read_as_f64(var: &Variable) -> NetCdfResult<Vec<f64>> {
    dispatch_numeric!(var.vartype(), T => {
        let raw: Vec<T> = var.get_values::<T, _>(..)?;
        Ok(raw.into_iter().map(|v| v as f64).collect())
    }, other => Err(NetCdfError::InvalidFormat(format!(
        "variable {} has non-numeric type {:?}",
        var.name(),
        other
    ))))
}

/// Read a CF-packed variable: honour `_Unsigned`, then apply
/// `scale_factor` and `add_offset`.
pub(crate) fn read_unpacked(var: &Variable) -> NetCdfResult<Vec<f64>> {
    let unsigned = get_string_attr(var, "_Unsigned").map_or(false, |s| s.eq_ignore_ascii_case("true"));
    let wrap = match (unsigned, var.vartype()) {
        (true, NcVariableType::Int(IntType::I8)) => Some(256.0),
        (true, NcVariableType::Int(IntType::I16)) => Some(65536.0),
        (true, NcVariableType::Int(IntType::I32)) => Some(4294967296.0),
        _ => None,
    };
    let scale = get_f64_attr(var, "scale_factor").unwrap_or(1.0);
    let offset = get_f64_attr(var, "add_offset").unwrap_or(0.0);

    let values = read_as_f64(var)?;
    Ok(values
        .into_iter()
        .map(|v| match wrap {
            Some(w) if v < 0.0 => v + w,
            _ => v,
        })
        .map(|v| v * scale + offset)
        .collect())
}

/// Names of a variable's dimensions, in storage order.
pub(crate) fn dimension_names(var: &Variable) -> Vec<String> {
    var.dimensions().iter().map(|d| d.name().to_string()).collect()
}
