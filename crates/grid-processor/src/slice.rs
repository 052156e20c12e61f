//! N-dimensional index slicing of row-major arrays.

use crate::error::{GridProcessorError, Result};

/// Keep the listed indices along each axis of a row-major array.
///
/// `keep[axis]` is `None` to keep the whole axis, or the ordered indices to
/// retain. Returns the sliced data and its new shape. An empty index list
/// gives a zero-length axis and an empty result.
pub fn slice_axes<T: Copy>(
    data: &[T],
    shape: &[usize],
    keep: &[Option<&[usize]>],
) -> Result<(Vec<T>, Vec<usize>)> {
    let expected: usize = shape.iter().product();
    if data.len() != expected {
        return Err(GridProcessorError::ShapeMismatch {
            shape: shape.to_vec(),
            expected,
            actual: data.len(),
        });
    }
    if keep.len() != shape.len() {
        return Err(GridProcessorError::AxisCount {
            expected: shape.len(),
            actual: keep.len(),
        });
    }

    let indices: Vec<Vec<usize>> = shape
        .iter()
        .zip(keep)
        .enumerate()
        .map(|(axis, (&len, sel))| match sel {
            None => Ok((0..len).collect()),
            Some(list) => match list.iter().find(|&&i| i >= len) {
                Some(&index) => Err(GridProcessorError::IndexOutOfRange { axis, index, len }),
                None => Ok(list.to_vec()),
            },
        })
        .collect::<Result<_>>()?;

    let new_shape: Vec<usize> = indices.iter().map(Vec::len).collect();
    let total: usize = new_shape.iter().product();
    if total == 0 {
        return Ok((Vec::new(), new_shape));
    }

    // Row-major strides of the source
    let mut strides = vec![1usize; shape.len()];
    for axis in (0..shape.len().saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * shape[axis + 1];
    }

    let mut out = Vec::with_capacity(total);
    let mut cursor = vec![0usize; shape.len()];
    for _ in 0..total {
        let offset: usize = cursor
            .iter()
            .zip(&indices)
            .zip(&strides)
            .map(|((&pos, idx), stride)| idx[pos] * stride)
            .sum();
        out.push(data[offset]);

        // Odometer increment, last axis fastest
        for axis in (0..cursor.len()).rev() {
            cursor[axis] += 1;
            if cursor[axis] < new_shape[axis] {
                break;
            }
            cursor[axis] = 0;
        }
    }

    Ok((out, new_shape))
}
