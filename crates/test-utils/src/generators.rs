//! Test data generators for synthetic Cloud and Moisture Imagery.

/// Creates a `(height × width)` grid with predictable values.
///
/// Each cell value is `col * 1000 + row`, so a cropped or masked copy can be
/// checked cell by cell against its source position.
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50);
/// assert_eq!(grid[1], 1000.0);  // col=1, row=0
/// assert_eq!(grid[10], 1.0);    // col=0, row=1
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f32);
        }
    }
    data
}

/// Pack scan-angle values into `i16` with the given scale and offset.
pub fn pack_axis(values: &[f64], scale_factor: f64, add_offset: f64) -> Vec<i16> {
    values
        .iter()
        .map(|v| ((v - add_offset) / scale_factor).round() as i16)
        .collect()
}
