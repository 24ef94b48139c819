//! Row-major raster storage shared by every generated layer.

use serde::{Deserialize, Serialize};

use super::GridError;

/// A dense `width x height` raster stored in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Copy> Field<T> {
    /// Creates a field with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Builds a field by evaluating `f(col, row)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                data.push(f(col, row));
            }
        }
        Self { width, height, data }
    }

    /// Wraps an existing row-major buffer.
    ///
    /// Fails if `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, GridError> {
        let expected = width * height;
        if data.len() != expected {
            return Err(GridError::LengthMismatch {
                what: "field",
                width,
                height,
                expected,
                found: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the value at column `col`, row `row`.
    ///
    /// # Panics
    /// Panics if the coordinate is out of bounds.
    pub fn get(&self, col: usize, row: usize) -> T {
        debug_assert!(col < self.width && row < self.height);
        self.data[row * self.width + col]
    }

    pub fn set(&mut self, col: usize, row: usize, value: T) {
        debug_assert!(col < self.width && row < self.height);
        self.data[row * self.width + col] = value;
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter()
    }

    /// Applies `f` to every cell, producing a field of the same shape.
    pub fn map<U: Copy>(&self, f: impl FnMut(T) -> U) -> Field<U> {
        Field {
            width: self.width,
            height: self.height,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Combines two same-shape fields cell by cell.
    pub fn zip_map<U: Copy, V: Copy>(
        &self,
        other: &Field<U>,
        what: &'static str,
        mut f: impl FnMut(T, U) -> V,
    ) -> Result<Field<V>, GridError> {
        self.ensure_shape(other.shape(), what)?;
        Ok(Field {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Returns `ShapeMismatch` unless `shape` equals this field's shape.
    pub fn ensure_shape(&self, shape: (usize, usize), what: &'static str) -> Result<(), GridError> {
        if shape != self.shape() {
            return Err(GridError::ShapeMismatch {
                what,
                expected_width: self.width,
                expected_height: self.height,
                found_width: shape.0,
                found_height: shape.1,
            });
        }
        Ok(())
    }
}

impl Field<f32> {
    /// Returns `(min, max)` over all cells, ignoring NaNs.
    pub fn range(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_is_row_major() {
        let field = Field::from_fn(3, 2, |c, r| (r * 10 + c) as f32);
        assert_eq!(field.as_slice(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(field.get(2, 1), 12.0);
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = Field::from_vec(2, 2, vec![0.0f32; 3]).unwrap_err();
        assert!(matches!(err, GridError::LengthMismatch { expected: 4, found: 3, .. }));
    }

    #[test]
    fn zip_map_checks_shape() {
        let a = Field::filled(2, 2, 1.0f32);
        let b = Field::filled(2, 3, 1.0f32);
        assert!(a.zip_map(&b, "b", |x, y| x + y).is_err());

        let c = Field::filled(2, 2, 2.0f32);
        let sum = a.zip_map(&c, "c", |x, y| x + y).unwrap();
        assert!(sum.iter().all(|&v| v == 3.0));
    }

    #[test]
    fn range_covers_extremes() {
        let mut field = Field::filled(4, 4, 0.5f32);
        field.set(0, 0, -1.0);
        field.set(3, 3, 2.0);
        assert_eq!(field.range(), (-1.0, 2.0));
    }
}
