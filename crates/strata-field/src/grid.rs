//! Row-major 2D scalar grid, immutable after construction.

/// Errors produced while constructing or generating a [`HeightField`].
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// Field dimensions must be at least 1×1.
    #[error("field dimensions must be at least 1x1, got {width}x{height}")]
    EmptyField {
        /// Requested width in cells.
        width: usize,
        /// Requested height in cells.
        height: usize,
    },

    /// The supplied value buffer does not match the requested dimensions.
    #[error("value buffer holds {len} cells, expected {width}x{height} = {expected}")]
    LengthMismatch {
        /// Requested width in cells.
        width: usize,
        /// Requested height in cells.
        height: usize,
        /// `width * height`.
        expected: usize,
        /// Actual buffer length.
        len: usize,
    },

    /// A cell held NaN or an infinity.
    #[error("non-finite value {value} at cell ({x}, {y})")]
    NonFinite {
        /// Cell x coordinate.
        x: usize,
        /// Cell y coordinate.
        y: usize,
        /// The offending value.
        value: f32,
    },
}

/// An owned 2D array of scalar values, row-major (`y * width + x`).
///
/// Once constructed the field is read-only; generators hand ownership to the
/// caller and retain nothing. Every cell is guaranteed finite.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl HeightField {
    /// Wrap an existing value buffer, validating dimensions and finiteness.
    pub fn from_values(width: usize, height: usize, values: Vec<f32>) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::EmptyField { width, height });
        }
        let expected = width * height;
        if values.len() != expected {
            return Err(FieldError::LengthMismatch {
                width,
                height,
                expected,
                len: values.len(),
            });
        }
        for (i, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(FieldError::NonFinite {
                    x: i % width,
                    y: i / width,
                    value,
                });
            }
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `true` if the field has equal width and height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of range.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        assert!(x < self.width && y < self.height, "cell out of range");
        self.values[y * self.width + x]
    }

    /// The full row-major value buffer.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Consume the field, returning its value buffer.
    pub fn into_values(self) -> Vec<f32> {
        self.values
    }

    /// Minimum and maximum cell values.
    pub fn min_max(&self) -> (f32, f32) {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for &v in &self.values {
            min = min.min(v);
            max = max.max(v);
        }
        (min, max)
    }
}
