//! First-match threshold classification of a height field.

use rayon::prelude::*;
use strata_field::HeightField;

use crate::color::Color;
use crate::threshold::RegionThreshold;

/// Errors produced while validating a region table.
#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    /// The table holds no regions at all.
    #[error("region table is empty")]
    EmptyTable,

    /// Ceilings are not in ascending order.
    #[error("region '{name}' at index {index} has ceiling {ceiling} below its predecessor {previous}")]
    NotSorted {
        /// Index of the out-of-order entry.
        index: usize,
        /// Name of the out-of-order entry.
        name: String,
        /// Its ceiling.
        ceiling: f32,
        /// The preceding entry's ceiling.
        previous: f32,
    },

    /// The final ceiling is below 1.0, so some heights would stay unclassified.
    #[error("last region ceiling {ceiling} is below 1.0; heights above it would be unclassified")]
    IncompleteCoverage {
        /// The final entry's ceiling.
        ceiling: f32,
    },
}

/// Per-cell classification result: one color and one region index per cell of
/// the input field, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionMap {
    width: usize,
    height: usize,
    colors: Vec<Color>,
    indices: Vec<u16>,
}

impl RegionMap {
    /// Width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major per-cell colors.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Row-major per-cell region indices into the threshold table.
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Region index at `(x, y)`.
    pub fn index_at(&self, x: usize, y: usize) -> u16 {
        self.indices[y * self.width + x]
    }

    /// Flatten the color buffer to 8-bit RGBA pixels.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(self.colors.len() * 4);
        for color in &self.colors {
            pixels.extend_from_slice(&color.to_rgba8());
        }
        pixels
    }
}

/// Validate the table: non-empty, ascending ceilings, terminal ceiling ≥ 1.
fn validate(thresholds: &[RegionThreshold]) -> Result<(), RegionError> {
    let last = thresholds.last().ok_or(RegionError::EmptyTable)?;
    for (index, pair) in thresholds.windows(2).enumerate() {
        if pair[1].ceiling < pair[0].ceiling {
            return Err(RegionError::NotSorted {
                index: index + 1,
                name: pair[1].name.clone(),
                ceiling: pair[1].ceiling,
                previous: pair[0].ceiling,
            });
        }
    }
    if last.ceiling < 1.0 {
        return Err(RegionError::IncompleteCoverage {
            ceiling: last.ceiling,
        });
    }
    Ok(())
}

/// Classify every cell of `field` against the ordered `thresholds`.
///
/// Each cell gets the first region whose ceiling is at or above the cell's
/// height. The table is validated up front; classification itself cannot
/// fail, and validation guarantees every height in [0, 1] is covered.
///
/// # Errors
///
/// Returns a [`RegionError`] when the table is empty, unsorted, or its last
/// ceiling is below 1.0.
pub fn classify(
    field: &HeightField,
    thresholds: &[RegionThreshold],
) -> Result<RegionMap, RegionError> {
    validate(thresholds)?;

    let terminal = (thresholds.len() - 1) as u16;
    let mut indices = vec![0u16; field.values().len()];
    indices
        .par_iter_mut()
        .zip(field.values().par_iter())
        .for_each(|(slot, &height)| {
            *slot = thresholds
                .iter()
                .position(|t| t.ceiling >= height)
                .map_or(terminal, |i| i as u16);
        });

    let colors = indices
        .iter()
        .map(|&i| thresholds[i as usize].color)
        .collect();

    Ok(RegionMap {
        width: field.width(),
        height: field.height(),
        colors,
        indices,
    })
}
