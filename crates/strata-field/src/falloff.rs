//! Radial island falloff mask.
//!
//! A pure function of grid size: each cell's Chebyshev distance from the
//! center, mapped through a smoothstep-like shaping curve, producing a soft
//! square island boundary that callers subtract from a noise field.

use rayon::prelude::*;

use crate::grid::{FieldError, HeightField};

/// Exponent of the shaping curve. Higher values sharpen the transition band.
pub const FALLOFF_SHARPNESS: f32 = 3.0;

/// Horizontal shift of the shaping curve. Higher values push the transition
/// band toward the grid edge.
pub const FALLOFF_SHIFT: f32 = 2.2;

/// Shaping curve `v^a / (v^a + (b - b·v)^a)`.
///
/// Maps 0 → 0 and 1 → 1 with a soft S-shaped transition between.
fn shape(v: f32) -> f32 {
    let a = FALLOFF_SHARPNESS;
    let b = FALLOFF_SHIFT;
    let va = v.powf(a);
    va / (va + (b - b * v).powf(a))
}

/// Generate a `size × size` falloff mask with values in [0, 1].
///
/// Deterministic and seedless: two calls with the same size return identical
/// fields, and the mask is symmetric under 90° rotation.
///
/// # Errors
///
/// Returns [`FieldError::EmptyField`] when `size` is zero.
pub fn generate_falloff(size: usize) -> Result<HeightField, FieldError> {
    if size == 0 {
        return Err(FieldError::EmptyField {
            width: size,
            height: size,
        });
    }

    // Sample at cell centers so the mask is exactly symmetric under rotation.
    let mut values = vec![0.0f32; size * size];
    values.par_chunks_mut(size).enumerate().for_each(|(y, row)| {
        let fy = (y as f32 + 0.5) / size as f32 * 2.0 - 1.0;
        for (x, cell) in row.iter_mut().enumerate() {
            let fx = (x as f32 + 0.5) / size as f32 * 2.0 - 1.0;
            let v = fx.abs().max(fy.abs());
            *cell = shape(v).clamp(0.0, 1.0);
        }
    });

    HeightField::from_values(size, size, values)
}

/// Caches the most recent falloff mask and reuses it while the requested
/// size is unchanged. The mask depends on nothing but `size`, so this is the
/// only cross-call state the generation pipeline keeps.
#[derive(Debug, Default)]
pub struct FalloffCache {
    cached: Option<HeightField>,
}

impl FalloffCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the mask for `size`, generating it only on size change.
    pub fn get(&mut self, size: usize) -> Result<&HeightField, FieldError> {
        let stale = self
            .cached
            .as_ref()
            .is_none_or(|mask| mask.width() != size);
        if stale {
            self.cached = Some(generate_falloff(size)?);
        }
        Ok(self.cached.as_ref().expect("cache was just filled"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_repeat_calls_identical() {
        let a = generate_falloff(33).expect("generate");
        let b = generate_falloff(33).expect("generate");
        assert_eq!(a.values(), b.values(), "falloff must be a pure function of size");
    }

    #[test]
    fn test_values_in_unit_interval() {
        let mask = generate_falloff(64).expect("generate");
        for &v in mask.values() {
            assert!((0.0..=1.0).contains(&v), "mask value {v} outside [0, 1]");
        }
    }

    #[test]
    fn test_rotational_symmetry() {
        let n = 41;
        let mask = generate_falloff(n).expect("generate");
        for y in 0..n {
            for x in 0..n {
                // 90° rotation maps (x, y) to (y, n-1-x).
                let rotated = mask.get(y, n - 1 - x);
                let original = mask.get(x, y);
                assert!(
                    (original - rotated).abs() < 1e-5,
                    "asymmetry at ({x}, {y}): {original} vs {rotated}"
                );
            }
        }
    }

    #[test]
    fn test_center_low_edge_high() {
        let n = 65;
        let mask = generate_falloff(n).expect("generate");
        let center = mask.get(n / 2, n / 2);
        let corner = mask.get(0, 0);
        assert!(
            center < 0.05,
            "center of the island should be nearly open, got {center}"
        );
        assert!(
            corner > 0.95,
            "corner should be nearly fully masked, got {corner}"
        );
    }

    #[test]
    fn test_shape_endpoints() {
        assert!(shape(0.0).abs() < 1e-6);
        assert!((shape(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cache_reuses_for_same_size() {
        let mut cache = FalloffCache::new();
        let first = cache.get(16).expect("generate").clone();
        let second = cache.get(16).expect("generate").clone();
        assert_eq!(first, second);

        let resized = cache.get(8).expect("generate");
        assert_eq!(resized.width(), 8);
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(matches!(
            generate_falloff(0).unwrap_err(),
            FieldError::EmptyField { .. }
        ));
    }
}
