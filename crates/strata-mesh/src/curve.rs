//! Piecewise-linear height response curve.

use serde::{Deserialize, Serialize};

/// One keyframe of a [`HeightCurve`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    /// Input height, normally in [0, 1].
    pub time: f32,
    /// Output value at `time`.
    pub value: f32,
}

impl CurveKey {
    /// Keyframe at `(time, value)`.
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// A scalar-to-scalar mapping sampled once per input height during mesh
/// synthesis, interpolated linearly between sorted keyframes and clamped to
/// the first/last value outside their range.
///
/// Owned by the caller and read-only during synthesis. An empty curve
/// behaves as the identity mapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightCurve {
    keys: Vec<CurveKey>,
}

impl HeightCurve {
    /// Build a curve from keyframes, sorting them by time.
    pub fn new(mut keys: Vec<CurveKey>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// The identity mapping: `evaluate(t) == t`.
    pub fn identity() -> Self {
        Self { keys: Vec::new() }
    }

    /// The sorted keyframes.
    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Evaluate the curve at `t`.
    pub fn evaluate(&self, t: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return t;
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time {
                let span = b.time - a.time;
                if span <= 0.0 {
                    return b.value;
                }
                let frac = (t - a.time) / span;
                return a.value + (b.value - a.value) * frac;
            }
        }
        last.value
    }
}

impl Default for HeightCurve {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_passes_through() {
        let curve = HeightCurve::identity();
        assert_eq!(curve.evaluate(0.0), 0.0);
        assert_eq!(curve.evaluate(0.37), 0.37);
        assert_eq!(curve.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_linear_interpolation_between_keys() {
        let curve = HeightCurve::new(vec![CurveKey::new(0.0, 0.0), CurveKey::new(1.0, 2.0)]);
        assert!((curve.evaluate(0.5) - 1.0).abs() < 1e-6);
        assert!((curve.evaluate(0.25) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_clamps_outside_key_range() {
        let curve = HeightCurve::new(vec![CurveKey::new(0.2, 0.1), CurveKey::new(0.8, 0.9)]);
        assert_eq!(curve.evaluate(-1.0), 0.1);
        assert_eq!(curve.evaluate(0.0), 0.1);
        assert_eq!(curve.evaluate(1.0), 0.9);
        assert_eq!(curve.evaluate(5.0), 0.9);
    }

    #[test]
    fn test_keys_are_sorted_on_construction() {
        let curve = HeightCurve::new(vec![
            CurveKey::new(1.0, 1.0),
            CurveKey::new(0.0, 0.0),
            CurveKey::new(0.5, 0.25),
        ]);
        let times: Vec<f32> = curve.keys().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0]);
        assert!((curve.evaluate(0.75) - 0.625).abs() < 1e-6);
    }

    #[test]
    fn test_flattening_curve_suppresses_low_heights() {
        // A typical terrain curve: keep water flat, let mountains rise.
        let curve = HeightCurve::new(vec![
            CurveKey::new(0.0, 0.0),
            CurveKey::new(0.4, 0.0),
            CurveKey::new(1.0, 1.0),
        ]);
        assert_eq!(curve.evaluate(0.2), 0.0);
        assert!(curve.evaluate(0.7) > 0.0);
    }
}
