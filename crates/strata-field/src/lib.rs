//! Scalar height fields: the grid type, seeded multi-octave noise synthesis,
//! and the radial island falloff mask.

mod falloff;
mod grid;
mod noise_field;

pub use falloff::{FALLOFF_SHARPNESS, FALLOFF_SHIFT, FalloffCache, generate_falloff};
pub use grid::{FieldError, HeightField};
pub use noise_field::{DEGENERATE_RANGE_VALUE, NoiseParams, generate_noise};
