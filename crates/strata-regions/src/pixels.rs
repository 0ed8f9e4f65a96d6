//! Height-field to grayscale pixel conversion for preview surfaces.

use strata_field::HeightField;

use crate::color::Color;

/// Convert a normalized height field to 8-bit RGBA pixels, lerping each cell
/// from black (height 0) to white (height 1).
pub fn height_to_rgba8(field: &HeightField) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(field.values().len() * 4);
    for &h in field.values() {
        let color = Color::BLACK.lerp(Color::WHITE, h);
        pixels.extend_from_slice(&color.to_rgba8());
    }
    pixels
}
