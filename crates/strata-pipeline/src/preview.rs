//! PNG preview export of generated height and color buffers.
//!
//! Debug/preview output only; the renderable surfaces remain the in-memory
//! buffers the pipeline returns.

use std::path::Path;

use image::RgbaImage;
use strata_field::HeightField;
use strata_regions::{RegionMap, height_to_rgba8};

/// Errors produced while encoding or writing a preview image.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// PNG encoding or file I/O failed.
    #[error("failed to write preview image: {0}")]
    Image(#[from] image::ImageError),
}

fn image_from_rgba8(width: usize, height: usize, pixels: Vec<u8>) -> RgbaImage {
    RgbaImage::from_raw(width as u32, height as u32, pixels)
        .expect("pixel buffer length matches dimensions")
}

/// Write a height field as a grayscale PNG, black at 0 and white at 1.
pub fn write_height_png(field: &HeightField, path: &Path) -> Result<(), PreviewError> {
    let img = image_from_rgba8(field.width(), field.height(), height_to_rgba8(field));
    img.save(path)?;
    log::debug!("wrote height preview to {}", path.display());
    Ok(())
}

/// Write a classified region map as a color PNG.
pub fn write_color_png(regions: &RegionMap, path: &Path) -> Result<(), PreviewError> {
    let img = image_from_rgba8(regions.width(), regions.height(), regions.to_rgba8());
    img.save(path)?;
    log::debug!("wrote color preview to {}", path.display());
    Ok(())
}
