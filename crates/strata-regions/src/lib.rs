//! Height-based region classification: maps a normalized height field onto an
//! ordered threshold table, producing per-cell colors and region indices for
//! an external renderer.

mod classify;
mod color;
mod pixels;
mod threshold;

pub use classify::{RegionError, RegionMap, classify};
pub use color::Color;
pub use pixels::height_to_rgba8;
pub use threshold::{RegionTextures, RegionThreshold};
