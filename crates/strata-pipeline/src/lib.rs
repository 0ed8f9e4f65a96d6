//! End-to-end terrain chunk generation: configuration, the
//! noise → falloff → regions → mesh pipeline, and PNG preview export.

mod config;
mod pipeline;
mod preview;

pub use config::{ConfigError, TerrainAssets};
pub use pipeline::{Pipeline, PipelineError, TerrainChunk, generate};
pub use preview::{PreviewError, write_color_png, write_height_png};
