//! The generation pipeline: noise field, optional falloff combine, region
//! classification, and mesh synthesis.
//!
//! A pipeline run is a pure function of its configuration. The only state a
//! [`Pipeline`] keeps between runs is the cached falloff mask, which depends
//! on nothing but the grid size.

use std::time::Instant;

use strata_field::{FalloffCache, FieldError, HeightField, generate_noise};
use strata_mesh::{MeshError, TerrainMesh, synthesize};
use strata_regions::{RegionError, RegionMap, classify};

use crate::config::TerrainAssets;

/// Errors surfaced by a pipeline run. All are detected synchronously; a
/// failed run returns no partial buffers.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Noise or falloff generation failed.
    #[error("height field generation failed: {0}")]
    Field(#[from] FieldError),

    /// The region table was rejected.
    #[error("region classification failed: {0}")]
    Regions(#[from] RegionError),

    /// Mesh synthesis inputs were rejected.
    #[error("mesh synthesis failed: {0}")]
    Mesh(#[from] MeshError),
}

/// Everything one generation call produces, handed to the caller as owned
/// values.
#[derive(Clone, Debug)]
pub struct TerrainChunk {
    /// The normalized (and optionally falloff-shaped) height field.
    pub height_field: HeightField,
    /// Per-cell colors and region indices.
    pub regions: RegionMap,
    /// The renderable LOD mesh.
    pub mesh: TerrainMesh,
}

/// Reusable pipeline with a cached falloff mask.
#[derive(Debug, Default)]
pub struct Pipeline {
    falloff: FalloffCache,
}

impl Pipeline {
    /// Create a pipeline with an empty falloff cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the full pipeline for `assets`.
    ///
    /// Stages: noise synthesis, optional falloff subtraction clamped to
    /// [0, 1], region classification, mesh synthesis. The returned chunk is
    /// fully owned by the caller.
    pub fn generate(&mut self, assets: &TerrainAssets) -> Result<TerrainChunk, PipelineError> {
        let started = Instant::now();
        let size = assets.map_size;

        let mut height_field = generate_noise(size, size, &assets.noise)?;

        if assets.use_falloff {
            let mask = self.falloff.get(size)?;
            let values = height_field
                .values()
                .iter()
                .zip(mask.values())
                .map(|(&h, &f)| (h - f).clamp(0.0, 1.0))
                .collect();
            height_field = HeightField::from_values(size, size, values)?;
        }

        let regions = classify(&height_field, &assets.regions)?;

        let mesh = synthesize(
            &height_field,
            &assets.curve(),
            assets.height_multiplier,
            assets.lod,
            assets.flat_shading,
        )?;

        log::info!(
            "generated {size}x{size} chunk: {} vertices, {} triangles, lod {}, {} us",
            mesh.vertex_count(),
            mesh.triangle_count(),
            assets.lod,
            started.elapsed().as_micros()
        );

        Ok(TerrainChunk {
            height_field,
            regions,
            mesh,
        })
    }
}

/// One-shot generation without keeping a falloff cache around.
pub fn generate(assets: &TerrainAssets) -> Result<TerrainChunk, PipelineError> {
    Pipeline::new().generate(assets)
}
