//! Terrain asset configuration with RON persistence.
//!
//! Everything a generation call needs is collected here and treated as
//! read-only for the duration of the call. Loading sanitizes out-of-range
//! values instead of failing, mirroring how the parameters behave inside the
//! generators themselves.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strata_field::NoiseParams;
use strata_mesh::{CurveKey, HeightCurve};
use strata_regions::{Color, RegionThreshold};

/// Errors that can occur when loading or saving terrain configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    Write(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),
}

/// Full configuration of one terrain chunk generation call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainAssets {
    /// Bordered grid size in cells (renderable area is two cells smaller).
    pub map_size: usize,
    /// Fractal noise parameters.
    pub noise: NoiseParams,
    /// Vertical exaggeration applied after the height curve.
    pub height_multiplier: f32,
    /// Height response curve keyframes.
    pub height_curve: Vec<CurveKey>,
    /// Subtract the radial falloff mask from the noise field.
    pub use_falloff: bool,
    /// Level of detail (0 = full resolution).
    pub lod: u32,
    /// Duplicate vertices per triangle for hard face edges.
    pub flat_shading: bool,
    /// Ordered region table, ascending by ceiling.
    pub regions: Vec<RegionThreshold>,
}

impl Default for TerrainAssets {
    fn default() -> Self {
        Self {
            map_size: 239,
            noise: NoiseParams::default(),
            height_multiplier: 10.0,
            height_curve: vec![
                CurveKey::new(0.0, 0.0),
                CurveKey::new(0.4, 0.0),
                CurveKey::new(1.0, 1.0),
            ],
            use_falloff: false,
            lod: 0,
            flat_shading: false,
            regions: default_regions(),
        }
    }
}

impl TerrainAssets {
    /// Load a config from a RON file, sanitizing parameter ranges.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(ConfigError::Read)?;
        let mut assets: Self = ron::from_str(&content).map_err(ConfigError::Parse)?;
        assets.sanitize();
        log::info!("loaded terrain config from {}", path.display());
        Ok(assets)
    }

    /// Save the config as pretty-printed RON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(ConfigError::Serialize)?;
        fs::write(path, content).map_err(ConfigError::Write)?;
        log::info!("saved terrain config to {}", path.display());
        Ok(())
    }

    /// Clamp parameters into their usable ranges in place.
    pub fn sanitize(&mut self) {
        if self.noise.lacunarity < 1.0 {
            log::warn!(
                "lacunarity {} below 1, clamping to 1",
                self.noise.lacunarity
            );
            self.noise.lacunarity = 1.0;
        }
    }

    /// The height curve as an evaluatable object.
    pub fn curve(&self) -> HeightCurve {
        HeightCurve::new(self.height_curve.clone())
    }

    /// Lowest possible vertex elevation: `multiplier * curve(0)`.
    pub fn min_height(&self) -> f32 {
        self.height_multiplier * self.curve().evaluate(0.0)
    }

    /// Highest possible vertex elevation: `multiplier * curve(1)`.
    pub fn max_height(&self) -> f32 {
        self.height_multiplier * self.curve().evaluate(1.0)
    }
}

/// The default water-to-snow palette.
fn default_regions() -> Vec<RegionThreshold> {
    vec![
        RegionThreshold::new("deep water", 0.3, Color::rgb(0.02, 0.17, 0.67)),
        RegionThreshold::new("shallow water", 0.4, Color::rgb(0.02, 0.33, 0.81)),
        RegionThreshold::new("sand", 0.45, Color::rgb(0.82, 0.83, 0.51)),
        RegionThreshold::new("grass", 0.55, Color::rgb(0.34, 0.63, 0.09)),
        RegionThreshold::new("forest", 0.6, Color::rgb(0.26, 0.47, 0.08)),
        RegionThreshold::new("rock", 0.7, Color::rgb(0.35, 0.23, 0.22)),
        RegionThreshold::new("mountain", 0.9, Color::rgb(0.29, 0.19, 0.18)),
        RegionThreshold::new("snow", 1.0, Color::WHITE),
    ]
}
