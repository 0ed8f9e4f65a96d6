//! Region threshold table entries.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// References to the surface textures an external renderer should bind for a
/// region. The core never loads or packs these; they are opaque asset names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionTextures {
    /// Base albedo texture.
    pub base: String,
    /// Normal map.
    pub normal: String,
    /// Ambient occlusion map.
    pub occlusion: String,
    /// Gloss / smoothness map.
    pub gloss: String,
}

/// One entry of the ordered region table.
///
/// A cell belongs to the first region whose `ceiling` is at or above the
/// cell's height, so the table must be sorted ascending by `ceiling` and end
/// with a ceiling of at least 1.0. [`crate::classify`] validates both.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionThreshold {
    /// Display name, e.g. "water" or "snow".
    pub name: String,
    /// Upper height bound (inclusive) of this region.
    pub ceiling: f32,
    /// Flat color assigned to cells in this region.
    pub color: Color,
    /// Optional surface texture references for an external renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textures: Option<RegionTextures>,
}

impl RegionThreshold {
    /// Plain color region without texture references.
    pub fn new(name: impl Into<String>, ceiling: f32, color: Color) -> Self {
        Self {
            name: name.into(),
            ceiling,
            color,
            textures: None,
        }
    }
}
