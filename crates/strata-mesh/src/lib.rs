//! Level-of-detail terrain mesh synthesis from a bordered height field.
//!
//! The input field carries a one-cell skirt of neighboring-chunk samples on
//! every side. Skirt vertices participate in normal accumulation but never
//! reach the output buffers, which is what keeps shading seamless across
//! adjacent chunks without the neighbors being resident.

mod curve;
mod mesh;
mod synthesize;

pub use curve::{CurveKey, HeightCurve};
pub use mesh::TerrainMesh;
pub use synthesize::{MeshError, VertexIndex, synthesize};
