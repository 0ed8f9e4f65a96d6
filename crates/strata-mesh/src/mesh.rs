//! Output buffers of a synthesized terrain mesh.

use glam::{Vec2, Vec3};

/// Flat vertex and index buffers produced by [`crate::synthesize`], in a
/// neutral in-memory layout ready for an external display layer to upload.
///
/// Buffers are exclusively owned by the caller once returned; the internal
/// border skirt used for normal accuracy is consumed before this struct is
/// built and never appears here.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Per-vertex texture coordinates.
    pub uvs: Vec<Vec2>,
    /// Per-vertex unit normals.
    pub normals: Vec<Vec3>,
    /// Triangle list, 3 indices per face.
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Number of renderable vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// `true` if every index points into the vertex buffers and the parallel
    /// buffers agree in length.
    pub fn is_consistent(&self) -> bool {
        let n = self.positions.len();
        self.uvs.len() == n
            && self.normals.len() == n
            && self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < n)
    }
}
