//! Mesh synthesis over the bordered, LOD-strided sample grid.
//!
//! Phasing follows the data dependencies: vertex positions and UVs are
//! emitted in parallel (each sample owns one output slot), then, after the
//! join, triangles are routed and normals accumulated sequentially, since normal
//! accumulation sums into shared per-vertex slots and must see the complete
//! triangle set.

use glam::{Vec2, Vec3};
use rayon::prelude::*;
use strata_field::HeightField;

use crate::curve::HeightCurve;
use crate::mesh::TerrainMesh;

/// Sample-grid slot of a vertex: renderable interior, or border-skirt.
///
/// Border vertices exist only for normal accumulation; they carry positions
/// in a separate buffer and are dropped before the mesh is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexIndex {
    /// Index into the renderable vertex buffers.
    Interior(u32),
    /// Index into the internal border position buffer.
    Border(u32),
}

/// Errors produced while validating mesh synthesis inputs.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    /// The bordered height field must be square.
    #[error("bordered height field must be square, got {width}x{height}")]
    NotSquare {
        /// Field width in cells.
        width: usize,
        /// Field height in cells.
        height: usize,
    },

    /// The bordered field is too small to contain any renderable area.
    #[error("bordered size {bordered} leaves no renderable area")]
    TooSmall {
        /// Bordered field size.
        bordered: usize,
    },

    /// The LOD stride simplifies the grid below one renderable quad.
    #[error("lod {lod} yields {vertices_per_line} vertices per line, need at least 2")]
    LodTooCoarse {
        /// Requested LOD level.
        lod: u32,
        /// Resulting interior vertices per line.
        vertices_per_line: usize,
    },
}

/// Sampled line coordinates for one axis of the bordered grid.
///
/// The border ring always sits at cells `0` and `bordered - 1`; the interior
/// starts at cell `1` and strides by `step`. At LOD 0 this is every cell.
fn sample_coords(bordered: usize, step: usize, vpl: usize) -> Vec<usize> {
    let mut coords = Vec::with_capacity(vpl + 2);
    coords.push(0);
    for i in 0..vpl {
        coords.push(1 + i * step);
    }
    coords.push(bordered - 1);
    coords
}

/// Map a sample-grid slot `(i, j)` to its tagged vertex index.
///
/// Interior vertices are numbered row-major over the interior sample grid;
/// border vertices row-major over the ring.
fn vertex_index(i: usize, j: usize, n: usize, vpl: usize) -> VertexIndex {
    let on_border = i == 0 || j == 0 || i == n - 1 || j == n - 1;
    if !on_border {
        return VertexIndex::Interior(((j - 1) * vpl + (i - 1)) as u32);
    }
    let ordinal = if j == 0 {
        i
    } else if j == n - 1 {
        n + 2 * (n - 2) + i
    } else {
        n + 2 * (j - 1) + usize::from(i != 0)
    };
    VertexIndex::Border(ordinal as u32)
}

/// Synthesize a triangulated terrain surface from a bordered height field.
///
/// `lod` selects the simplification stride `step = if lod == 0 { 1 } else
/// { lod * 2 }`. The renderable area is `mesh_size = bordered - 2` cells wide;
/// heights pass through `curve` and `height_multiplier` before becoming
/// vertex elevations. With `flat_shading` the shared-vertex scheme is
/// replaced by per-triangle duplicated vertices and one face normal each.
///
/// # Errors
///
/// Fails on a non-square field, a field too small for any renderable area,
/// or an LOD stride that leaves fewer than 2 interior vertices per line.
pub fn synthesize(
    field: &HeightField,
    curve: &HeightCurve,
    height_multiplier: f32,
    lod: u32,
    flat_shading: bool,
) -> Result<TerrainMesh, MeshError> {
    let bordered = field.width();
    if !field.is_square() {
        return Err(MeshError::NotSquare {
            width: field.width(),
            height: field.height(),
        });
    }
    if bordered < 3 {
        return Err(MeshError::TooSmall { bordered });
    }

    let mesh_size = bordered - 2;
    let step = if lod == 0 { 1 } else { lod as usize * 2 };
    let vpl = (mesh_size - 1) / step + 1;
    if vpl < 2 {
        return Err(MeshError::LodTooCoarse {
            lod,
            vertices_per_line: vpl,
        });
    }

    let coords = sample_coords(bordered, step, vpl);
    let n = coords.len();

    // Height response is sampled once per bordered cell before emission.
    let mut elevations = vec![0.0f32; bordered * bordered];
    elevations
        .par_iter_mut()
        .zip(field.values().par_iter())
        .for_each(|(out, &h)| *out = curve.evaluate(h) * height_multiplier);

    // Phase 1 (parallel): every sample computes its position and UV into its
    // own slot of the sample grid.
    let top_left_x = -((mesh_size - 1) as f32) / 2.0;
    let top_left_z = (mesh_size - 1) as f32 / 2.0;
    let mut samples = vec![(Vec3::ZERO, Vec2::ZERO); n * n];
    samples.par_chunks_mut(n).enumerate().for_each(|(j, row)| {
        let cell_y = coords[j];
        let percent_y = (cell_y as f32 - 1.0) / mesh_size as f32;
        for (i, slot) in row.iter_mut().enumerate() {
            let cell_x = coords[i];
            let percent_x = (cell_x as f32 - 1.0) / mesh_size as f32;
            let elevation = elevations[cell_y * bordered + cell_x];
            let position = Vec3::new(
                top_left_x + percent_x * mesh_size as f32,
                elevation,
                top_left_z - percent_y * mesh_size as f32,
            );
            *slot = (position, Vec2::new(percent_x, percent_y));
        }
    });

    // Scatter samples into the renderable and border buffers.
    let interior_count = vpl * vpl;
    let border_count = 4 * n - 4;
    let mut positions = vec![Vec3::ZERO; interior_count];
    let mut uvs = vec![Vec2::ZERO; interior_count];
    let mut border_positions = vec![Vec3::ZERO; border_count];
    for j in 0..n {
        for i in 0..n {
            let (position, uv) = samples[j * n + i];
            match vertex_index(i, j, n, vpl) {
                VertexIndex::Interior(v) => {
                    positions[v as usize] = position;
                    uvs[v as usize] = uv;
                }
                VertexIndex::Border(b) => border_positions[b as usize] = position,
            }
        }
    }

    // Phase 2 (sequential): route triangles. A triangle touching the border
    // ring feeds normals only; the rest form the index buffer.
    let mut indices: Vec<u32> = Vec::with_capacity((vpl - 1) * (vpl - 1) * 6);
    let mut border_triangles: Vec<[VertexIndex; 3]> = Vec::new();
    let mut push = |a: VertexIndex, b: VertexIndex, c: VertexIndex| {
        if let (VertexIndex::Interior(a), VertexIndex::Interior(b), VertexIndex::Interior(c)) =
            (a, b, c)
        {
            indices.extend_from_slice(&[a, b, c]);
        } else {
            border_triangles.push([a, b, c]);
        }
    };
    for j in 0..n - 1 {
        for i in 0..n - 1 {
            let a = vertex_index(i, j, n, vpl);
            let b = vertex_index(i + 1, j, n, vpl);
            let c = vertex_index(i, j + 1, n, vpl);
            let d = vertex_index(i + 1, j + 1, n, vpl);
            push(a, d, c);
            push(d, a, b);
        }
    }

    if flat_shading {
        let mesh = flat_shaded(&positions, &uvs, &indices);
        return Ok(mesh);
    }

    let normals = bake_normals(&positions, &border_positions, &indices, &border_triangles);
    Ok(TerrainMesh {
        positions,
        uvs,
        normals,
        indices,
    })
}

/// Resolve a tagged index to its position.
fn position_of(index: VertexIndex, positions: &[Vec3], border_positions: &[Vec3]) -> Vec3 {
    match index {
        VertexIndex::Interior(v) => positions[v as usize],
        VertexIndex::Border(b) => border_positions[b as usize],
    }
}

/// Accumulate unnormalized face cross products into every interior corner,
/// from main and border triangles alike, then normalize.
///
/// Border triangles span into the adjacent chunk's territory; including them
/// here without rendering them is what removes shading seams at chunk edges.
fn bake_normals(
    positions: &[Vec3],
    border_positions: &[Vec3],
    indices: &[u32],
    border_triangles: &[[VertexIndex; 3]],
) -> Vec<Vec3> {
    let mut accumulated = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        accumulated[a] += face;
        accumulated[b] += face;
        accumulated[c] += face;
    }

    for tri in border_triangles {
        let pa = position_of(tri[0], positions, border_positions);
        let pb = position_of(tri[1], positions, border_positions);
        let pc = position_of(tri[2], positions, border_positions);
        let face = (pb - pa).cross(pc - pa);
        for corner in tri {
            if let VertexIndex::Interior(v) = corner {
                accumulated[*v as usize] += face;
            }
        }
    }

    accumulated
        .into_iter()
        .map(Vec3::normalize_or_zero)
        .collect()
}

/// Rebuild the mesh with per-triangle duplicated vertices and face normals.
fn flat_shaded(positions: &[Vec3], uvs: &[Vec2], indices: &[u32]) -> TerrainMesh {
    let count = indices.len();
    let mut flat_positions = Vec::with_capacity(count);
    let mut flat_uvs = Vec::with_capacity(count);
    let mut flat_normals = Vec::with_capacity(count);

    for tri in indices.chunks_exact(3) {
        let (pa, pb, pc) = (
            positions[tri[0] as usize],
            positions[tri[1] as usize],
            positions[tri[2] as usize],
        );
        let face = (pb - pa).cross(pc - pa).normalize_or_zero();
        flat_positions.extend_from_slice(&[pa, pb, pc]);
        flat_uvs.extend_from_slice(&[
            uvs[tri[0] as usize],
            uvs[tri[1] as usize],
            uvs[tri[2] as usize],
        ]);
        flat_normals.extend_from_slice(&[face, face, face]);
    }

    TerrainMesh {
        positions: flat_positions,
        uvs: flat_uvs,
        normals: flat_normals,
        indices: (0..count as u32).collect(),
    }
}
