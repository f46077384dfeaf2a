//! Mesh geometry reconstruction and per-region merge

use crate::draw::geometry::MeshBuffers;
use crate::draw::tessellation::compute_vertex_normals;

/// Renderable triangle geometry with recomputed normals
///
/// Indices are always present here; a non-indexed worker buffer gets a
/// sequential index list so every geometry can be merged the same way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshGeometry {
    pub position: Vec<f32>,
    pub normal: Vec<f32>,
    pub index: Vec<u32>,
}

impl MeshGeometry {
    /// Take ownership of a worker buffer set and compute its normals
    pub fn from_buffers(buffers: MeshBuffers) -> Self {
        let MeshBuffers { position, index, .. } = buffers;
        let index: Option<Vec<u32>> = index.map(|idx| idx.into_iter().map(u32::from).collect());
        let normal = compute_vertex_normals(&position, index.as_deref());

        let index = match index {
            Some(index) => index,
            None => (0..(position.len() / 3) as u32).collect(),
        };

        Self { position, normal, index }
    }

    pub fn vertex_count(&self) -> usize {
        self.position.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.index.len() / 3
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounding_box(&self) -> Option<([f32; 3], [f32; 3])> {
        let mut chunks = self.position.chunks_exact(3);
        let first = chunks.next()?;
        let mut min = [first[0], first[1], first[2]];
        let mut max = min;
        for p in chunks {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        Some((min, max))
    }
}

/// Concatenate geometries into one, offsetting indices
///
/// Triangle winding is untouched, so faces keep their orientation.
pub fn merge_geometries(geometries: Vec<MeshGeometry>) -> MeshGeometry {
    let total_vertices: usize = geometries.iter().map(MeshGeometry::vertex_count).sum();
    let total_indices: usize = geometries.iter().map(|g| g.index.len()).sum();

    let mut merged = MeshGeometry {
        position: Vec::with_capacity(total_vertices * 3),
        normal: Vec::with_capacity(total_vertices * 3),
        index: Vec::with_capacity(total_indices),
    };

    for geometry in geometries {
        let offset = merged.vertex_count() as u32;
        merged.position.extend_from_slice(&geometry.position);
        merged.normal.extend_from_slice(&geometry.normal);
        merged.index.extend(geometry.index.iter().map(|i| i + offset));
    }

    merged
}
