//! Vertex normal computation
//!
//! Normals are never transferred between threads; the receiving side
//! recomputes them from positions and indices.

/// Per-vertex normals (x, y, z per vertex) for a triangle mesh
///
/// Indexed meshes get area-weighted averaged normals, non-indexed meshes
/// get flat face normals. Vertices touching only degenerate triangles get a
/// zero normal.
pub fn compute_vertex_normals(position: &[f32], index: Option<&[u32]>) -> Vec<f32> {
    let vertex_count = position.len() / 3;
    let mut normals = vec![0.0f32; vertex_count * 3];

    let vertex = |i: usize| [position[i * 3], position[i * 3 + 1], position[i * 3 + 2]];

    let mut accumulate = |a: usize, b: usize, c: usize| {
        let n = face_normal(vertex(a), vertex(b), vertex(c));
        for v in [a, b, c] {
            normals[v * 3] += n[0];
            normals[v * 3 + 1] += n[1];
            normals[v * 3 + 2] += n[2];
        }
    };

    match index {
        Some(index) => {
            for tri in index.chunks_exact(3) {
                accumulate(tri[0] as usize, tri[1] as usize, tri[2] as usize);
            }
        }
        None => {
            for first in (0..vertex_count.saturating_sub(2)).step_by(3) {
                accumulate(first, first + 1, first + 2);
            }
        }
    }

    for n in normals.chunks_exact_mut(3) {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        if len > 0.0 {
            n[0] /= len;
            n[1] /= len;
            n[2] /= len;
        }
    }

    normals
}

/// Unnormalized face normal; its length is twice the triangle area
fn face_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f32; 3] {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let w = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    [
        u[1] * w[2] - u[2] * w[1],
        u[2] * w[0] - u[0] * w[2],
        u[0] * w[1] - u[1] * w[0],
    ]
}
