//! Polygon extrusion using earcut triangulation
//!
//! Sweeps a shape (outer ring + holes) along +z into a closed solid.
//!
//! Vertex layout for a shape with `n` distinct ring points:
//! - `0..n`      bottom cap (z = 0)
//! - `n..2n`     top cap (z = depth)
//! - `2n..4n`    side walls, a bottom and a top copy of every ring
//!
//! Caps and walls do not share vertices, so recomputed normals keep a hard
//! edge along the rim.

use crate::draw::geometry::{MeshBuffers, Point, Shape};
use crate::error::{RingKind, ShapeError};

/// Extrude a shape into a triangulated solid
///
/// Winding is counter-clockwise seen from outside for every face.
pub fn extrude_shape(shape: &Shape, depth: f32) -> Result<MeshBuffers, ShapeError> {
    let outer = prepare_ring(&shape.outer, RingKind::Outer, true)?;
    let mut rings = vec![outer];
    for (i, hole) in shape.holes.iter().enumerate() {
        // A sliver hole only loses itself; the outer ring still renders
        match prepare_ring(hole, RingKind::Hole(i), false) {
            Ok(points) => rings.push(points),
            Err(err) => tracing::warn!(hole = i, "dropping degenerate hole: {}", err),
        }
    }

    // Flat coordinates + ring start offsets for earcut
    let mut flat_coords: Vec<f64> = Vec::new();
    let mut hole_indices: Vec<usize> = Vec::new();
    let mut ring_starts: Vec<usize> = Vec::with_capacity(rings.len());
    for (i, ring) in rings.iter().enumerate() {
        let start = flat_coords.len() / 2;
        if i > 0 {
            hole_indices.push(start);
        }
        ring_starts.push(start);
        for p in ring {
            flat_coords.push(p.x as f64);
            flat_coords.push(p.y as f64);
        }
    }
    let n = flat_coords.len() / 2;

    let cap_triangles = earcutr::earcut(&flat_coords, &hole_indices, 2)
        .map_err(|_| ShapeError::Triangulation("earcut rejected the rings".to_string()))?;
    if cap_triangles.is_empty() {
        return Err(ShapeError::Triangulation("earcut produced no triangles".to_string()));
    }

    let mut position: Vec<f32> = Vec::with_capacity(n * 4 * 3);
    let mut indices: Vec<u32> = Vec::with_capacity(cap_triangles.len() * 2 + n * 6);

    // Caps
    for z in [0.0, depth] {
        for ring in &rings {
            for p in ring {
                position.extend_from_slice(&[p.x, p.y, z]);
            }
        }
    }
    for tri in cap_triangles.chunks_exact(3) {
        let (a, b, c) = ccw_triangle(&flat_coords, tri[0], tri[1], tri[2]);
        // Bottom faces -z: clockwise seen from above
        indices.extend_from_slice(&[a as u32, c as u32, b as u32]);
        let top = n as u32;
        indices.extend_from_slice(&[top + a as u32, top + b as u32, top + c as u32]);
    }

    // Side walls
    let wall_base = (2 * n) as u32;
    for z in [0.0, depth] {
        for ring in &rings {
            for p in ring {
                position.extend_from_slice(&[p.x, p.y, z]);
            }
        }
    }
    for (ring, &start) in rings.iter().zip(&ring_starts) {
        let len = ring.len();
        for i in 0..len {
            let a0 = wall_base + (start + i) as u32;
            let b0 = wall_base + (start + (i + 1) % len) as u32;
            let a1 = a0 + n as u32;
            let b1 = b0 + n as u32;
            indices.extend_from_slice(&[a0, b0, b1, a0, b1, a1]);
        }
    }

    Ok(finish_mesh(position, indices))
}

/// Pack into 16-bit indices, or de-index when the vertex count is too large
fn finish_mesh(position: Vec<f32>, indices: Vec<u32>) -> MeshBuffers {
    let vertex_count = position.len() / 3;
    if vertex_count <= u16::MAX as usize + 1 {
        let index: Vec<u16> = indices.iter().map(|&i| i as u16).collect();
        return MeshBuffers {
            position,
            index_count: Some(index.len()),
            index: Some(index),
            position_count: vertex_count,
        };
    }

    let mut flat = Vec::with_capacity(indices.len() * 3);
    for &i in &indices {
        let base = i as usize * 3;
        flat.extend_from_slice(&position[base..base + 3]);
    }
    MeshBuffers {
        position_count: flat.len() / 3,
        position: flat,
        index: None,
        index_count: None,
    }
}

/// Drop the closing point, validate and orient a ring
///
/// Outer rings end up counter-clockwise, holes clockwise.
fn prepare_ring(ring: &[Point], kind: RingKind, ccw: bool) -> Result<Vec<Point>, ShapeError> {
    if ring.is_empty() {
        return Err(ShapeError::EmptyRing(kind));
    }

    let mut points: Vec<Point> = Vec::with_capacity(ring.len());
    for &p in ring {
        if points.last() != Some(&p) {
            points.push(p);
        }
    }
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    if points.len() < 3 {
        return Err(ShapeError::TooFewPoints { ring: kind, count: points.len() });
    }

    let area = signed_area(&points);
    if area == 0.0 {
        if kind == RingKind::Outer {
            return Err(ShapeError::ZeroArea);
        }
        return Ok(points);
    }
    if (area > 0.0) != ccw {
        points.reverse();
    }
    Ok(points)
}

/// Shoelace area, positive for counter-clockwise rings
pub(crate) fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    let mut sum = 0.0f64;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        sum += p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
    }
    sum * 0.5
}

fn ccw_triangle(coords: &[f64], a: usize, b: usize, c: usize) -> (usize, usize, usize) {
    let (ax, ay) = (coords[a * 2], coords[a * 2 + 1]);
    let (bx, by) = (coords[b * 2], coords[b * 2 + 1]);
    let (cx, cy) = (coords[c * 2], coords[c * 2 + 1]);
    let cross = (bx - ax) * (cy - ay) - (by - ay) * (cx - ax);
    if cross < 0.0 {
        (a, c, b)
    } else {
        (a, b, c)
    }
}
