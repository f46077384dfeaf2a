//! Polygon to shape conversion
//!
//! Handles the map "projection" (recentre on the mean coordinate, then a
//! non-uniform scale) and builds shapes from projected rings.

use crate::draw::geometry::{Point, Shape};
use super::geojson::PolygonCoords;

/// Recentre-and-scale stylization of lng/lat into map units
///
/// Not a geographic projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    pub center: [f64; 2],
    pub scale: [f64; 2],
}

impl MapProjection {
    /// Build a projection centred on the mean of all coordinates
    ///
    /// The center is rounded to `precision` decimals. With no coordinates
    /// the center is the origin.
    pub fn centered_on<'a, I>(coords: I, scale: [f64; 2], precision: u32) -> Self
    where
        I: IntoIterator<Item = &'a [f64; 2]>,
    {
        let mut sum = [0.0f64, 0.0f64];
        let mut count = 0usize;
        for c in coords {
            sum[0] += c[0];
            sum[1] += c[1];
            count += 1;
        }

        let center = if count == 0 {
            [0.0, 0.0]
        } else {
            [
                round_to(sum[0] / count as f64, precision),
                round_to(sum[1] / count as f64, precision),
            ]
        };

        Self { center, scale }
    }

    pub fn project(&self, lng: f64, lat: f64) -> Point {
        let x = (lng - self.center[0]) * self.scale[0];
        let y = (lat - self.center[1]) * self.scale[1];
        Point { x: x as f32, y: y as f32 }
    }
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Convert one polygon (outer ring + holes) into a projected shape
pub fn polygon_to_shape(polygon: &PolygonCoords, projection: &MapProjection) -> Shape {
    let mut rings = polygon.iter().map(|ring| project_ring(ring, projection));
    let outer = rings.next().unwrap_or_default();
    Shape::with_holes(outer, rings.collect())
}

/// Project a ring, collapsing consecutive duplicate points
fn project_ring(ring: &[[f64; 2]], projection: &MapProjection) -> Vec<Point> {
    let mut points: Vec<Point> = Vec::with_capacity(ring.len());
    for &[lng, lat] in ring {
        let p = projection.project(lng, lat);
        if points.last() != Some(&p) {
            points.push(p);
        }
    }
    points
}
