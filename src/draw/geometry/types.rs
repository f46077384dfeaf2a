//! Core geometry types for region maps
//!
//! Shapes are the 2D polygons-with-holes produced by region extraction;
//! mesh and border buffers are what the worker side hands back.

use indexmap::IndexMap;

/// A 2D point in projected map space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A polygon with an outer boundary ring and zero or more hole rings
///
/// Rings keep the point order of the source data, including a repeated
/// closing point when the source had one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub outer: Vec<Point>,
    pub holes: Vec<Vec<Point>>,
}

impl Shape {
    pub fn new(outer: Vec<Point>) -> Self {
        Self { outer, holes: Vec::new() }
    }

    pub fn with_holes(outer: Vec<Point>, holes: Vec<Vec<Point>>) -> Self {
        Self { outer, holes }
    }

    /// Total number of points over all rings
    pub fn point_count(&self) -> usize {
        self.outer.len() + self.holes.iter().map(Vec::len).sum::<usize>()
    }
}

/// Arbitrary feature metadata, kept verbatim from the GeoJSON properties
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// Region code -> shapes, in first-appearance order
pub type RegionShapes = IndexMap<String, Vec<Shape>>;

/// Extruded solid of one shape
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// x, y, z per vertex
    pub position: Vec<f32>,
    /// Triangle indices; `None` when the vertex count exceeds u16 range
    pub index: Option<Vec<u16>>,
    pub position_count: usize,
    pub index_count: Option<usize>,
}

/// Outline polyline of one shape with its flow-effect attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BorderBuffers {
    /// x, y, z per point
    pub position: Vec<f32>,
    /// Normalized cumulative arc length, one value per point
    pub progress: Vec<f32>,
    pub point_count: usize,
}

/// All generated buffers of one region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionBuffers {
    pub geometries: Vec<MeshBuffers>,
    pub border_lines: Vec<BorderBuffers>,
}
