//! Geometry generation for extruded region maps
//!
//! # Submodules
//! - `geometry` - Shape and buffer types, binary shape codec
//! - `parsing` - GeoJSON region extraction and projection
//! - `tessellation` - Extrusion, border lines and normals
//! - `generation` - Task partitioning and the worker task body

pub mod geometry;
pub mod parsing;
pub mod tessellation;
pub mod generation;
