//! Tessellation module for region shapes
//!
//! Converts 2D shapes into the solid meshes and border polylines the map
//! renders.
//!
//! # Submodules
//! - `polygon` - Shape extrusion with earcut cap triangulation
//! - `polyline` - Border line with arc-length progress
//! - `normals` - Vertex normal recomputation

mod polygon;
mod polyline;
mod normals;

pub use polygon::extrude_shape;

pub use polyline::{
    build_border_line,
    arc_length_progress,
};

pub use normals::compute_vertex_normals;
