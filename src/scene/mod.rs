//! Reassembly side: renderable geometry and the output scene node
//!
//! # Module Structure
//! - `merge` - Mesh reconstruction, normals and per-region merge
//! - `group` - Output group with reposition, material swap and lookup
//! - `flow` - Per-material flow-line animation clock

pub mod merge;
pub mod group;
pub mod flow;

pub use merge::{merge_geometries, MeshGeometry};
pub use group::{AxisHelper, BorderLine, GeometryGroup, RegionMarker, RegionMesh};
pub use flow::FlowLineMaterial;
