//! Geometry generation for region maps
//!
//! # Submodules
//! - `partition` - Round-robin split of regions into task groups
//! - `polygons` - Worker task: decode, extrude and outline a task group

mod partition;
mod polygons;

pub use partition::partition_regions;
pub use polygons::run_geometry_task;
