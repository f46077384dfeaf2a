//! Extruded 3D region maps from GeoJSON
//!
//! Boundary polygons are projected into map space, split into task groups
//! and handed to a fixed worker pool. Each worker extrudes its shapes into
//! solids and traces their outlines; the results are merged per region into
//! one scene group that a renderer can attach, move and re-material.
//!
//! # Example
//! ```ignore
//! use map_extrude::{MapGeometryPipeline, PipelineConfig};
//! use std::sync::Arc;
//!
//! let pipeline = MapGeometryPipeline::new(PipelineConfig::default())?;
//! let mut pending = pipeline.load_str(&geojson, Arc::new(material))?;
//! // once per frame
//! if pending.poll() {
//!     println!("{} regions", pending.group().region_count());
//! }
//! ```

pub mod config;
pub mod error;
pub mod draw;
pub mod worker;
pub mod scene;
pub mod pipeline;

pub use config::PipelineConfig;
pub use error::{PipelineReport, ShapeError, GroupError, ExtractError, CodecError};
pub use draw::geometry::{Point, Shape, Properties, MeshBuffers, BorderBuffers, RegionBuffers};
pub use scene::{GeometryGroup, RegionMesh, RegionMarker, BorderLine, FlowLineMaterial, MeshGeometry};
pub use pipeline::{MapGeometryPipeline, PendingMapGeometry, MapGeometry};
