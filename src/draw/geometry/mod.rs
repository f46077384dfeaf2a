//! Geometry module for region maps
//!
//! # Submodules
//! - `types` - Points, shapes and the generated mesh/border buffers
//! - `binary` - Flat f32 shape encoding for transfer to worker threads

mod types;
mod binary;

pub use types::{
    Point,
    Shape,
    Properties,
    RegionShapes,
    MeshBuffers,
    BorderBuffers,
    RegionBuffers,
};

pub use binary::{
    ShapeMeta,
    EncodedShape,
    encode_shape,
    decode_shape,
};
