//! Geometry worker boundary
//!
//! # Module Structure
//! - `protocol` - Request/response messages crossing the thread boundary
//! - `pool` - Fixed-size worker pool with queueing

pub mod protocol;
pub mod pool;

pub use protocol::{GeometryRequest, GeometryResponse, ExtrudeSettings, WorkerMessage};
pub use pool::WorkerPool;
