//! Messages exchanged with geometry workers
//!
//! Requests carry encoded shapes, responses carry freshly allocated buffers.
//! Both are moved through channels, so the numeric storage changes owner
//! without being copied.

use crate::draw::geometry::{encode_shape, EncodedShape, RegionBuffers, Shape};
use crate::error::{GroupError, ShapeFailure};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Work for one task group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryRequest {
    pub shapes: IndexMap<String, Vec<EncodedShape>>,
}

impl GeometryRequest {
    /// Encode every shape of a task group
    pub fn from_shapes(group: &IndexMap<String, Vec<Shape>>) -> Self {
        let shapes = group
            .iter()
            .map(|(code, shapes)| (code.clone(), shapes.iter().map(encode_shape).collect()))
            .collect();
        Self { shapes }
    }

    pub fn region_codes(&self) -> Vec<String> {
        self.shapes.keys().cloned().collect()
    }
}

/// Constants the worker needs to build geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeSettings {
    pub depth: f32,
    pub border_elevation: f32,
}

/// Buffers produced for one task group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryResponse {
    /// Regions with at least one generated shape, in request order
    pub result: IndexMap<String, RegionBuffers>,
    /// Shapes that were skipped
    pub failures: Vec<ShapeFailure>,
}

/// What a worker reports back for a task group
#[derive(Debug)]
pub struct WorkerMessage {
    pub group: usize,
    pub outcome: Result<GeometryResponse, GroupError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::geometry::Point;

    #[test]
    fn test_request_wire_shape() {
        let mut group = IndexMap::new();
        group.insert(
            "110000".to_string(),
            vec![Shape::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)])],
        );
        let request = GeometryRequest::from_shapes(&group);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "shapes": {
                    "110000": [{
                        "buffer": [0.0, 0.0, 1.0, 0.0, 1.0, 1.0],
                        "meta": {"outerLength": 3, "holeCounts": []}
                    }]
                }
            })
        );
        assert_eq!(request.region_codes(), vec!["110000".to_string()]);
    }

    #[test]
    fn test_response_buffers_move_through_channel() {
        use crate::draw::geometry::{MeshBuffers, RegionBuffers};
        use std::sync::mpsc;

        let mut result = IndexMap::new();
        result.insert(
            "110000".to_string(),
            RegionBuffers {
                geometries: vec![MeshBuffers {
                    position: vec![0.0; 48],
                    index: Some(vec![0; 36]),
                    position_count: 16,
                    index_count: Some(36),
                }],
                border_lines: vec![],
            },
        );
        let response = GeometryResponse { result, failures: vec![] };
        let sent = response.result["110000"].geometries[0].position.as_ptr();

        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || tx.send(WorkerMessage { group: 0, outcome: Ok(response) }).unwrap())
            .join()
            .unwrap();
        let message = rx.recv().unwrap();
        let received = message.outcome.unwrap();
        assert_eq!(received.result["110000"].geometries[0].position.as_ptr(), sent);
    }
}
