//! Binary shape codec for cross-thread transfer
//!
//! A shape travels to the workers as one flat `Vec<f32>` plus a small
//! metadata record. The vector is moved, never copied, so the worker owns
//! its own decoded copy and shares nothing with the caller.
//!
//! Layout: outer ring (x, y, x, y, ...) followed by each hole in order.

use super::types::{Point, Shape};
use crate::error::CodecError;
use serde::{Deserialize, Serialize};

/// Point counts needed to re-segment a flat shape buffer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeMeta {
    pub outer_length: usize,
    pub hole_counts: Vec<usize>,
}

impl ShapeMeta {
    /// Number of floats a buffer described by this record must hold
    pub fn float_len(&self) -> usize {
        2 * (self.outer_length + self.hole_counts.iter().sum::<usize>())
    }
}

/// A shape in transfer form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncodedShape {
    pub buffer: Vec<f32>,
    pub meta: ShapeMeta,
}

/// Flatten a shape into its transfer form
pub fn encode_shape(shape: &Shape) -> EncodedShape {
    let meta = ShapeMeta {
        outer_length: shape.outer.len(),
        hole_counts: shape.holes.iter().map(Vec::len).collect(),
    };

    let mut buffer = Vec::with_capacity(meta.float_len());
    for p in shape.outer.iter().chain(shape.holes.iter().flatten()) {
        buffer.push(p.x);
        buffer.push(p.y);
    }

    EncodedShape { buffer, meta }
}

/// Rebuild a shape from its transfer form
///
/// The buffer length is checked against the metadata before anything is read.
pub fn decode_shape(encoded: &EncodedShape) -> Result<Shape, CodecError> {
    let expected = encoded.meta.float_len();
    if encoded.buffer.len() != expected {
        return Err(CodecError::LengthMismatch {
            expected,
            actual: encoded.buffer.len(),
        });
    }

    let mut points = encoded
        .buffer
        .chunks_exact(2)
        .map(|xy| Point { x: xy[0], y: xy[1] });

    let outer: Vec<Point> = points.by_ref().take(encoded.meta.outer_length).collect();
    let mut shape = Shape::new(outer);
    for &count in &encoded.meta.hole_counts {
        shape.holes.push(points.by_ref().take(count).collect());
    }

    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f32, f32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_encode_layout() {
        let shape = Shape::with_holes(
            ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]),
            vec![ring(&[(1.0, 1.0), (2.0, 1.0), (1.5, 2.0)])],
        );
        let encoded = encode_shape(&shape);
        assert_eq!(encoded.meta.outer_length, 3);
        assert_eq!(encoded.meta.hole_counts, vec![3]);
        assert_eq!(encoded.buffer.len(), 12);
        assert_eq!(&encoded.buffer[6..8], &[1.0, 1.0]);
    }

    #[test]
    fn test_decode_restores_holes_in_order() {
        let shape = Shape::with_holes(
            ring(&[(-10.5, -10.0), (10.0, -10.0), (10.0, 10.25), (-10.0, 10.0), (-10.5, -10.0)]),
            vec![
                ring(&[(-5.0, -5.0), (-4.0, -5.0), (-4.0, -4.0), (-5.0, -5.0)]),
                ring(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0)]),
                ring(&[(6.0, 6.0), (7.0, 6.0), (7.0, 7.0), (6.5, 7.5), (6.0, 7.0)]),
            ],
        );
        let decoded = decode_shape(&encode_shape(&shape)).unwrap();
        assert_eq!(decoded, shape);
    }

    #[test]
    fn test_decode_rejects_mismatched_meta() {
        let mut encoded = encode_shape(&Shape::new(ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])));
        encoded.meta.hole_counts.push(2);
        assert_eq!(
            decode_shape(&encoded),
            Err(CodecError::LengthMismatch { expected: 10, actual: 6 })
        );
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let meta = ShapeMeta { outer_length: 5, hole_counts: vec![4] };
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"outerLength":5,"holeCounts":[4]}"#);
    }
}
