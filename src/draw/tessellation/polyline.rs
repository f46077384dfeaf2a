//! Border line construction
//!
//! The border of a shape is its outer ring lifted to a fixed elevation,
//! with a per-point `progress` attribute (normalized cumulative arc length)
//! that drives the flow animation along the line. Hole rings are not part
//! of the border.

use crate::draw::geometry::{BorderBuffers, Point, Shape};

/// Build the border polyline of a shape's outer ring at height `elevation`
pub fn build_border_line(shape: &Shape, elevation: f32) -> BorderBuffers {
    let points = &shape.outer;

    let mut position = Vec::with_capacity(points.len() * 3);
    for p in points {
        position.extend_from_slice(&[p.x, p.y, elevation]);
    }

    let progress = arc_length_progress(points);

    BorderBuffers {
        position,
        point_count: progress.len(),
        progress,
    }
}

/// Cumulative arc length along `points`, normalized to [0, 1]
///
/// A polyline with zero total length yields all zeros.
pub fn arc_length_progress(points: &[Point]) -> Vec<f32> {
    let mut lengths: Vec<f64> = Vec::with_capacity(points.len());
    let mut total = 0.0f64;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            total += p.distance_to(&points[i - 1]) as f64;
        }
        lengths.push(total);
    }

    if total <= 0.0 || !total.is_finite() {
        return vec![0.0; points.len()];
    }

    lengths.into_iter().map(|l| (l / total) as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f32, f32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_square_progress() {
        let shape = Shape::new(ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]));
        let border = build_border_line(&shape, 10.01);
        assert_eq!(border.point_count, 5);
        assert_eq!(border.progress, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(&border.position[3..6], &[0.0, 10.0, 10.01]);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let points = ring(&[(0.0, 0.0), (3.0, 4.0), (3.0, 4.0), (10.0, 4.0), (-2.0, 9.0), (0.0, 0.0)]);
        let progress = arc_length_progress(&points);
        assert_eq!(progress[0], 0.0);
        assert_eq!(*progress.last().unwrap(), 1.0);
        assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_degenerate_border_has_no_nan() {
        let same = ring(&[(2.0, 2.0), (2.0, 2.0), (2.0, 2.0)]);
        assert_eq!(arc_length_progress(&same), vec![0.0, 0.0, 0.0]);
        assert_eq!(arc_length_progress(&ring(&[(1.0, 1.0)])), vec![0.0]);
        assert!(arc_length_progress(&[]).is_empty());
    }

    #[test]
    fn test_holes_are_excluded() {
        let shape = Shape::with_holes(
            ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 0.0)]),
            vec![ring(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 1.0)])],
        );
        let border = build_border_line(&shape, 1.0);
        assert_eq!(border.point_count, 4);
        assert_eq!(border.position.len(), 12);
    }
}
