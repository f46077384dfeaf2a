//! Error taxonomy for the geometry pipeline
//!
//! Every error here is local to one feature, one shape or one task group.
//! The pipeline collects them into a [`PipelineReport`] instead of aborting,
//! so a bad region only ever removes itself from the map.

use thiserror::Error;

/// Which ring of a shape an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingKind {
    Outer,
    Hole(usize),
}

impl std::fmt::Display for RingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RingKind::Outer => write!(f, "outer ring"),
            RingKind::Hole(i) => write!(f, "hole {}", i),
        }
    }
}

/// Encoded shape buffer does not match its metadata record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("shape buffer holds {actual} floats but metadata describes {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Failure to turn one shape into a solid mesh
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("{0} has no points")]
    EmptyRing(RingKind),

    #[error("{ring} has {count} distinct points, at least 3 are required")]
    TooFewPoints { ring: RingKind, count: usize },

    #[error("outer ring encloses no area")]
    ZeroArea,

    #[error("triangulation failed: {0}")]
    Triangulation(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Failure to read one GeoJSON feature
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("feature {feature} has no '{key}' property")]
    MissingRegionCode { feature: usize, key: String },

    #[error("feature {feature} is not an object: {reason}")]
    MalformedFeature { feature: usize, reason: String },

    #[error("feature {feature} has no geometry")]
    MissingGeometry { feature: usize },

    #[error("feature {feature} has a malformed geometry: {reason}")]
    MalformedGeometry { feature: usize, reason: String },

    #[error("feature {feature} has unsupported geometry type '{kind}'")]
    UnsupportedGeometry { feature: usize, kind: String },

    #[error("feature {feature} has malformed coordinates: {reason}")]
    MalformedCoordinates { feature: usize, reason: String },
}

/// Failure of a whole task group on the worker side
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("worker panicked: {message}")]
    WorkerPanicked { message: String },

    #[error("worker exited without reporting a result")]
    WorkerLost,
}

/// A shape that was skipped during generation
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeFailure {
    pub region: String,
    pub shape_index: usize,
    pub error: ShapeError,
}

/// A task group whose regions were all lost
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFailure {
    pub group: usize,
    pub regions: Vec<String>,
    pub error: GroupError,
}

/// Everything that went wrong during one pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineReport {
    pub extraction: Vec<ExtractError>,
    pub shapes: Vec<ShapeFailure>,
    pub groups: Vec<GroupFailure>,
}

impl PipelineReport {
    pub fn is_clean(&self) -> bool {
        self.extraction.is_empty() && self.shapes.is_empty() && self.groups.is_empty()
    }

    /// Region codes that lost at least one shape, in report order, deduplicated
    pub fn failed_regions(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let shape_regions = self.shapes.iter().map(|f| &f.region);
        let group_regions = self.groups.iter().flat_map(|g| g.regions.iter());
        for region in shape_regions.chain(group_regions) {
            if !out.contains(region) {
                out.push(region.clone());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_regions_deduplicates() {
        let report = PipelineReport {
            extraction: vec![],
            shapes: vec![
                ShapeFailure { region: "a".into(), shape_index: 0, error: ShapeError::ZeroArea },
                ShapeFailure { region: "a".into(), shape_index: 2, error: ShapeError::ZeroArea },
            ],
            groups: vec![GroupFailure {
                group: 1,
                regions: vec!["b".into(), "a".into()],
                error: GroupError::WorkerLost,
            }],
        };
        assert!(!report.is_clean());
        assert_eq!(report.failed_regions(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_error_messages() {
        let err = ShapeError::TooFewPoints { ring: RingKind::Hole(1), count: 2 };
        assert_eq!(err.to_string(), "hole 1 has 2 distinct points, at least 3 are required");
        let err: ShapeError = CodecError::LengthMismatch { expected: 10, actual: 8 }.into();
        assert!(err.to_string().contains("8 floats"));
    }
}
