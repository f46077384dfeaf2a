//! Region extraction from GeoJSON
//!
//! Turns a feature collection into per-region shapes plus a side table of
//! feature properties.
//!
//! # Submodules
//! - `geojson` - Serde model of the input document
//! - `polygons` - Projection and polygon to shape conversion

mod geojson;
mod polygons;

use crate::config::PipelineConfig;
use crate::draw::geometry::{Properties, RegionShapes};
use crate::error::ExtractError;
use indexmap::IndexMap;

pub use geojson::{FeatureCollection, Feature, Geometry, PolygonCoords};
pub use polygons::{MapProjection, polygon_to_shape};

/// Output of region extraction
#[derive(Debug, Clone)]
pub struct ExtractedRegions {
    /// Region code -> shapes, in first-appearance order
    pub shapes: RegionShapes,
    /// Region code -> properties of the last feature carrying that code
    pub properties: IndexMap<String, Properties>,
    pub projection: MapProjection,
    /// Features that were skipped
    pub issues: Vec<ExtractError>,
}

struct AcceptedFeature {
    code: String,
    properties: Properties,
    polygons: Vec<PolygonCoords>,
}

/// Extract regions from a parsed feature collection
///
/// Features that cannot be used are skipped and reported in `issues`.
pub fn extract_regions(collection: FeatureCollection, config: &PipelineConfig) -> ExtractedRegions {
    let mut issues = Vec::new();
    let mut accepted = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.into_iter().enumerate() {
        match accept_feature(index, feature, &config.region_key) {
            Ok(f) => accepted.push(f),
            Err(issue) => {
                tracing::warn!(feature = index, "skipping feature: {}", issue);
                issues.push(issue);
            }
        }
    }

    let all_coords = accepted
        .iter()
        .flat_map(|f| f.polygons.iter())
        .flat_map(|polygon| polygon.iter())
        .flat_map(|ring| ring.iter());
    let projection = MapProjection::centered_on(all_coords, config.scale, config.center_precision);

    let mut shapes = RegionShapes::new();
    let mut properties = IndexMap::new();
    for feature in accepted {
        let region = shapes.entry(feature.code.clone()).or_default();
        region.extend(feature.polygons.iter().map(|p| polygon_to_shape(p, &projection)));
        properties.insert(feature.code, feature.properties);
    }

    tracing::debug!(
        regions = shapes.len(),
        skipped = issues.len(),
        center_lng = projection.center[0],
        center_lat = projection.center[1],
        "extracted regions"
    );

    ExtractedRegions {
        shapes,
        properties,
        projection,
        issues,
    }
}

fn accept_feature(
    index: usize,
    raw: serde_json::Value,
    region_key: &str,
) -> Result<AcceptedFeature, ExtractError> {
    let mut feature = Feature::from_value(raw)
        .map_err(|reason| ExtractError::MalformedFeature { feature: index, reason })?;
    let properties = feature.take_properties();

    let code = match properties.get(region_key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => {
            return Err(ExtractError::MissingRegionCode {
                feature: index,
                key: region_key.to_string(),
            })
        }
    };

    let geometry = feature
        .take_geometry()
        .ok_or(ExtractError::MissingGeometry { feature: index })?
        .map_err(|reason| ExtractError::MalformedGeometry { feature: index, reason })?;
    let kind = geometry.kind.clone();

    let polygons = geometry
        .into_polygons()
        .map_err(|reason| ExtractError::MalformedCoordinates { feature: index, reason })?
        .ok_or(ExtractError::UnsupportedGeometry { feature: index, kind })?;

    Ok(AcceptedFeature { code, properties, polygons })
}
