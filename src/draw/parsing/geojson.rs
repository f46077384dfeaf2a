//! GeoJSON input model
//!
//! Only the parts the map pipeline reads are modelled. Features, their
//! properties and their geometry stay as raw JSON until extraction looks at
//! them, so one malformed feature is reported instead of failing the whole
//! document.

use crate::draw::geometry::Properties;
use serde::Deserialize;

/// Top-level GeoJSON object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Option<serde_json::Value>,
    #[serde(default)]
    pub geometry: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: serde_json::Value,
}

/// Rings of one polygon as (lng, lat) pairs; the first ring is the outer one
pub type PolygonCoords = Vec<Vec<[f64; 2]>>;

impl FeatureCollection {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).map_err(|e| anyhow::anyhow!("Invalid GeoJSON: {}", e))
    }

    pub fn from_value(value: serde_json::Value) -> anyhow::Result<Self> {
        serde_json::from_value(value).map_err(|e| anyhow::anyhow!("Invalid GeoJSON: {}", e))
    }
}

impl Feature {
    /// Read one raw feature; fails only when it is not a JSON object
    pub fn from_value(value: serde_json::Value) -> Result<Self, String> {
        serde_json::from_value(value).map_err(|e| e.to_string())
    }

    /// The properties object, or an empty record for null or non-object values
    pub fn take_properties(&mut self) -> Properties {
        match self.properties.take() {
            Some(serde_json::Value::Object(map)) => map,
            _ => Properties::new(),
        }
    }

    /// The geometry, `None` when absent or null
    pub fn take_geometry(&mut self) -> Option<Result<Geometry, String>> {
        match self.geometry.take() {
            None | Some(serde_json::Value::Null) => None,
            Some(value) => Some(serde_json::from_value(value).map_err(|e| e.to_string())),
        }
    }
}

impl Geometry {
    /// Normalise Polygon and MultiPolygon into a list of polygons
    ///
    /// Returns `Ok(None)` for geometry types the map does not render.
    pub fn into_polygons(self) -> Result<Option<Vec<PolygonCoords>>, String> {
        match self.kind.as_str() {
            "Polygon" => {
                let rings: Vec<Vec<Vec<f64>>> =
                    serde_json::from_value(self.coordinates).map_err(|e| e.to_string())?;
                Ok(Some(vec![convert_rings(rings)?]))
            }
            "MultiPolygon" => {
                let polygons: Vec<Vec<Vec<Vec<f64>>>> =
                    serde_json::from_value(self.coordinates).map_err(|e| e.to_string())?;
                let converted = polygons
                    .into_iter()
                    .map(convert_rings)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Some(converted))
            }
            _ => Ok(None),
        }
    }
}

fn convert_rings(rings: Vec<Vec<Vec<f64>>>) -> Result<PolygonCoords, String> {
    if rings.is_empty() {
        return Err("polygon has no rings".to_string());
    }
    rings
        .into_iter()
        .map(|ring| {
            ring.into_iter()
                .map(|position| match position.as_slice() {
                    // Altitude and any further components are dropped
                    [lng, lat, ..] => Ok([*lng, *lat]),
                    _ => Err(format!("position has {} components", position.len())),
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_polygon_with_altitude() {
        let geometry: Geometry = serde_json::from_value(json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0, 5.0], [1.0, 0.0, 5.0], [1.0, 1.0, 5.0], [0.0, 0.0, 5.0]]]
        }))
        .unwrap();
        let polygons = geometry.into_polygons().unwrap().unwrap();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0][0][1], [1.0, 0.0]);
    }

    #[test]
    fn test_multipolygon() {
        let geometry: Geometry = serde_json::from_value(json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0, 0], [1, 0], [1, 1], [0, 0]]],
                [[[5, 5], [6, 5], [6, 6], [5, 5]], [[5.2, 5.1], [5.8, 5.1], [5.8, 5.6], [5.2, 5.1]]]
            ]
        }))
        .unwrap();
        let polygons = geometry.into_polygons().unwrap().unwrap();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[1].len(), 2);
    }

    #[test]
    fn test_unsupported_and_malformed() {
        let point: Geometry = serde_json::from_value(json!({"type": "Point", "coordinates": [1, 2]})).unwrap();
        assert_eq!(point.into_polygons(), Ok(None));

        let short: Geometry =
            serde_json::from_value(json!({"type": "Polygon", "coordinates": [[[1], [2, 3]]]})).unwrap();
        assert!(short.into_polygons().is_err());

        let empty: Geometry = serde_json::from_value(json!({"type": "Polygon", "coordinates": []})).unwrap();
        assert!(empty.into_polygons().is_err());
    }

    #[test]
    fn test_null_properties_and_geometry() {
        let fc = FeatureCollection::from_json_str(
            r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":null,"geometry":null}]}"#,
        )
        .unwrap();
        let mut feature = Feature::from_value(fc.features[0].clone()).unwrap();
        assert!(feature.take_properties().is_empty());
        assert!(feature.take_geometry().is_none());
    }

    #[test]
    fn test_feature_parts_are_checked_lazily() {
        let mut feature = Feature::from_value(json!({
            "properties": ["not", "an", "object"],
            "geometry": {"coordinates": []}
        }))
        .unwrap();
        assert!(feature.take_properties().is_empty());
        assert!(feature.take_geometry().unwrap().is_err());

        assert!(Feature::from_value(json!("feature")).is_err());
    }
}
