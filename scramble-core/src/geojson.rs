use serde::Deserialize;
use serde_json::Value;

use crate::error::BoardError;

/// The GeoJSON subset the loader understands: a feature collection of
/// polygonal outlines with free-form properties.
#[derive(Clone, Debug, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Value,
    pub geometry: Option<Geometry>,
}

impl Feature {
    /// Region label under the configured property key, falling back to
    /// `name` for maps that use the common convention.
    pub fn label(&self, key: &str) -> Option<String> {
        for k in [key, "name"] {
            if let Some(v) = self.properties.get(k)
                && let Some(s) = v.as_str()
            {
                return Some(s.to_string());
            }
        }
        None
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
}

impl Geometry {
    /// Normalizes to multipolygon form: outer vec is polygons, each polygon
    /// is its exterior ring followed by any holes.
    pub fn polygons(&self) -> Vec<&[Vec<[f64; 2]>]> {
        match self {
            Geometry::Polygon { coordinates } => vec![coordinates.as_slice()],
            Geometry::MultiPolygon { coordinates } => {
                coordinates.iter().map(|p| p.as_slice()).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"ilad": "Ankara"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[32.5, 39.5], [33.0, 39.5], [33.0, 40.0], [32.5, 40.0], [32.5, 39.5]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"name": "Islands"},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[26.0, 39.0], [26.2, 39.0], [26.1, 39.2], [26.0, 39.0]]],
                        [[[27.0, 38.5], [27.2, 38.5], [27.1, 38.7], [27.0, 38.5]]]
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn parses_polygon_and_multipolygon() {
        let fc = FeatureCollection::parse(SAMPLE).unwrap();
        assert_eq!(fc.features.len(), 2);
        assert_eq!(fc.features[0].geometry.as_ref().unwrap().polygons().len(), 1);
        assert_eq!(fc.features[1].geometry.as_ref().unwrap().polygons().len(), 2);
    }

    #[test]
    fn label_prefers_configured_key_then_name() {
        let fc = FeatureCollection::parse(SAMPLE).unwrap();
        assert_eq!(fc.features[0].label("ilad").as_deref(), Some("Ankara"));
        assert_eq!(fc.features[1].label("ilad").as_deref(), Some("Islands"));
        assert_eq!(fc.features[0].label("missing"), None);
    }

    #[test]
    fn malformed_text_is_a_json_error() {
        assert!(FeatureCollection::parse("{not geojson").is_err());
    }
}
