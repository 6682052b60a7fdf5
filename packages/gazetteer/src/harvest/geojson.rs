//! Boundary-polygon harvester.
//!
//! Reads the municipal boundary GeoJSON and emits one barangay candidate
//! per named polygon, positioned at the outer ring's vertex-mean centroid.
//! The most trusted source: these names come from the municipality's own
//! boundary data.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::MunicipalityConfig;
use crate::error::{HarvestError, HarvestResult};
use crate::harvest::Harvester;
use crate::types::record::{Category, RawCandidate, Source};

/// Harvests barangay centroids from a boundary GeoJSON file.
pub struct BoundaryFileHarvester {
    path: PathBuf,
    municipality: String,
    province: String,
}

impl BoundaryFileHarvester {
    pub fn new(path: impl Into<PathBuf>, config: &MunicipalityConfig) -> Self {
        Self {
            path: path.into(),
            municipality: config.municipality.clone(),
            province: config.province.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn candidate_from_feature(&self, feature: &Value) -> Option<RawCandidate> {
        let name = feature
            .get("properties")?
            .get("BARANGAY")?
            .as_str()
            .filter(|n| !n.trim().is_empty())?;

        let geometry = feature.get("geometry")?;
        let ring = outer_ring(geometry)?;
        let (lat, lng) = centroid(ring)?;

        let display = title_case(name);
        let address = format!("{}, {}, {}", display, self.municipality, self.province);

        Some(
            RawCandidate::new(display, Source::Geojson)
                .with_coordinates(lat, lng)
                .with_address(address)
                .with_category(Category::Barangay)
                .verified(true),
        )
    }
}

/// The outer ring of a Polygon, or of a MultiPolygon's first polygon.
fn outer_ring(geometry: &Value) -> Option<&Vec<Value>> {
    let coordinates = geometry.get("coordinates")?.as_array()?;
    match geometry.get("type")?.as_str()? {
        "Polygon" => coordinates.first()?.as_array(),
        "MultiPolygon" => coordinates.first()?.as_array()?.first()?.as_array(),
        _ => None,
    }
}

/// Vertex-mean centroid of a ring of `[lng, lat]` positions.
fn centroid(ring: &[Value]) -> Option<(f64, f64)> {
    let mut lat_sum = 0.0;
    let mut lng_sum = 0.0;
    let mut count = 0usize;

    for position in ring {
        let pair = position.as_array()?;
        let lng = pair.first()?.as_f64()?;
        let lat = pair.get(1)?.as_f64()?;
        lat_sum += lat;
        lng_sum += lng;
        count += 1;
    }

    if count == 0 {
        return None;
    }
    Some((lat_sum / count as f64, lng_sum / count as f64))
}

/// Title-case a name the way the boundary file's ALL-CAPS labels need:
/// uppercase after any non-letter, lowercase otherwise ("BALO-OG" →
/// "Balo-Og").
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[async_trait]
impl Harvester for BoundaryFileHarvester {
    fn source(&self) -> Source {
        Source::Geojson
    }

    fn queries(&self) -> Vec<String> {
        vec![self.path.display().to_string()]
    }

    async fn run_query(&self, _query: &str) -> HarvestResult<Vec<RawCandidate>> {
        let text = std::fs::read_to_string(&self.path).map_err(HarvestError::BoundaryFile)?;
        let doc: Value = serde_json::from_str(&text)?;

        let features = doc
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| HarvestError::MalformedResponse {
                service: "boundary file",
                reason: "no features array".to_string(),
            })?;

        let candidates: Vec<RawCandidate> = features
            .iter()
            .filter_map(|f| self.candidate_from_feature(f))
            .collect();

        debug!(path = %self.path.display(), polygons = candidates.len(), "boundary file loaded");
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_case_handles_hyphens_and_caps() {
        assert_eq!(title_case("BALO-OG"), "Balo-Og");
        assert_eq!(title_case("NEW SAN AGUSTIN"), "New San Agustin");
        assert_eq!(title_case("buscada"), "Buscada");
    }

    #[test]
    fn test_polygon_centroid() {
        let geometry = json!({
            "type": "Polygon",
            "coordinates": [[[125.0, 11.2], [125.2, 11.2], [125.2, 11.4], [125.0, 11.4]]]
        });
        let ring = outer_ring(&geometry).unwrap();
        let (lat, lng) = centroid(ring).unwrap();
        assert!((lat - 11.3).abs() < 1e-9);
        assert!((lng - 125.1).abs() < 1e-9);
    }

    #[test]
    fn test_multipolygon_uses_first_outer_ring() {
        let geometry = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[125.0, 11.2], [125.2, 11.2], [125.1, 11.4]]],
                [[[120.0, 10.0], [120.1, 10.0], [120.0, 10.1]]]
            ]
        });
        let ring = outer_ring(&geometry).unwrap();
        let (lat, _) = centroid(ring).unwrap();
        assert!(lat > 11.0, "should come from the first polygon");
    }

    #[test]
    fn test_feature_without_barangay_property_is_skipped() {
        let config = MunicipalityConfig::basey();
        let harvester = BoundaryFileHarvester::new("unused.json", &config);

        let feature = json!({
            "properties": { "RIVER": "Golden" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[125.0, 11.2], [125.2, 11.2], [125.1, 11.4]]]
            }
        });
        assert!(harvester.candidate_from_feature(&feature).is_none());
    }

    #[test]
    fn test_candidate_shape() {
        let config = MunicipalityConfig::basey();
        let harvester = BoundaryFileHarvester::new("unused.json", &config);

        let feature = json!({
            "properties": { "BARANGAY": "AMANDAYEHAN" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[125.0, 11.2], [125.2, 11.2], [125.1, 11.4]]]
            }
        });
        let candidate = harvester.candidate_from_feature(&feature).unwrap();
        assert_eq!(candidate.name, "Amandayehan");
        assert_eq!(candidate.category, Some(Category::Barangay));
        assert_eq!(candidate.address, "Amandayehan, Basey, Samar");
        assert!(candidate.verified);
        assert!(candidate.coordinates.is_some());
    }

    #[tokio::test]
    async fn test_missing_file_is_a_harvest_error() {
        let config = MunicipalityConfig::basey();
        let harvester = BoundaryFileHarvester::new("/nonexistent/boundaries.json", &config);
        let result = harvester.run_query("").await;
        assert!(matches!(result, Err(HarvestError::BoundaryFile(_))));
    }
}
