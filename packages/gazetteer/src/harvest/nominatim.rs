//! OpenStreetMap (Nominatim) harvester.
//!
//! Free-text geocoding over a broad term list. Nominatim data is
//! community-sourced, so every candidate is emitted unverified and the
//! adapter does its own sitio-leaning classification: rural sitios mostly
//! appear in OSM as hamlets, villages, or neighbourhoods.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::MunicipalityConfig;
use crate::error::{HarvestError, HarvestResult};
use crate::harvest::Harvester;
use crate::types::record::{Category, RawCandidate, Source};

const SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";
const SERVICE: &str = "nominatim";

/// Nominatim's usage policy requires an identifying User-Agent.
const USER_AGENT: &str = "basey-gazetteer/0.1 (location data collection)";

/// Search terms, from subdivisions through community infrastructure.
const SEARCH_TERMS: &[&str] = &[
    // Subdivisions
    "sitio",
    "purok",
    "hamlet",
    "village",
    "neighbourhood",
    "zone",
    // Religious
    "church",
    "chapel",
    "cathedral",
    "shrine",
    // Education
    "school",
    "elementary school",
    "high school",
    "daycare",
    "college",
    // Health
    "clinic",
    "hospital",
    "health center",
    "pharmacy",
    // Government
    "town hall",
    "government",
    "barangay hall",
    "police station",
    "fire station",
    // Tourism
    "cave",
    "waterfall",
    "beach",
    "resort",
    "attraction",
    "park",
    "viewpoint",
    "hot spring",
    // Infrastructure
    "market",
    "terminal",
    "port",
    "wharf",
    "bridge",
    "gas station",
    "store",
    // Community
    "cemetery",
    "plaza",
    "gymnasium",
    "sports complex",
    "restaurant",
    "hotel",
];

/// Harvests candidates from the Nominatim search API.
pub struct NominatimHarvester {
    client: reqwest::Client,
    queries: Vec<String>,
    /// Lowercased names too generic to keep (the municipality itself,
    /// the province, the neighboring province that broad queries drag in)
    generic_names: Vec<String>,
}

impl NominatimHarvester {
    pub fn new(config: &MunicipalityConfig) -> Self {
        let place = format!("{}, {}", config.municipality, config.province);
        let queries = SEARCH_TERMS
            .iter()
            .map(|term| format!("{} {}", term, place))
            .collect();

        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            queries,
            generic_names: vec![
                config.municipality.to_lowercase(),
                config.province.to_lowercase(),
                format!("eastern {}", config.province.to_lowercase()),
            ],
        }
    }

    /// Replace the default query plan.
    pub fn with_queries(mut self, queries: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.queries = queries.into_iter().map(|q| q.into()).collect();
        self
    }

    /// OSM type plus name keywords decide the bucket; anything that is not
    /// recognizably a subdivision is kept as a landmark.
    fn classify_hit(osm_type: &str, name: &str) -> Category {
        let lowered = name.to_lowercase();
        if lowered.contains("sitio") || lowered.contains("purok") {
            return Category::Sitio;
        }
        if lowered.contains("barangay")
            || matches!(osm_type, "hamlet" | "village" | "neighbourhood")
        {
            return Category::Sitio;
        }
        Category::Landmark
    }

    fn candidate_from_result(&self, result: &Value) -> Option<RawCandidate> {
        let display_name = result.get("display_name").and_then(Value::as_str)?;
        let name = display_name.split(',').next()?.trim();
        if name.is_empty() {
            return None;
        }
        if self.generic_names.iter().any(|g| g == &name.to_lowercase()) {
            return None;
        }

        // Nominatim serializes coordinates as strings
        let lat: f64 = result.get("lat").and_then(Value::as_str)?.parse().ok()?;
        let lng: f64 = result.get("lon").and_then(Value::as_str)?.parse().ok()?;

        let osm_type = result
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default();

        Some(
            RawCandidate::new(name, Source::Osm)
                .with_coordinates(lat, lng)
                .with_tags([osm_type])
                .with_address(display_name)
                .with_category(Self::classify_hit(osm_type, name))
                .verified(false),
        )
    }
}

#[async_trait]
impl Harvester for NominatimHarvester {
    fn source(&self) -> Source {
        Source::Osm
    }

    fn queries(&self) -> Vec<String> {
        self.queries.clone()
    }

    async fn run_query(&self, query: &str) -> HarvestResult<Vec<RawCandidate>> {
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", "50"),
                ("countrycodes", "ph"),
                ("addressdetails", "1"),
            ])
            .send()
            .await
            .map_err(|e| HarvestError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::ServiceStatus {
                service: SERVICE,
                status: status.to_string(),
            });
        }

        let results: Vec<Value> = response
            .json()
            .await
            .map_err(|e| HarvestError::Http(Box::new(e)))?;

        debug!(query = %query, hits = results.len(), "nominatim search done");
        Ok(results
            .iter()
            .filter_map(|r| self.candidate_from_result(r))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::Coordinates;
    use serde_json::json;

    fn harvester() -> NominatimHarvester {
        NominatimHarvester::new(&MunicipalityConfig::basey())
    }

    #[test]
    fn test_hamlets_become_sitios() {
        assert_eq!(
            NominatimHarvester::classify_hit("hamlet", "Canlobo"),
            Category::Sitio
        );
        assert_eq!(
            NominatimHarvester::classify_hit("village", "Looc"),
            Category::Sitio
        );
    }

    #[test]
    fn test_buildings_become_landmarks() {
        assert_eq!(
            NominatimHarvester::classify_hit("place_of_worship", "St. Michael Chapel"),
            Category::Landmark
        );
    }

    #[test]
    fn test_name_keywords_override_osm_type() {
        assert_eq!(
            NominatimHarvester::classify_hit("building", "Sitio Tingib Chapel"),
            Category::Sitio
        );
    }

    #[test]
    fn test_candidate_takes_first_display_name_segment() {
        let result = json!({
            "display_name": "Sohoton Cave, Basey, Samar, Eastern Visayas, Philippines",
            "lat": "11.4200",
            "lon": "125.1200",
            "type": "cave_entrance"
        });

        let candidate = harvester().candidate_from_result(&result).unwrap();
        assert_eq!(candidate.name, "Sohoton Cave");
        assert_eq!(candidate.coordinates, Some(Coordinates::new(11.42, 125.12)));
        assert_eq!(candidate.category, Some(Category::Landmark));
        assert!(!candidate.verified, "OSM hits need human review");
    }

    #[test]
    fn test_generic_names_are_skipped() {
        for name in ["Basey", "Samar", "Eastern Samar"] {
            let result = json!({
                "display_name": format!("{}, Philippines", name),
                "lat": "11.3",
                "lon": "125.0",
                "type": "administrative"
            });
            assert!(harvester().candidate_from_result(&result).is_none());
        }
    }

    #[test]
    fn test_unparseable_coordinates_drop_the_hit() {
        let result = json!({
            "display_name": "Somewhere, Basey",
            "lat": "not-a-number",
            "lon": "125.0",
            "type": "hamlet"
        });
        assert!(harvester().candidate_from_result(&result).is_none());
    }
}
