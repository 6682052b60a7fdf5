//! Google Places text-search harvester.
//!
//! Runs the focused query plan against the Places Text Search endpoint
//! and emits one candidate per hit, carrying the hit's place types as
//! classification tags. Hits are trusted (verified = true) because Places
//! results are already curated by the service.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::MunicipalityConfig;
use crate::error::{HarvestError, HarvestResult};
use crate::harvest::Harvester;
use crate::security::SecretString;
use crate::types::record::{Coordinates, RawCandidate, Source};

const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";
const SERVICE: &str = "google places";

/// Environment variable holding the Places API key.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Search terms that surface the sitios and landmarks the boundary file
/// cannot know about. Joined with the municipality and province per query.
const SEARCH_TERMS: &[&str] = &[
    "sitio",
    "purok",
    "elementary school",
    "high school",
    "school",
    "church",
    "chapel",
    "health center",
    "clinic",
    "barangay hall",
    "cave",
    "falls",
    "beach",
    "resort",
    "terminal",
    "port",
    "plaza",
    "market",
    "cemetery",
    "sports complex",
];

/// Harvests candidates from the Places Text Search API.
pub struct GooglePlacesHarvester {
    client: reqwest::Client,
    api_key: SecretString,
    region: String,
    queries: Vec<String>,
}

impl GooglePlacesHarvester {
    pub fn new(api_key: SecretString, config: &MunicipalityConfig) -> Self {
        let queries = SEARCH_TERMS
            .iter()
            .map(|term| format!("{} {} {}", term, config.municipality, config.province))
            .collect();

        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            api_key,
            region: "ph".to_string(),
            queries,
        }
    }

    /// Build from the `GOOGLE_MAPS_API_KEY` environment variable.
    pub fn from_env(config: &MunicipalityConfig) -> HarvestResult<Self> {
        let key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(HarvestError::MissingApiKey { service: SERVICE })?;
        Ok(Self::new(SecretString::new(key), config))
    }

    /// Replace the default query plan.
    pub fn with_queries(mut self, queries: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.queries = queries.into_iter().map(|q| q.into()).collect();
        self
    }

    fn candidate_from_result(result: &Value) -> RawCandidate {
        let name = result
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let coordinates = result
            .get("geometry")
            .and_then(|g| g.get("location"))
            .and_then(|l| {
                Some(Coordinates::new(
                    l.get("lat")?.as_f64()?,
                    l.get("lng")?.as_f64()?,
                ))
            });

        let tags: Vec<String> = result
            .get("types")
            .and_then(Value::as_array)
            .map(|types| {
                types
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let mut candidate = RawCandidate::new(name, Source::Google)
            .with_tags(tags)
            .with_address(
                result
                    .get("formatted_address")
                    .and_then(Value::as_str)
                    .unwrap_or_default(),
            )
            .verified(true);

        // Incomplete hits flow through; the merger drops them silently
        candidate.coordinates = coordinates;
        if let Some(place_id) = result.get("place_id").and_then(Value::as_str) {
            candidate = candidate.with_external_id(place_id);
        }
        candidate
    }
}

#[async_trait]
impl Harvester for GooglePlacesHarvester {
    fn source(&self) -> Source {
        Source::Google
    }

    fn queries(&self) -> Vec<String> {
        self.queries.clone()
    }

    async fn run_query(&self, query: &str) -> HarvestResult<Vec<RawCandidate>> {
        let response = self
            .client
            .get(TEXT_SEARCH_URL)
            .query(&[
                ("query", query),
                ("key", self.api_key.expose()),
                ("region", self.region.as_str()),
            ])
            .send()
            .await
            .map_err(|e| HarvestError::Http(Box::new(e)))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| HarvestError::Http(Box::new(e)))?;

        let status = body
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("MISSING");

        match status {
            "OK" => {}
            "ZERO_RESULTS" => return Ok(Vec::new()),
            other => {
                return Err(HarvestError::ServiceStatus {
                    service: SERVICE,
                    status: other.to_string(),
                })
            }
        }

        let results = body
            .get("results")
            .and_then(Value::as_array)
            .ok_or_else(|| HarvestError::MalformedResponse {
                service: SERVICE,
                reason: "no results array".to_string(),
            })?;

        debug!(query = %query, hits = results.len(), "places search done");
        Ok(results.iter().map(Self::candidate_from_result).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidate_from_full_result() {
        let result = json!({
            "name": "San Miguel Archangel Parish",
            "geometry": { "location": { "lat": 11.2792, "lng": 125.0650 } },
            "types": ["church", "place_of_worship", "point_of_interest"],
            "formatted_address": "Basey, Samar, Philippines",
            "place_id": "ChIJxxxx"
        });

        let candidate = GooglePlacesHarvester::candidate_from_result(&result);
        assert_eq!(candidate.name, "San Miguel Archangel Parish");
        assert_eq!(candidate.coordinates, Some(Coordinates::new(11.2792, 125.0650)));
        assert_eq!(candidate.tags[0], "church");
        assert_eq!(candidate.external_id.as_deref(), Some("ChIJxxxx"));
        assert!(candidate.verified);
        assert!(candidate.category.is_none(), "classification happens at merge");
    }

    #[test]
    fn test_incomplete_result_still_produces_a_candidate() {
        // No geometry: the merger will count it as dropped, not the adapter
        let result = json!({ "name": "Mystery Spot" });
        let candidate = GooglePlacesHarvester::candidate_from_result(&result);
        assert_eq!(candidate.name, "Mystery Spot");
        assert!(candidate.coordinates.is_none());
    }

    #[test]
    fn test_query_plan_names_the_municipality() {
        let config = MunicipalityConfig::basey();
        let harvester =
            GooglePlacesHarvester::new(SecretString::new("test-key"), &config);
        let queries = harvester.queries();
        assert_eq!(queries.len(), SEARCH_TERMS.len());
        assert!(queries.iter().all(|q| q.ends_with("Basey Samar")));
    }

    #[test]
    fn test_from_env_requires_a_key() {
        std::env::remove_var(API_KEY_ENV);
        let config = MunicipalityConfig::basey();
        assert!(matches!(
            GooglePlacesHarvester::from_env(&config),
            Err(HarvestError::MissingApiKey { .. })
        ));
    }
}
