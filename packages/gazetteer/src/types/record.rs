//! Location records and raw harvested candidates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category bucket a location belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Official primary division of the municipality
    Barangay,
    /// Informal sub-division (sitio, purok, zone)
    Sitio,
    /// Named point of reference (church, school, bridge, ...)
    Landmark,
    /// Anything else worth keeping
    Poi,
}

impl Category {
    /// Stable lowercase tag, matching the persisted document keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Barangay => "barangay",
            Category::Sitio => "sitio",
            Category::Landmark => "landmark",
            Category::Poi => "poi",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a record was harvested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Municipal boundary polygon file (centroids)
    Geojson,
    /// Google Places text search
    Google,
    /// OpenStreetMap / Nominatim geocoding
    Osm,
    /// Hand-geocoded entry from the official census roster
    Psa,
    /// Hand-curated landmark list
    Manual,
}

impl Source {
    /// Every known source, in declared trust order (most trusted first).
    pub const IN_PRIORITY_ORDER: [Source; 5] = [
        Source::Geojson,
        Source::Manual,
        Source::Google,
        Source::Osm,
        Source::Psa,
    ];

    /// Explicit trust ranking. Higher values win merge conflicts, which
    /// under first-seen-wins ingestion means higher-ranked sources must be
    /// harvested first. `IN_PRIORITY_ORDER` is derived from this ranking.
    pub fn priority(self) -> u8 {
        match self {
            Source::Geojson => 4,
            Source::Manual => 3,
            Source::Google => 2,
            Source::Osm => 1,
            Source::Psa => 0,
        }
    }

    /// Stable lowercase tag, matching the persisted document.
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Geojson => "geojson",
            Source::Google => "google",
            Source::Osm => "osm",
            Source::Psa => "psa",
            Source::Manual => "manual",
        }
    }

    /// Parse a lowercase source tag.
    pub fn parse(tag: &str) -> Option<Source> {
        match tag {
            "geojson" => Some(Source::Geojson),
            "google" => Some(Source::Google),
            "osm" => Some(Source::Osm),
            "psa" => Some(Source::Psa),
            "manual" => Some(Source::Manual),
            _ => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A latitude/longitude pair in floating point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Round both components to 6 decimal places (~0.1 m), the precision
    /// the canonical store persists.
    pub fn rounded(self) -> Self {
        Self {
            lat: (self.lat * 1e6).round() / 1e6,
            lng: (self.lng * 1e6).round() / 1e6,
        }
    }
}

/// A canonical location entry as persisted in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Display name
    pub name: String,

    /// Category bucket, duplicated at the entry level in the document
    #[serde(rename = "type")]
    pub category: Category,

    /// Position in degrees
    pub coordinates: Coordinates,

    /// Harvesting source
    pub source: Source,

    /// Human-readable address, may be empty
    #[serde(default)]
    pub address: String,

    /// Identifier at the originating service (e.g. a place id)
    #[serde(rename = "externalId", default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    /// Whether a human has confirmed this entry
    #[serde(default)]
    pub verified: bool,
}

/// A raw candidate emitted by a harvesting adapter, before the merger
/// accepts or drops it.
///
/// Candidates are allowed to be incomplete: a missing name or missing
/// coordinates makes the merger drop them silently.
#[derive(Debug, Clone)]
pub struct RawCandidate {
    /// Display name as reported by the source (may be empty)
    pub name: String,

    /// Position, if the source provided one
    pub coordinates: Option<Coordinates>,

    /// Source-provided category tags (e.g. Google place types)
    pub tags: Vec<String>,

    /// Which adapter produced this candidate
    pub source: Source,

    /// Human-readable address
    pub address: String,

    /// Identifier at the originating service
    pub external_id: Option<String>,

    /// Whether the source is trusted enough to mark the entry verified
    pub verified: bool,

    /// Adapter-side classification. When set, the merger skips the
    /// keyword classifier entirely.
    pub category: Option<Category>,
}

impl RawCandidate {
    /// Create a minimal candidate.
    pub fn new(name: impl Into<String>, source: Source) -> Self {
        Self {
            name: name.into(),
            coordinates: None,
            tags: Vec::new(),
            source,
            address: String::new(),
            external_id: None,
            verified: false,
            category: None,
        }
    }

    /// Set the position.
    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Some(Coordinates::new(lat, lng));
        self
    }

    /// Set the source-provided category tags.
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(|t| t.into()).collect();
        self
    }

    /// Set the address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set the external identifier.
    pub fn with_external_id(mut self, id: impl Into<String>) -> Self {
        self.external_id = Some(id.into());
        self
    }

    /// Mark the candidate as verified.
    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    /// Pre-classify the candidate, bypassing the keyword classifier.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order_matches_ranking() {
        let ranks: Vec<u8> = Source::IN_PRIORITY_ORDER
            .iter()
            .map(|s| s.priority())
            .collect();
        let mut sorted = ranks.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(ranks, sorted);
    }

    #[test]
    fn test_source_tag_round_trip() {
        for source in Source::IN_PRIORITY_ORDER {
            assert_eq!(Source::parse(source.as_str()), Some(source));
        }
        assert_eq!(Source::parse("carrier-pigeon"), None);
    }

    #[test]
    fn test_coordinates_rounding() {
        let coords = Coordinates::new(11.279_212_345, 125.065_098_765);
        let rounded = coords.rounded();
        assert_eq!(rounded.lat, 11.279_212);
        assert_eq!(rounded.lng, 125.065_099);
    }

    #[test]
    fn test_category_serializes_to_lowercase_tag() {
        let json = serde_json::to_string(&Category::Barangay).unwrap();
        assert_eq!(json, "\"barangay\"");
    }
}
