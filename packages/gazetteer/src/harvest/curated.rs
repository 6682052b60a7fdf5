//! Hand-curated landmark harvester.
//!
//! A short list of places every resident knows, maintained in code because
//! none of the automated sources reliably carry all of them. Second only
//! to the boundary file in trust.

use async_trait::async_trait;

use crate::config::MunicipalityConfig;
use crate::error::HarvestResult;
use crate::harvest::Harvester;
use crate::types::record::{Category, RawCandidate, Source};

/// One curated entry: display name and position.
#[derive(Debug, Clone)]
pub struct CuratedEntry {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

/// The well-known Basey landmarks.
const BASEY_LANDMARKS: &[CuratedEntry] = &[
    CuratedEntry {
        name: "Basey Church (San Miguel Archangel Parish)",
        lat: 11.2792,
        lng: 125.0650,
    },
    CuratedEntry {
        name: "Basey Municipal Hall",
        lat: 11.2795,
        lng: 125.0653,
    },
    CuratedEntry {
        name: "Basey Public Market",
        lat: 11.2790,
        lng: 125.0645,
    },
    CuratedEntry {
        name: "Sohoton National Park",
        lat: 11.4167,
        lng: 125.1167,
    },
    CuratedEntry {
        name: "Sohoton Cave",
        lat: 11.4200,
        lng: 125.1200,
    },
    CuratedEntry {
        name: "Basey Bridge",
        lat: 11.2798,
        lng: 125.0660,
    },
];

/// Emits the curated landmark list as verified candidates.
pub struct CuratedLandmarks {
    municipality: String,
    province: String,
    entries: &'static [CuratedEntry],
}

impl CuratedLandmarks {
    /// The built-in Basey list.
    pub fn basey(config: &MunicipalityConfig) -> Self {
        Self {
            municipality: config.municipality.clone(),
            province: config.province.clone(),
            entries: BASEY_LANDMARKS,
        }
    }
}

#[async_trait]
impl Harvester for CuratedLandmarks {
    fn source(&self) -> Source {
        Source::Manual
    }

    fn queries(&self) -> Vec<String> {
        vec!["curated landmarks".to_string()]
    }

    async fn run_query(&self, _query: &str) -> HarvestResult<Vec<RawCandidate>> {
        Ok(self
            .entries
            .iter()
            .map(|entry| {
                RawCandidate::new(entry.name, Source::Manual)
                    .with_coordinates(entry.lat, entry.lng)
                    .with_address(format!(
                        "{}, {}, {}",
                        entry.name, self.municipality, self.province
                    ))
                    .with_category(Category::Landmark)
                    .verified(true)
            })
            .collect())
    }
}
