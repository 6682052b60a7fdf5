//! The merger: folds raw candidates from every source into the canonical
//! dataset, keyed by normalized name.
//!
//! Policy is first-seen-wins per merge key, which makes ingestion order the
//! effective source priority. Callers drive adapters in the order declared
//! by [`Source::IN_PRIORITY_ORDER`](crate::types::Source::IN_PRIORITY_ORDER)
//! so the declared trust ranking, not incidental call order, decides
//! conflicts.

use std::collections::HashSet;
use tracing::debug;

use crate::classify::classify;
use crate::geo::BoundingBox;
use crate::normalize::merge_key;
use crate::types::dataset::CanonicalDataset;
use crate::types::record::{Category, LocationRecord, RawCandidate};

/// What the merger did with one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Accepted into the given category bucket
    Added(Category),
    /// A record with the same merge key already exists
    SkippedKnown,
    /// Coordinates fall outside the municipal bounding box
    OutOfBounds,
    /// Name or coordinates missing; dropped without being an error
    MissingFields,
}

/// Accumulates candidates into a [`CanonicalDataset`].
///
/// Owns the known-key set for the run; resuming against an existing dataset
/// seeds that set, which is what makes a re-run skip everything it already
/// has (the only resumability mechanism there is).
pub struct Merger {
    bounds: BoundingBox,
    known: HashSet<String>,
}

impl Merger {
    /// A merger for a fresh dataset.
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            known: HashSet::new(),
        }
    }

    /// A merger resuming against records already in the dataset.
    pub fn resume(bounds: BoundingBox, dataset: &CanonicalDataset) -> Self {
        Self {
            bounds,
            known: dataset.merge_keys(),
        }
    }

    /// Number of distinct merge keys seen so far.
    pub fn known_count(&self) -> usize {
        self.known.len()
    }

    /// Accept or drop one candidate. Idempotent per merge key: a second
    /// candidate with the same key is a no-op.
    pub fn ingest(
        &mut self,
        dataset: &mut CanonicalDataset,
        candidate: RawCandidate,
    ) -> IngestOutcome {
        if candidate.name.trim().is_empty() {
            return IngestOutcome::MissingFields;
        }
        let Some(coordinates) = candidate.coordinates else {
            return IngestOutcome::MissingFields;
        };

        if !self.bounds.contains(coordinates.lat, coordinates.lng) {
            debug!(name = %candidate.name, source = %candidate.source, "outside bounds, dropped");
            return IngestOutcome::OutOfBounds;
        }

        let key = merge_key(&candidate.name);
        if self.known.contains(&key) {
            return IngestOutcome::SkippedKnown;
        }

        let category = candidate
            .category
            .unwrap_or_else(|| classify(&candidate.name, &candidate.tags, Category::Poi));

        dataset.insert(LocationRecord {
            name: candidate.name,
            category,
            coordinates,
            source: candidate.source,
            address: candidate.address,
            external_id: candidate.external_id,
            verified: candidate.verified,
        });
        self.known.insert(key);

        IngestOutcome::Added(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MunicipalityConfig;
    use crate::types::record::Source;

    fn setup() -> (Merger, CanonicalDataset) {
        let config = MunicipalityConfig::basey();
        (
            Merger::new(config.bounds),
            CanonicalDataset::empty(&config),
        )
    }

    fn candidate(name: &str, lat: f64, lng: f64, source: Source) -> RawCandidate {
        RawCandidate::new(name, source).with_coordinates(lat, lng)
    }

    #[test]
    fn test_ingest_is_idempotent_per_key() {
        let (mut merger, mut dataset) = setup();

        let first = merger.ingest(
            &mut dataset,
            candidate("Old San Agustin", 11.35, 125.10, Source::Geojson)
                .with_category(Category::Barangay),
        );
        assert_eq!(first, IngestOutcome::Added(Category::Barangay));

        // Same place under a punctuation-variant spelling from a later source
        let second = merger.ingest(
            &mut dataset,
            candidate("old-sanagustin", 11.35, 125.10, Source::Osm),
        );
        assert_eq!(second, IngestOutcome::SkippedKnown);
        assert_eq!(dataset.total(), 1);
        assert_eq!(
            dataset.locations[&Category::Barangay][0].source,
            Source::Geojson
        );
    }

    #[test]
    fn test_missing_fields_are_dropped_silently() {
        let (mut merger, mut dataset) = setup();

        let no_coords = RawCandidate::new("Somewhere", Source::Google);
        assert_eq!(
            merger.ingest(&mut dataset, no_coords),
            IngestOutcome::MissingFields
        );

        let no_name = candidate("   ", 11.3, 125.0, Source::Google);
        assert_eq!(
            merger.ingest(&mut dataset, no_name),
            IngestOutcome::MissingFields
        );
        assert_eq!(dataset.total(), 0);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let (mut merger, mut dataset) = setup();

        // Calbayog is far up the coast, outside the Basey box
        let outcome = merger.ingest(
            &mut dataset,
            candidate("Calbayog Airport", 12.0726, 124.5450, Source::Google),
        );
        assert_eq!(outcome, IngestOutcome::OutOfBounds);
        assert_eq!(dataset.total(), 0);
    }

    #[test]
    fn test_unclassified_candidates_default_to_poi() {
        let (mut merger, mut dataset) = setup();

        let outcome = merger.ingest(
            &mut dataset,
            candidate("Looc Kiosk", 11.30, 125.05, Source::Google),
        );
        assert_eq!(outcome, IngestOutcome::Added(Category::Poi));
    }

    #[test]
    fn test_resume_skips_persisted_records() {
        let config = MunicipalityConfig::basey();
        let mut dataset = CanonicalDataset::empty(&config);
        let mut merger = Merger::new(config.bounds);
        merger.ingest(
            &mut dataset,
            candidate("Basey Church", 11.2792, 125.0650, Source::Manual)
                .with_category(Category::Landmark),
        );

        // A new run against the same dataset must not duplicate
        let mut resumed = Merger::resume(config.bounds, &dataset);
        let outcome = resumed.ingest(
            &mut dataset,
            candidate("BASEY CHURCH", 11.2792, 125.0650, Source::Osm),
        );
        assert_eq!(outcome, IngestOutcome::SkippedKnown);
        assert_eq!(dataset.total(), 1);
    }
}
