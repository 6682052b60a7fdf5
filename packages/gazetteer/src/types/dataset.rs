//! The canonical dataset: category buckets plus document metadata.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::MunicipalityConfig;
use crate::normalize::merge_key;
use crate::types::record::{Category, LocationRecord, Source};

/// Document-level metadata of the canonical store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub municipality: String,
    pub province: String,
    #[serde(default)]
    pub total_locations: usize,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// The single merged, deduplicated collection of location records,
/// organized into category buckets.
///
/// Buckets keep insertion order (via `IndexMap`) so the persisted document
/// is stable across runs; records within a bucket are kept sorted by
/// display name after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalDataset {
    pub metadata: DatasetMetadata,
    #[serde(default)]
    pub locations: IndexMap<Category, Vec<LocationRecord>>,
}

impl CanonicalDataset {
    /// An empty dataset seeded with the municipality profile.
    pub fn empty(config: &MunicipalityConfig) -> Self {
        Self {
            metadata: DatasetMetadata {
                municipality: config.municipality.clone(),
                province: config.province.clone(),
                total_locations: 0,
                last_updated: String::new(),
                sources: Vec::new(),
            },
            locations: IndexMap::new(),
        }
    }

    /// Total record count across all buckets.
    pub fn total(&self) -> usize {
        self.locations.values().map(Vec::len).sum()
    }

    /// Iterate every record, ignoring category.
    pub fn records(&self) -> impl Iterator<Item = &LocationRecord> {
        self.locations.values().flatten()
    }

    /// The merge keys of every record currently in the dataset.
    pub fn merge_keys(&self) -> HashSet<String> {
        self.records().map(|r| merge_key(&r.name)).collect()
    }

    /// Append a record to its category bucket, keeping the bucket sorted
    /// by display name and the total count current.
    pub fn insert(&mut self, record: LocationRecord) {
        let bucket = self.locations.entry(record.category).or_default();
        bucket.push(record);
        bucket.sort_by(|a, b| a.name.cmp(&b.name));
        self.metadata.total_locations = self.total();
    }

    /// Stable re-sort of one bucket by display name.
    pub fn sort_bucket(&mut self, category: Category) {
        if let Some(bucket) = self.locations.get_mut(&category) {
            bucket.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }

    /// Stable re-sort of every bucket by display name.
    pub fn sort_all(&mut self) {
        for bucket in self.locations.values_mut() {
            bucket.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }

    /// Delete buckets that have become empty. An emptied bucket is removed
    /// from the document entirely rather than persisted as `[]`.
    pub fn remove_empty_buckets(&mut self) {
        self.locations.retain(|_, bucket| !bucket.is_empty());
    }

    /// Mark every record from the given source as verified.
    /// Returns how many records were flipped.
    pub fn mark_source_verified(&mut self, source: Source) -> usize {
        let mut flipped = 0;
        for record in self.locations.values_mut().flatten() {
            if record.source == source && !record.verified {
                record.verified = true;
                flipped += 1;
            }
        }
        flipped
    }

    /// Bring the document into export shape: buckets sorted and pruned,
    /// coordinates rounded, metadata recomputed, timestamp refreshed.
    pub fn prepare_for_export(&mut self, timestamp: String) {
        self.remove_empty_buckets();
        self.sort_all();
        for record in self.locations.values_mut().flatten() {
            record.coordinates = record.coordinates.rounded();
        }
        self.metadata.total_locations = self.total();
        self.metadata.last_updated = timestamp;

        let mut sources: Vec<Source> = self
            .records()
            .map(|r| r.source)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        sources.sort_by(|a, b| b.priority().cmp(&a.priority()));
        self.metadata.sources = sources;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::Coordinates;

    fn record(name: &str, category: Category) -> LocationRecord {
        LocationRecord {
            name: name.to_string(),
            category,
            coordinates: Coordinates::new(11.3, 125.0),
            source: Source::Manual,
            address: String::new(),
            external_id: None,
            verified: false,
        }
    }

    #[test]
    fn test_insert_keeps_bucket_sorted() {
        let config = MunicipalityConfig::basey();
        let mut dataset = CanonicalDataset::empty(&config);

        dataset.insert(record("Mercado", Category::Barangay));
        dataset.insert(record("Anglit", Category::Barangay));
        dataset.insert(record("Loyo", Category::Barangay));

        let names: Vec<&str> = dataset.locations[&Category::Barangay]
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, ["Anglit", "Loyo", "Mercado"]);
        assert_eq!(dataset.metadata.total_locations, 3);
    }

    #[test]
    fn test_mark_source_verified_counts_flips_only() {
        let config = MunicipalityConfig::basey();
        let mut dataset = CanonicalDataset::empty(&config);

        let mut verified = record("Basey Church", Category::Landmark);
        verified.verified = true;
        dataset.insert(verified);

        let mut osm = record("Sohoton Cave", Category::Landmark);
        osm.source = Source::Osm;
        dataset.insert(osm);

        assert_eq!(dataset.mark_source_verified(Source::Osm), 1);
        assert_eq!(dataset.mark_source_verified(Source::Osm), 0);
        assert!(dataset.records().all(|r| r.source != Source::Osm || r.verified));
    }

    #[test]
    fn test_prepare_for_export_rounds_and_prunes() {
        let config = MunicipalityConfig::basey();
        let mut dataset = CanonicalDataset::empty(&config);

        let mut rec = record("Basey Bridge", Category::Landmark);
        rec.coordinates = Coordinates::new(11.279_812_345_6, 125.066_000_111_1);
        dataset.insert(rec);
        dataset.locations.insert(Category::Sitio, Vec::new());

        dataset.prepare_for_export("2024-06-01 12:00:00".to_string());

        assert!(!dataset.locations.contains_key(&Category::Sitio));
        let stored = &dataset.locations[&Category::Landmark][0];
        assert_eq!(stored.coordinates.lat, 11.279_812);
        assert_eq!(dataset.metadata.sources, vec![Source::Manual]);
        assert_eq!(dataset.metadata.last_updated, "2024-06-01 12:00:00");
    }
}
