//! Duplicate detection across the whole merged dataset.
//!
//! Three passes, all over the flattened record set and all ignoring
//! category:
//! - exact-name groups under the weak display key;
//! - merge-key collisions the exact pass cannot see (names the merger
//!   would have collapsed, entered by paths that bypass ingestion);
//! - pairwise proximity under the haversine distance.
//!
//! The proximity pass is a plain O(n²) scan; the dataset stays in the
//! hundreds of records.

use std::collections::BTreeMap;

use crate::geo::haversine_m;
use crate::normalize::{display_key, merge_key};
use crate::types::dataset::CanonicalDataset;
use crate::types::record::LocationRecord;

/// Records flagged as "too close" when nearer than this, in meters.
pub const PROXIMITY_THRESHOLD_M: f64 = 10.0;

/// A set of records sharing one comparison key.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// The shared key (display key or merge key depending on the pass)
    pub key: String,
    pub records: Vec<LocationRecord>,
}

/// Two distinctly-named records closer than the threshold.
#[derive(Debug, Clone)]
pub struct ProximityPair {
    pub a: LocationRecord,
    pub b: LocationRecord,
    pub distance_m: f64,
}

/// Group records by display key and report every group of more than one.
pub fn find_name_duplicates(dataset: &CanonicalDataset) -> Vec<DuplicateGroup> {
    let mut groups: BTreeMap<String, Vec<LocationRecord>> = BTreeMap::new();
    for record in dataset.records() {
        groups
            .entry(display_key(&record.name))
            .or_default()
            .push(record.clone());
    }

    groups
        .into_iter()
        .filter(|(_, records)| records.len() > 1)
        .map(|(key, records)| DuplicateGroup { key, records })
        .collect()
}

/// Report merge-key collisions between records whose display keys differ.
///
/// These are names the merger treats as identical ("Balo-og" / "Baloog")
/// that nevertheless coexist in the store, which can only happen when a
/// record entered by a path that skipped ingestion.
pub fn find_merge_collisions(dataset: &CanonicalDataset) -> Vec<DuplicateGroup> {
    let mut groups: BTreeMap<String, Vec<LocationRecord>> = BTreeMap::new();
    for record in dataset.records() {
        groups
            .entry(merge_key(&record.name))
            .or_default()
            .push(record.clone());
    }

    groups
        .into_iter()
        .filter(|(_, records)| {
            if records.len() < 2 {
                return false;
            }
            // Groups uniform under the display key are already reported
            // by the exact-name pass.
            let first = display_key(&records[0].name);
            records.iter().any(|r| display_key(&r.name) != first)
        })
        .map(|(key, records)| DuplicateGroup { key, records })
        .collect()
}

/// Pairwise proximity scan over all records with different display names.
pub fn find_too_close(dataset: &CanonicalDataset, threshold_m: f64) -> Vec<ProximityPair> {
    let all: Vec<&LocationRecord> = dataset.records().collect();
    let mut pairs = Vec::new();

    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            if a.name == b.name {
                continue;
            }
            let distance_m = haversine_m(a.coordinates, b.coordinates);
            if distance_m < threshold_m {
                pairs.push(ProximityPair {
                    a: (*a).clone(),
                    b: (*b).clone(),
                    distance_m,
                });
            }
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MunicipalityConfig;
    use crate::types::record::{Category, Coordinates, Source};

    fn record(name: &str, lat: f64, lng: f64) -> LocationRecord {
        LocationRecord {
            name: name.to_string(),
            category: Category::Landmark,
            coordinates: Coordinates::new(lat, lng),
            source: Source::Google,
            address: String::new(),
            external_id: None,
            verified: true,
        }
    }

    fn dataset_with(records: Vec<LocationRecord>) -> CanonicalDataset {
        let config = MunicipalityConfig::basey();
        let mut dataset = CanonicalDataset::empty(&config);
        for r in records {
            dataset.insert(r);
        }
        dataset
    }

    #[test]
    fn test_case_variant_names_are_exact_duplicates() {
        let dataset = dataset_with(vec![
            record("Basey Church", 11.2792, 125.0650),
            record("basey church", 11.2999, 125.0999),
        ]);

        let dups = find_name_duplicates(&dataset);
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].key, "basey church");
        assert_eq!(dups[0].records.len(), 2);
    }

    #[test]
    fn test_hyphen_variants_are_merge_collisions_not_exact_duplicates() {
        let dataset = dataset_with(vec![
            record("Balo-og", 11.30, 125.00),
            record("Baloog", 11.31, 125.01),
        ]);

        assert!(find_name_duplicates(&dataset).is_empty());

        let collisions = find_merge_collisions(&dataset);
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].key, "baloog");
    }

    #[test]
    fn test_exact_duplicates_not_repeated_as_merge_collisions() {
        let dataset = dataset_with(vec![
            record("Basey Church", 11.2792, 125.0650),
            record("basey church", 11.2999, 125.0999),
        ]);
        assert!(find_merge_collisions(&dataset).is_empty());
    }

    #[test]
    fn test_proximity_flags_pairs_under_threshold() {
        // ~5 m apart in latitude
        let dataset = dataset_with(vec![
            record("Old Wharf", 11.279_20, 125.0650),
            record("Ferry Steps", 11.279_245, 125.0650),
        ]);

        let pairs = find_too_close(&dataset, PROXIMITY_THRESHOLD_M);
        assert_eq!(pairs.len(), 1);
        assert!(pairs[0].distance_m < PROXIMITY_THRESHOLD_M);
    }

    #[test]
    fn test_proximity_ignores_pairs_past_threshold() {
        // ~50 m apart in latitude
        let dataset = dataset_with(vec![
            record("Old Wharf", 11.279_20, 125.0650),
            record("Ferry Steps", 11.279_65, 125.0650),
        ]);
        assert!(find_too_close(&dataset, PROXIMITY_THRESHOLD_M).is_empty());
    }

    #[test]
    fn test_proximity_skips_same_name_pairs() {
        let dataset = dataset_with(vec![
            record("Basey Church", 11.2792, 125.0650),
            record("Basey Church", 11.2792, 125.0650),
        ]);
        assert!(find_too_close(&dataset, PROXIMITY_THRESHOLD_M).is_empty());
    }
}
