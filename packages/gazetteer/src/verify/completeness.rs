//! Completeness check against the authoritative division roster.

use std::collections::HashSet;

use crate::normalize::merge_key;
use crate::types::dataset::CanonicalDataset;

/// Authoritative names with no corresponding record in the dataset,
/// reported in their original spelling and order. Pure set difference
/// under the merge key; nothing is mutated.
pub fn missing_divisions<'a, I>(dataset: &CanonicalDataset, authoritative: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: HashSet<String> = dataset.merge_keys();

    authoritative
        .into_iter()
        .filter(|name| !present.contains(&merge_key(name)))
        .map(|name| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MunicipalityConfig;
    use crate::types::record::{Category, Coordinates, LocationRecord, Source};

    fn barangay(name: &str) -> LocationRecord {
        LocationRecord {
            name: name.to_string(),
            category: Category::Barangay,
            coordinates: Coordinates::new(11.3, 125.0),
            source: Source::Geojson,
            address: String::new(),
            external_id: None,
            verified: true,
        }
    }

    #[test]
    fn test_reports_absent_divisions_with_original_spelling() {
        let config = MunicipalityConfig::basey();
        let mut dataset = CanonicalDataset::empty(&config);
        dataset.insert(barangay("Amandayehan"));

        let missing = missing_divisions(&dataset, ["Amandayehan", "Anglit"]);
        assert_eq!(missing, vec!["Anglit".to_string()]);
    }

    #[test]
    fn test_spelling_variants_count_as_present() {
        let config = MunicipalityConfig::basey();
        let mut dataset = CanonicalDataset::empty(&config);
        // The boundary file spells it without the hyphen
        dataset.insert(barangay("Baloog"));

        let missing = missing_divisions(&dataset, ["Balo-og"]);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_full_roster_against_empty_dataset() {
        let config = MunicipalityConfig::basey();
        let dataset = CanonicalDataset::empty(&config);
        let missing =
            missing_divisions(&dataset, config.barangays.iter().map(String::as_str));
        assert_eq!(missing.len(), config.barangays.len());
    }
}
