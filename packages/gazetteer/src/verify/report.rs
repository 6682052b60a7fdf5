//! Verification statistics and the unverified-by-group listing.

use crate::types::dataset::CanonicalDataset;
use crate::types::record::{Category, LocationRecord, Source};

/// How many entries of a group the operator surface shows before
/// collapsing the rest into a remainder count. The underlying lists are
/// never truncated.
pub const DISPLAY_CAP: usize = 15;

/// Semantic display groups for unverified records, first match wins.
/// Same discipline as the classifier rule table: ordered data, evaluated
/// top to bottom against the lowercased name.
pub const UNVERIFIED_GROUPS: &[(&str, &[&str])] = &[
    ("Schools", &["school", "elementary", "high school", "learning"]),
    ("Churches", &["church", "chapel", "cathedral", "parish"]),
    ("Government", &["hall", "town hall", "barangay"]),
    ("Health", &["hospital", "clinic", "health"]),
    ("Tourism", &["cave", "waterfall", "beach", "resort", "park"]),
    ("Infrastructure", &["bridge", "terminal", "wharf", "gymnasium"]),
];

/// Count and verified-count for one category bucket.
#[derive(Debug, Clone, Copy)]
pub struct CategoryStats {
    pub category: Category,
    pub total: usize,
    pub verified: usize,
}

impl CategoryStats {
    pub fn unverified(&self) -> usize {
        self.total - self.verified
    }
}

/// Unverified records under one semantic label.
#[derive(Debug, Clone)]
pub struct UnverifiedGroup {
    pub label: &'static str,
    pub records: Vec<LocationRecord>,
}

/// Aggregate statistics over the canonical dataset.
#[derive(Debug, Clone)]
pub struct VerificationReport {
    pub municipality: String,
    pub province: String,
    pub total_locations: usize,
    pub last_updated: String,
    /// Per-category stats, in bucket order
    pub categories: Vec<CategoryStats>,
    /// Record count per source, most trusted source first
    pub source_counts: Vec<(Source, usize)>,
    pub unverified_total: usize,
}

impl VerificationReport {
    pub fn build(dataset: &CanonicalDataset) -> Self {
        let categories: Vec<CategoryStats> = dataset
            .locations
            .iter()
            .map(|(category, bucket)| CategoryStats {
                category: *category,
                total: bucket.len(),
                verified: bucket.iter().filter(|r| r.verified).count(),
            })
            .collect();

        let mut source_counts: Vec<(Source, usize)> = Source::IN_PRIORITY_ORDER
            .iter()
            .map(|source| {
                let count = dataset.records().filter(|r| r.source == *source).count();
                (*source, count)
            })
            .collect();
        source_counts.retain(|(_, count)| *count > 0);

        Self {
            municipality: dataset.metadata.municipality.clone(),
            province: dataset.metadata.province.clone(),
            total_locations: dataset.total(),
            last_updated: dataset.metadata.last_updated.clone(),
            categories,
            source_counts,
            unverified_total: dataset.records().filter(|r| !r.verified).count(),
        }
    }

    pub fn verified_total(&self) -> usize {
        self.total_locations - self.unverified_total
    }
}

/// Bucket every unverified record into the semantic display groups.
///
/// Always returns one entry per group plus a trailing "Other", each with
/// its full (untruncated) record list sorted by display name; empty groups
/// are kept so callers can decide what to show.
pub fn group_unverified(dataset: &CanonicalDataset) -> Vec<UnverifiedGroup> {
    let mut groups: Vec<UnverifiedGroup> = UNVERIFIED_GROUPS
        .iter()
        .map(|&(label, _)| UnverifiedGroup {
            label,
            records: Vec::new(),
        })
        .collect();
    let mut other = UnverifiedGroup {
        label: "Other",
        records: Vec::new(),
    };

    for record in dataset.records().filter(|r| !r.verified) {
        let lowered = record.name.to_lowercase();
        let slot = UNVERIFIED_GROUPS
            .iter()
            .position(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)));
        match slot {
            Some(i) => groups[i].records.push(record.clone()),
            None => other.records.push(record.clone()),
        }
    }

    groups.push(other);
    for group in &mut groups {
        group.records.sort_by(|a, b| a.name.cmp(&b.name));
    }
    groups
}
