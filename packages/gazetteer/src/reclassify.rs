//! Post-merge reclassification: relocates misfiled records between
//! category buckets based on keyword evidence in the name.
//!
//! Explicitly invoked from the cleanup surface; never runs automatically
//! on ingest, so it must be re-run whenever the rule set changes.

use tracing::info;

use crate::types::dataset::CanonicalDataset;
use crate::types::record::Category;

/// A single relocation rule: records whose lowercased name contains any of
/// the keywords belong in `target` instead of the scanned bucket.
#[derive(Debug, Clone, Copy)]
pub struct MoveRule {
    pub keywords: &'static [&'static str],
    pub target: Category,
}

/// The standing cleanup for the sitio bucket: barangay halls reported by
/// place search land under `sitio` because of the "barangay" keyword, but
/// they are buildings, not divisions.
pub const SITIO_CLEANUP_RULES: &[MoveRule] = &[MoveRule {
    keywords: &["hall", "barangay"],
    target: Category::Landmark,
}];

/// Scan one bucket and relocate every record matched by a rule.
///
/// Both affected buckets are re-sorted by display name; the scanned bucket
/// is deleted from the dataset if it ends up empty. Returns the number of
/// records moved.
pub fn reclassify(
    dataset: &mut CanonicalDataset,
    from: Category,
    rules: &[MoveRule],
) -> usize {
    let Some(bucket) = dataset.locations.get_mut(&from) else {
        return 0;
    };

    let mut moved = Vec::new();
    bucket.retain(|record| {
        let lowered = record.name.to_lowercase();
        let rule = rules
            .iter()
            .filter(|r| r.target != from)
            .find(|r| r.keywords.iter().any(|kw| lowered.contains(kw)));
        match rule {
            Some(rule) => {
                moved.push((record.clone(), rule.target));
                false
            }
            None => true,
        }
    });

    let count = moved.len();
    for (mut record, target) in moved {
        info!(name = %record.name, from = %from, to = %target, "reclassified");
        record.category = target;
        dataset.insert(record);
    }

    dataset.sort_bucket(from);
    dataset.remove_empty_buckets();
    dataset.metadata.total_locations = dataset.total();

    count
}
