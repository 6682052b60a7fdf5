//! Bounds re-validation of the persisted dataset.
//!
//! Ingestion already rejects out-of-bounds candidates; this pass re-checks
//! every stored record to catch entries that arrived by other paths, such
//! as hand edits to the store file.

use crate::geo::BoundingBox;
use crate::types::dataset::CanonicalDataset;
use crate::types::record::LocationRecord;

/// Every record whose coordinates fall outside the bounding box.
pub fn find_out_of_bounds(
    dataset: &CanonicalDataset,
    bounds: &BoundingBox,
) -> Vec<LocationRecord> {
    dataset
        .records()
        .filter(|r| !bounds.contains(r.coordinates.lat, r.coordinates.lng))
        .cloned()
        .collect()
}
