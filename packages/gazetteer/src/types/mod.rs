//! Core data types: location records, candidates, and the canonical dataset.

pub mod dataset;
pub mod record;

pub use dataset::{CanonicalDataset, DatasetMetadata};
pub use record::{Category, Coordinates, LocationRecord, RawCandidate, Source};
