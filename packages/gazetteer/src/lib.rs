//! Canonical Gazetteer Builder
//!
//! Builds and maintains the canonical location gazetteer for a single
//! municipality by merging candidates harvested from heterogeneous sources
//! (the boundary polygon file, Google Places, OpenStreetMap, a curated
//! landmark list) and auditing the merged dataset for duplicates,
//! out-of-bounds coordinates, and completeness against the official
//! barangay roster.
//!
//! # Design
//!
//! - Identity is the normalized name; merging is first-seen-wins, so
//!   sources are harvested in declared trust order.
//! - The engine is synchronous and single-writer; only the adapters that
//!   talk to external services are async.
//! - Classification and reclassification rules are data (ordered keyword
//!   tables), not control flow.
//!
//! # Modules
//!
//! - [`types`] - Location records, candidates, the canonical dataset
//! - [`normalize`] / [`classify`] / [`geo`] - The pure building blocks
//! - [`merge`] - Candidate ingestion with skip-if-known semantics
//! - [`reclassify`] - Keyword-driven relocation between category buckets
//! - [`verify`] - Duplicate, proximity, bounds, and completeness audits
//! - [`harvest`] - Source adapters and the sequential harvest driver
//! - [`store`] - The JSON canonical store

pub mod classify;
pub mod config;
pub mod error;
pub mod geo;
pub mod harvest;
pub mod merge;
pub mod normalize;
pub mod reclassify;
pub mod security;
pub mod store;
pub mod types;
pub mod verify;

// Re-export core types at crate root
pub use error::{GazetteerError, HarvestError, HarvestResult, Result};
pub use types::{
    CanonicalDataset, Category, Coordinates, DatasetMetadata, LocationRecord, RawCandidate,
    Source,
};

pub use classify::{classify, LANDMARK_TAGS};
pub use config::{MunicipalityConfig, BASEY_BARANGAYS};
pub use geo::{haversine_m, BoundingBox};
pub use merge::{IngestOutcome, Merger};
pub use normalize::{display_key, merge_key};
pub use reclassify::{reclassify, MoveRule, SITIO_CLEANUP_RULES};
pub use security::SecretString;
pub use store::JsonStore;

// Re-export the harvesting surface
pub use harvest::{
    run_harvest, BoundaryFileHarvester, CuratedLandmarks, GooglePlacesHarvester, Harvester,
    HarvesterExt, HarvestSummary, MockHarvester, NominatimHarvester, RateLimitedHarvester,
};

// Re-export the verification surface
pub use verify::{
    find_merge_collisions, find_name_duplicates, find_out_of_bounds, find_too_close,
    group_unverified, missing_divisions, CategoryStats, DuplicateGroup, ProximityPair,
    UnverifiedGroup, VerificationReport, DISPLAY_CAP, PROXIMITY_THRESHOLD_M,
};
