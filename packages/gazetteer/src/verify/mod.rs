//! Post-merge auditing: duplicates, bounds, completeness, and the
//! verification report.

pub mod bounds;
pub mod completeness;
pub mod duplicates;
pub mod report;

pub use bounds::find_out_of_bounds;
pub use completeness::missing_divisions;
pub use duplicates::{
    find_merge_collisions, find_name_duplicates, find_too_close, DuplicateGroup, ProximityPair,
    PROXIMITY_THRESHOLD_M,
};
pub use report::{
    group_unverified, CategoryStats, UnverifiedGroup, VerificationReport, DISPLAY_CAP,
    UNVERIFIED_GROUPS,
};
