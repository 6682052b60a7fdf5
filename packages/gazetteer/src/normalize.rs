//! Name normalization.
//!
//! Two strengths exist on purpose. `merge_key` is the identity used to
//! decide "is this the same place" at ingestion time; `display_key` is the
//! weaker form the duplicate report groups by, so punctuation-variant names
//! that entered the store by paths bypassing ingestion still show up in
//! both views of the audit.

/// Merge identity for a location name: lowercased, trimmed, with interior
/// spaces and hyphens stripped.
///
/// Idempotent: `merge_key(merge_key(x)) == merge_key(x)`.
pub fn merge_key(name: &str) -> String {
    let lowered = name.to_lowercase();
    lowered
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect()
}

/// Weak comparison key: lowercased and trimmed only.
///
/// Used by the exact-name duplicate pass, which groups by what a reader
/// would see as "the same spelling" rather than by merge identity.
pub fn display_key(name: &str) -> String {
    name.trim().to_lowercase()
}
