//! Typed errors for the gazetteer library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or maintaining the gazetteer.
#[derive(Debug, Error)]
pub enum GazetteerError {
    /// Harvesting a source failed
    #[error("harvest failed: {0}")]
    Harvest(#[from] HarvestError),

    /// Canonical store was expected to exist but does not
    #[error("canonical store not found: {}", .path.display())]
    StoreNotFound { path: PathBuf },

    /// Canonical store exists but is not a valid gazetteer document
    #[error("malformed canonical store {}: {source}", .path.display())]
    StoreMalformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Reading or writing the canonical store failed
    #[error("store I/O error on {}: {source}", .path.display())]
    StoreIo {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The dataset could not be serialized for export
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Operation was cancelled
    #[error("operation cancelled")]
    Cancelled,
}

/// Errors that can occur while querying a single harvesting source.
///
/// These are non-fatal at the run level: the harvest driver logs the
/// failing query and moves on to the next one.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Service answered with a non-success status
    #[error("{service} returned status {status}")]
    ServiceStatus { service: &'static str, status: String },

    /// Response did not match the expected shape
    #[error("malformed response from {service}: {reason}")]
    MalformedResponse {
        service: &'static str,
        reason: String,
    },

    /// Boundary file missing or unreadable
    #[error("boundary file error: {0}")]
    BoundaryFile(#[source] std::io::Error),

    /// Boundary file is not valid GeoJSON
    #[error("boundary file parse error: {0}")]
    BoundaryParse(#[from] serde_json::Error),

    /// No API key configured for a keyed service
    #[error("missing API key for {service}")]
    MissingApiKey { service: &'static str },
}

/// Result type alias for gazetteer operations.
pub type Result<T> = std::result::Result<T, GazetteerError>;

/// Result type alias for harvesting operations.
pub type HarvestResult<T> = std::result::Result<T, HarvestError>;
