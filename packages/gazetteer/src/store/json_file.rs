//! JSON-file backend for the canonical store.
//!
//! One pretty-printed document per municipality. A missing file is an
//! empty dataset on best-effort reads; a file that exists and fails to
//! parse is always fatal.

use chrono::Local;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::MunicipalityConfig;
use crate::error::{GazetteerError, Result};
use crate::types::dataset::CanonicalDataset;

/// The canonical store as a JSON document on disk.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the store, failing if it is missing or malformed.
    pub fn load(&self) -> Result<CanonicalDataset> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                GazetteerError::StoreNotFound {
                    path: self.path.clone(),
                }
            } else {
                GazetteerError::StoreIo {
                    path: self.path.clone(),
                    source: e,
                }
            }
        })?;

        serde_json::from_str(&text).map_err(|e| GazetteerError::StoreMalformed {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Load the store, treating a missing file as an empty dataset seeded
    /// with the municipality profile. A malformed file is still fatal.
    pub fn load_or_default(&self, config: &MunicipalityConfig) -> Result<CanonicalDataset> {
        match self.load() {
            Err(GazetteerError::StoreNotFound { .. }) => {
                info!(path = %self.path.display(), "no canonical store yet, starting empty");
                Ok(CanonicalDataset::empty(config))
            }
            other => other,
        }
    }

    /// Persist the dataset, bringing it into export shape first: buckets
    /// sorted and pruned, coordinates rounded, metadata refreshed.
    pub fn save(&self, dataset: &mut CanonicalDataset) -> Result<()> {
        dataset.prepare_for_export(Local::now().format("%Y-%m-%d %H:%M:%S").to_string());

        let json = serde_json::to_string_pretty(dataset)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| GazetteerError::StoreIo {
                    path: self.path.clone(),
                    source: e,
                })?;
            }
        }
        fs::write(&self.path, json).map_err(|e| GazetteerError::StoreIo {
            path: self.path.clone(),
            source: e,
        })?;

        info!(
            path = %self.path.display(),
            total = dataset.metadata.total_locations,
            "canonical store saved"
        );
        Ok(())
    }
}
