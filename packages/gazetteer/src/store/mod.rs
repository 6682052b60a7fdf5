//! Persistence of the canonical dataset.

pub mod json_file;

pub use json_file::JsonStore;
