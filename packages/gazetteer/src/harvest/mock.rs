//! Mock harvester for testing.
//!
//! Provides a configurable mock implementation of the Harvester trait:
//! canned candidates per query, injectable per-query failures, and call
//! recording.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{HarvestError, HarvestResult};
use crate::harvest::Harvester;
use crate::types::record::{RawCandidate, Source};

/// Mock harvester for testing.
pub struct MockHarvester {
    source: Source,
    queries: Vec<String>,
    candidates: HashMap<String, Vec<RawCandidate>>,
    failures: HashSet<String>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockHarvester {
    /// Create an empty mock emitting the given source tag.
    pub fn new(source: Source) -> Self {
        Self {
            source,
            queries: Vec::new(),
            candidates: HashMap::new(),
            failures: HashSet::new(),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Add a query with its canned candidates (builder pattern).
    pub fn with_query(mut self, query: &str, candidates: Vec<RawCandidate>) -> Self {
        self.queries.push(query.to_string());
        self.candidates.insert(query.to_string(), candidates);
        self
    }

    /// Add a query that will fail with a service error.
    pub fn with_failing_query(mut self, query: &str) -> Self {
        self.queries.push(query.to_string());
        self.failures.insert(query.to_string());
        self
    }

    /// The queries that were actually executed, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Harvester for MockHarvester {
    fn source(&self) -> Source {
        self.source
    }

    fn queries(&self) -> Vec<String> {
        self.queries.clone()
    }

    async fn run_query(&self, query: &str) -> HarvestResult<Vec<RawCandidate>> {
        self.calls.write().unwrap().push(query.to_string());

        if self.failures.contains(query) {
            return Err(HarvestError::ServiceStatus {
                service: "mock",
                status: "UNAVAILABLE".to_string(),
            });
        }

        Ok(self.candidates.get(query).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_canned_candidates() {
        let mock = MockHarvester::new(Source::Google).with_query(
            "church",
            vec![RawCandidate::new("Basey Church", Source::Google)
                .with_coordinates(11.2792, 125.0650)],
        );

        let hits = mock.run_query("church").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Basey Church");
        assert_eq!(mock.calls(), vec!["church".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_failure_injection() {
        let mock = MockHarvester::new(Source::Osm).with_failing_query("school");
        assert!(mock.run_query("school").await.is_err());
    }
}
