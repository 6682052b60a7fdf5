//! Harvesting adapters: pluggable producers of raw location candidates.
//!
//! Each adapter exposes its query plan and answers one query at a time;
//! the shared [`run_harvest`] driver owns the loop, so skip-and-continue
//! error handling, cancellation, and ingest accounting behave identically
//! for every source.

pub mod curated;
pub mod geojson;
pub mod google;
pub mod mock;
pub mod nominatim;
pub mod rate_limited;

pub use curated::CuratedLandmarks;
pub use geojson::BoundaryFileHarvester;
pub use google::GooglePlacesHarvester;
pub use mock::MockHarvester;
pub use nominatim::NominatimHarvester;
pub use rate_limited::{HarvesterExt, RateLimitedHarvester};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::HarvestResult;
use crate::merge::{IngestOutcome, Merger};
use crate::types::dataset::CanonicalDataset;
use crate::types::record::{RawCandidate, Source};

/// A source of raw location candidates.
///
/// Implementations fetch and parse; they never touch the dataset. Queries
/// are the unit of failure and of rate limiting: one failing query is
/// logged and skipped, the rest of the plan still runs.
#[async_trait]
pub trait Harvester: Send + Sync {
    /// Which source tag this adapter emits.
    fn source(&self) -> Source;

    /// The full query plan, in execution order.
    fn queries(&self) -> Vec<String>;

    /// Execute a single query and return its candidates.
    async fn run_query(&self, query: &str) -> HarvestResult<Vec<RawCandidate>>;
}

/// Outcome counters for one source's harvesting run.
#[derive(Debug, Clone)]
pub struct HarvestSummary {
    pub source: Source,
    pub queries_run: usize,
    pub queries_failed: usize,
    pub candidates_seen: usize,
    pub added: usize,
    pub skipped_known: usize,
    pub out_of_bounds: usize,
    pub dropped_invalid: usize,
    /// True when the run stopped early on a cancellation
    pub interrupted: bool,
}

impl HarvestSummary {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            queries_run: 0,
            queries_failed: 0,
            candidates_seen: 0,
            added: 0,
            skipped_known: 0,
            out_of_bounds: 0,
            dropped_invalid: 0,
            interrupted: false,
        }
    }

    fn record(&mut self, outcome: IngestOutcome) {
        match outcome {
            IngestOutcome::Added(_) => self.added += 1,
            IngestOutcome::SkippedKnown => self.skipped_known += 1,
            IngestOutcome::OutOfBounds => self.out_of_bounds += 1,
            IngestOutcome::MissingFields => self.dropped_invalid += 1,
        }
    }
}

/// Drive one harvester's full query plan into the dataset.
///
/// Runs one query at a time, ingesting candidates in the order the source
/// reports them. A per-query failure is logged and the loop continues;
/// candidates accumulated before a failure or interrupt are kept.
pub async fn run_harvest(
    harvester: &dyn Harvester,
    merger: &mut Merger,
    dataset: &mut CanonicalDataset,
    cancel: &CancellationToken,
) -> HarvestSummary {
    let source = harvester.source();
    let mut summary = HarvestSummary::new(source);
    let queries = harvester.queries();

    info!(source = %source, queries = queries.len(), "harvest starting");

    for query in &queries {
        if cancel.is_cancelled() {
            warn!(source = %source, "harvest interrupted, keeping partial results");
            summary.interrupted = true;
            break;
        }

        match harvester.run_query(query).await {
            Ok(candidates) => {
                summary.queries_run += 1;
                debug!(source = %source, query = %query, hits = candidates.len(), "query done");
                for candidate in candidates {
                    summary.candidates_seen += 1;
                    let name = candidate.name.clone();
                    let outcome = merger.ingest(dataset, candidate);
                    if let IngestOutcome::Added(category) = outcome {
                        info!(source = %source, name = %name, category = %category, "added");
                    }
                    summary.record(outcome);
                }
            }
            Err(e) => {
                summary.queries_failed += 1;
                warn!(source = %source, query = %query, error = %e, "query failed, continuing");
            }
        }
    }

    info!(
        source = %source,
        added = summary.added,
        skipped = summary.skipped_known,
        failed_queries = summary.queries_failed,
        "harvest finished"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MunicipalityConfig;

    fn candidate(name: &str, lat: f64, lng: f64, source: Source) -> RawCandidate {
        RawCandidate::new(name, source).with_coordinates(lat, lng)
    }

    #[tokio::test]
    async fn test_failing_query_does_not_abort_the_run() {
        let config = MunicipalityConfig::basey();
        let mut dataset = CanonicalDataset::empty(&config);
        let mut merger = Merger::new(config.bounds);
        let cancel = CancellationToken::new();

        let harvester = MockHarvester::new(Source::Google)
            .with_query(
                "church Basey Samar",
                vec![candidate("Basey Church", 11.2792, 125.0650, Source::Google)],
            )
            .with_failing_query("school Basey Samar")
            .with_query(
                "plaza Basey Samar",
                vec![candidate("Basey Plaza", 11.2790, 125.0645, Source::Google)],
            );

        let summary = run_harvest(&harvester, &mut merger, &mut dataset, &cancel).await;

        assert_eq!(summary.queries_run, 2);
        assert_eq!(summary.queries_failed, 1);
        assert_eq!(summary.added, 2);
        assert_eq!(dataset.total(), 2);
        assert!(!summary.interrupted);
    }

    #[tokio::test]
    async fn test_cancellation_keeps_partial_results() {
        let config = MunicipalityConfig::basey();
        let mut dataset = CanonicalDataset::empty(&config);
        let mut merger = Merger::new(config.bounds);

        let cancel = CancellationToken::new();
        cancel.cancel();

        let harvester = MockHarvester::new(Source::Osm).with_query(
            "church Basey, Samar",
            vec![candidate("Basey Church", 11.2792, 125.0650, Source::Osm)],
        );

        let summary = run_harvest(&harvester, &mut merger, &mut dataset, &cancel).await;

        assert!(summary.interrupted);
        assert_eq!(summary.queries_run, 0);
        assert_eq!(dataset.total(), 0);
    }

    #[tokio::test]
    async fn test_summary_accounts_for_every_candidate() {
        let config = MunicipalityConfig::basey();
        let mut dataset = CanonicalDataset::empty(&config);
        let mut merger = Merger::new(config.bounds);
        let cancel = CancellationToken::new();

        let harvester = MockHarvester::new(Source::Google).with_query(
            "everything Basey Samar",
            vec![
                candidate("Basey Church", 11.2792, 125.0650, Source::Google),
                candidate("basey church", 11.2792, 125.0650, Source::Google),
                candidate("Calbayog Airport", 12.0726, 124.5450, Source::Google),
                RawCandidate::new("No Coordinates", Source::Google),
            ],
        );

        let summary = run_harvest(&harvester, &mut merger, &mut dataset, &cancel).await;

        assert_eq!(summary.candidates_seen, 4);
        assert_eq!(summary.added, 1);
        assert_eq!(summary.skipped_known, 1);
        assert_eq!(summary.out_of_bounds, 1);
        assert_eq!(summary.dropped_invalid, 1);
    }
}
