//! Rate-limited harvester wrapper.
//!
//! Wraps any Harvester implementation with rate limiting using the
//! governor crate. The limit applies between queries, which is where the
//! external services' acceptable-use policies bite.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use crate::error::HarvestResult;
use crate::harvest::Harvester;
use crate::types::record::{RawCandidate, Source};

type DefaultRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A harvester wrapper that enforces a per-query rate limit.
pub struct RateLimitedHarvester<H: Harvester> {
    inner: H,
    limiter: Arc<DefaultRateLimiter>,
}

impl<H: Harvester> RateLimitedHarvester<H> {
    /// Limit to a number of queries per second.
    pub fn new(harvester: H, queries_per_second: u32) -> Self {
        let quota = Quota::per_second(
            NonZeroU32::new(queries_per_second).expect("queries_per_second must be > 0"),
        );
        Self {
            inner: harvester,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Enforce a minimum interval between queries. Needed for services
    /// whose policy is slower than one query per second.
    pub fn with_min_interval(harvester: H, interval: Duration) -> Self {
        let quota = Quota::with_period(interval).expect("interval must be non-zero");
        Self {
            inner: harvester,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }
}

#[async_trait]
impl<H: Harvester> Harvester for RateLimitedHarvester<H> {
    fn source(&self) -> Source {
        self.inner.source()
    }

    fn queries(&self) -> Vec<String> {
        self.inner.queries()
    }

    async fn run_query(&self, query: &str) -> HarvestResult<Vec<RawCandidate>> {
        self.limiter.until_ready().await;
        self.inner.run_query(query).await
    }
}

/// Extension trait for easy rate limiting.
pub trait HarvesterExt: Harvester + Sized {
    /// Wrap this harvester with a queries-per-second limit.
    fn rate_limited(self, queries_per_second: u32) -> RateLimitedHarvester<Self> {
        RateLimitedHarvester::new(self, queries_per_second)
    }

    /// Wrap this harvester with a minimum interval between queries.
    fn min_interval(self, interval: Duration) -> RateLimitedHarvester<Self> {
        RateLimitedHarvester::with_min_interval(self, interval)
    }
}

impl<H: Harvester + Sized> HarvesterExt for H {}
