//! Optional short-lived cache in front of a train source.
//!
//! By default every API request re-fetches the day's trains. Operators who
//! would rather not hit Digitraffic once per dashboard poll can wrap the
//! source in [`CachedTrainSource`], which keeps each date's trains for a
//! short TTL. Errors are never cached.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use futures::future::BoxFuture;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::digitraffic::{FetchError, LineTrains, TrainSource};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a fetched day stays fresh.
    pub ttl: Duration,

    /// Maximum number of cached dates.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Create a config with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            ..Self::default()
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            // Today, plus yesterday around midnight
            max_capacity: 4,
        }
    }
}

/// Train source with a per-date TTL cache.
pub struct CachedTrainSource {
    inner: Arc<dyn TrainSource>,
    trains: MokaCache<NaiveDate, LineTrains>,
}

impl CachedTrainSource {
    /// Wrap `inner` with a cache configured by `config`.
    pub fn new(inner: Arc<dyn TrainSource>, config: &CacheConfig) -> Self {
        let trains = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, trains }
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.trains.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.trains.invalidate_all();
    }
}

impl TrainSource for CachedTrainSource {
    fn line_trains(&self, date: NaiveDate) -> BoxFuture<'_, Result<LineTrains, FetchError>> {
        Box::pin(async move {
            if let Some(cached) = self.trains.get(&date).await {
                debug!(%date, "train cache hit");
                return Ok(cached);
            }

            let fresh = self.inner.line_trains(date).await?;
            self.trains.insert(date, fresh.clone()).await;

            Ok(fresh)
        })
    }
}
