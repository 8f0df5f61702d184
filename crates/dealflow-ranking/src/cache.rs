//! Per-listing result cache in front of [`recommend_buyers`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dealflow_core::{AppConfig, RecommendationSource, TierThresholds};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::RankingError;
use crate::pipeline::recommend_buyers;
use crate::retry::retry_with_backoff;
use crate::types::RecommendedBuyersResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Entries older than this are recomputed on the next read.
    pub stale_after: Duration,
    /// Extra attempts after a failed computation.
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(4 * 60 * 60),
            max_retries: 1,
            retry_backoff_ms: 500,
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            stale_after: Duration::from_secs(config.recommendation_stale_secs),
            max_retries: config.recommendation_max_retries,
            retry_backoff_ms: config.recommendation_retry_backoff_ms,
        }
    }
}

type CacheKey = (Uuid, usize);

/// Caches ranked results keyed on `(listing_id, limit)`.
///
/// Failed computations are retried per [`CacheConfig`] and never stored.
pub struct RecommendationCache {
    source: Arc<dyn RecommendationSource>,
    thresholds: TierThresholds,
    config: CacheConfig,
    entries: RwLock<HashMap<CacheKey, Arc<RecommendedBuyersResult>>>,
}

impl RecommendationCache {
    #[must_use]
    pub fn new(
        source: Arc<dyn RecommendationSource>,
        thresholds: TierThresholds,
        config: CacheConfig,
    ) -> Self {
        Self {
            source,
            thresholds,
            config,
            entries: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn thresholds(&self) -> &TierThresholds {
        &self.thresholds
    }

    /// Cached ranking for the listing, recomputed when missing or stale.
    ///
    /// # Errors
    ///
    /// Returns the last [`RankingError`] once every attempt has failed.
    pub async fn get(
        &self,
        listing_id: Uuid,
        limit: usize,
    ) -> Result<Arc<RecommendedBuyersResult>, RankingError> {
        let key = (listing_id, limit);
        let now = Utc::now();

        let cached = self.entries.read().await.get(&key).cloned();
        if let Some(hit) = cached.filter(|hit| !self.is_stale(hit.cached_at, now)) {
            tracing::debug!(%listing_id, limit, "recommendation cache hit");
            return Ok(hit);
        }
        tracing::debug!(%listing_id, limit, "recommendation cache miss");

        let source = Arc::clone(&self.source);
        let thresholds = &self.thresholds;
        let result = retry_with_backoff(self.config.max_retries, self.config.retry_backoff_ms, || {
            recommend_buyers(source.as_ref(), Some(listing_id), limit, thresholds, Utc::now())
        })
        .await?;

        let result = Arc::new(result);
        self.entries.write().await.insert(key, Arc::clone(&result));
        Ok(result)
    }

    /// Drop every cached limit for one listing.
    pub async fn invalidate(&self, listing_id: Uuid) {
        self.entries
            .write()
            .await
            .retain(|(cached_listing, _), _| *cached_listing != listing_id);
    }

    /// Remove stale entries, returning how many were dropped.
    pub async fn prune_stale(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, result| !self.is_stale(result.cached_at, now));
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn is_stale(&self, cached_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let Ok(age) = (now - cached_at).to_std() else {
            // cached_at in the future: clock moved backwards
            return false;
        };
        age >= self.config.stale_after
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
