//! Data-access seam between the recommendation aggregator and the stores it
//! reads from.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::buyers::{
    BuyerId, BuyerProfile, ConnectionRequest, EngagementSignal, EngagementSource, OutreachRow,
    ScoredCandidate, TranscriptRow,
};

/// An upstream store failed. The original error is kept as the source.
#[derive(Debug, Error)]
#[error("{store} fetch failed: {source}")]
pub struct SourceError {
    pub store: &'static str,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl SourceError {
    pub fn new(
        store: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            store,
            source: source.into(),
        }
    }
}

/// Rows needed to decorate the candidate universe for one listing.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentData {
    /// Non-archived buyer profiles within the requested ids.
    pub buyers: Vec<BuyerProfile>,
    /// Every connection request on the listing.
    pub connection_requests: Vec<ConnectionRequest>,
    pub transcripts: Vec<TranscriptRow>,
    pub outreach: Vec<OutreachRow>,
}

#[async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Up to `limit` non-disqualified candidates, best composite score first,
    /// followed by every disqualified row for the listing. The disqualified
    /// rows are outside the limit so callers can keep those buyers out of
    /// the engagement-only path.
    async fn fetch_scored_candidates(
        &self,
        listing_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ScoredCandidate>, SourceError>;

    /// Buyers engaged with the listing through `source`.
    ///
    /// `exclude` lists ids the caller already has; implementations may skip
    /// them but are not required to.
    async fn fetch_engagement_signals(
        &self,
        listing_id: Uuid,
        source: EngagementSource,
        exclude: &[BuyerId],
    ) -> Result<Vec<EngagementSignal>, SourceError>;

    async fn fetch_enrichment_data(
        &self,
        listing_id: Uuid,
        buyer_ids: &[BuyerId],
    ) -> Result<EnrichmentData, SourceError>;
}
