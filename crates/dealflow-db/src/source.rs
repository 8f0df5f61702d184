//! Postgres-backed [`RecommendationSource`].

use async_trait::async_trait;
use dealflow_core::{
    BuyerId, EngagementSignal, EngagementSource, EnrichmentData, RecommendationSource,
    ScoredCandidate, SourceError,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    list_active_buyers_by_ids, list_connection_requests, list_engaged_buyer_ids,
    list_outreach_records, list_scored_candidates, list_transcripts_for_buyers,
};

#[derive(Debug, Clone)]
pub struct PgRecommendationSource {
    pool: PgPool,
}

impl PgRecommendationSource {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn collect<R, T: From<R>>(rows: Vec<R>) -> Vec<T> {
    rows.into_iter().map(T::from).collect()
}

#[async_trait]
impl RecommendationSource for PgRecommendationSource {
    async fn fetch_scored_candidates(
        &self,
        listing_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ScoredCandidate>, SourceError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = list_scored_candidates(&self.pool, listing_id, limit)
            .await
            .map_err(|e| SourceError::new("remarketing_scores", e))?;
        Ok(collect(rows))
    }

    async fn fetch_engagement_signals(
        &self,
        listing_id: Uuid,
        source: EngagementSource,
        exclude: &[BuyerId],
    ) -> Result<Vec<EngagementSignal>, SourceError> {
        let store = match source {
            EngagementSource::Marketplace => "connection_requests",
            EngagementSource::Pipeline => "deal_pipeline",
            EngagementSource::Contact => "buyer_contacts",
        };
        let ids = list_engaged_buyer_ids(&self.pool, listing_id, source, exclude)
            .await
            .map_err(|e| SourceError::new(store, e))?;

        Ok(ids
            .into_iter()
            .map(|buyer_id| EngagementSignal { buyer_id, source })
            .collect())
    }

    async fn fetch_enrichment_data(
        &self,
        listing_id: Uuid,
        buyer_ids: &[BuyerId],
    ) -> Result<EnrichmentData, SourceError> {
        let (buyers, connection_requests, transcripts, outreach) = tokio::try_join!(
            async {
                list_active_buyers_by_ids(&self.pool, buyer_ids)
                    .await
                    .map_err(|e| SourceError::new("buyers", e))
            },
            async {
                list_connection_requests(&self.pool, listing_id)
                    .await
                    .map_err(|e| SourceError::new("connection_requests", e))
            },
            async {
                list_transcripts_for_buyers(&self.pool, buyer_ids)
                    .await
                    .map_err(|e| SourceError::new("buyer_transcripts", e))
            },
            async {
                list_outreach_records(&self.pool, listing_id, buyer_ids)
                    .await
                    .map_err(|e| SourceError::new("outreach_records", e))
            },
        )?;

        tracing::debug!(
            %listing_id,
            buyers = buyers.len(),
            connection_requests = connection_requests.len(),
            transcripts = transcripts.len(),
            outreach = outreach.len(),
            "loaded enrichment rows"
        );

        Ok(EnrichmentData {
            buyers: collect(buyers),
            connection_requests: collect(connection_requests),
            transcripts: collect(transcripts),
            outreach: collect(outreach),
        })
    }
}
