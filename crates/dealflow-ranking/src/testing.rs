//! In-memory [`RecommendationSource`] and row builders for ranking tests.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dealflow_core::{
    BuyerId, BuyerProfile, ConnectionRequest, EngagementSignal, EngagementSource, EnrichmentData,
    OutreachRow, RecommendationSource, ScoredCandidate, SourceError, TranscriptRow,
};
use uuid::Uuid;

#[derive(Default)]
pub(crate) struct FixtureSource {
    pub scored: Vec<ScoredCandidate>,
    pub engagement: HashMap<EngagementSource, Vec<BuyerId>>,
    pub enrichment: EnrichmentData,
    /// Return excluded ids anyway, like a store that ignores the hint.
    pub ignore_exclusion: bool,
    /// Scored-candidate fetches that fail before one succeeds.
    pub failures_remaining: AtomicU32,
    /// Makes the contact engagement fetch fail every time.
    pub fail_contact_fetch: bool,
    /// Enrichment fetches fail with this store name.
    pub fail_enrichment: Option<&'static str>,
    pub scored_calls: AtomicUsize,
    pub enrichment_calls: AtomicUsize,
    pub requested_limits: Mutex<Vec<usize>>,
}

impl FixtureSource {
    pub fn with_scored(scored: Vec<ScoredCandidate>) -> Self {
        Self {
            scored,
            ..Self::default()
        }
    }

    pub fn engaged(mut self, source: EngagementSource, ids: &[BuyerId]) -> Self {
        self.engagement.entry(source).or_default().extend(ids);
        self
    }

    pub fn profiles(mut self, profiles: Vec<BuyerProfile>) -> Self {
        self.enrichment.buyers.extend(profiles);
        self
    }

    pub fn failing_first(self, attempts: u32) -> Self {
        self.failures_remaining.store(attempts, Ordering::SeqCst);
        self
    }

    pub fn failing_enrichment(mut self, store: &'static str) -> Self {
        self.fail_enrichment = Some(store);
        self
    }
}

fn boom(store: &'static str) -> SourceError {
    SourceError::new(store, io::Error::other("connection refused"))
}

#[async_trait]
impl RecommendationSource for FixtureSource {
    async fn fetch_scored_candidates(
        &self,
        _listing_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ScoredCandidate>, SourceError> {
        self.scored_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut limits) = self.requested_limits.lock() {
            limits.push(limit);
        }
        let failing = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(boom("remarketing_scores"));
        }
        let (disqualified, eligible): (Vec<_>, Vec<_>) =
            self.scored.iter().partition(|c| c.is_disqualified());
        Ok(eligible
            .into_iter()
            .take(limit)
            .chain(disqualified)
            .cloned()
            .collect())
    }

    async fn fetch_engagement_signals(
        &self,
        _listing_id: Uuid,
        source: EngagementSource,
        exclude: &[BuyerId],
    ) -> Result<Vec<EngagementSignal>, SourceError> {
        if self.fail_contact_fetch && source == EngagementSource::Contact {
            return Err(boom("buyer_contacts"));
        }
        Ok(self
            .engagement
            .get(&source)
            .into_iter()
            .flatten()
            .filter(|id| self.ignore_exclusion || !exclude.contains(id))
            .map(|&buyer_id| EngagementSignal { buyer_id, source })
            .collect())
    }

    async fn fetch_enrichment_data(
        &self,
        _listing_id: Uuid,
        buyer_ids: &[BuyerId],
    ) -> Result<EnrichmentData, SourceError> {
        self.enrichment_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(store) = self.fail_enrichment {
            return Err(boom(store));
        }
        let wanted = |id: &BuyerId| buyer_ids.contains(id);
        Ok(EnrichmentData {
            buyers: self
                .enrichment
                .buyers
                .iter()
                .filter(|b| wanted(&b.id) && !b.archived)
                .cloned()
                .collect(),
            connection_requests: self.enrichment.connection_requests.clone(),
            transcripts: self
                .enrichment
                .transcripts
                .iter()
                .filter(|t| wanted(&t.buyer_id))
                .cloned()
                .collect(),
            outreach: self
                .enrichment
                .outreach
                .iter()
                .filter(|o| wanted(&o.buyer_id))
                .cloned()
                .collect(),
        })
    }
}

pub(crate) fn candidate(buyer_id: BuyerId, composite: f64) -> ScoredCandidate {
    ScoredCandidate {
        buyer_id,
        composite_score: Some(composite),
        is_disqualified: Some(false),
        ..ScoredCandidate::default()
    }
}

pub(crate) fn profile(id: BuyerId, name: &str) -> BuyerProfile {
    BuyerProfile {
        id,
        company_name: name.to_string(),
        ..BuyerProfile::default()
    }
}

pub(crate) fn connection(
    listing_id: Uuid,
    buyer_id: BuyerId,
    at: DateTime<Utc>,
) -> ConnectionRequest {
    ConnectionRequest {
        listing_id,
        user_id: None,
        buyer_id: Some(buyer_id),
        status: "approved".to_string(),
        created_at: at,
        updated_at: None,
    }
}

pub(crate) fn call(buyer_id: BuyerId, at: DateTime<Utc>, ceo_detected: bool) -> TranscriptRow {
    TranscriptRow {
        buyer_id,
        call_date: Some(at),
        extracted_insights: Some(serde_json::json!({ "ceo_detected": ceo_detected })),
    }
}

pub(crate) fn outreach(buyer_id: BuyerId, contacted_at: DateTime<Utc>) -> OutreachRow {
    OutreachRow {
        buyer_id,
        contacted_at: Some(contacted_at),
        nda_signed_at: None,
        cim_sent_at: None,
        meeting_scheduled_at: None,
        outcome: None,
        created_at: contacted_at,
    }
}
