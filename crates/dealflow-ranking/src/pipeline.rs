//! The recommendation pipeline:
//! `load_scored → load_engagement → load_enrichment → build_ranked → sort → summarize`.
//!
//! Every stage except the three loaders is pure. Loader failures abort the
//! whole computation; there are no partial results.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use dealflow_core::{
    BuyerId, EngagementSignal, EngagementSource, RecommendationSource, ScoredCandidate,
    TierThresholds,
};
use uuid::Uuid;

use crate::error::RankingError;
use crate::lookups::Lookups;
use crate::recency::{
    days_since, engagement_only_last_engagement, is_cold, scored_last_engagement, LastEngagement,
};
use crate::scoring::{
    engagement_fit_signals, engagement_reasoning, engagement_score, scored_fit_signals,
};
use crate::tier::{appetite_ordinal, classify_tier};
use crate::types::{BuyerSource, DataStats, RankedBuyer, RecommendedBuyersResult, TierSummary};

/// Buyers returned when the caller does not ask for a specific count.
pub const DEFAULT_LIMIT: usize = 25;

/// A buyer surfaced only through engagement, tagged with the highest
/// precedence source that reported it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EngagedBuyer {
    pub buyer_id: BuyerId,
    pub source: EngagementSource,
}

/// Rank recommended buyers for `listing_id`.
///
/// `None` for the listing yields an empty, well-formed result without
/// touching `source`. So does `limit == 0`.
///
/// # Errors
///
/// Returns [`RankingError::Source`] for the first upstream fetch that fails.
pub async fn recommend_buyers<S>(
    source: &S,
    listing_id: Option<Uuid>,
    limit: usize,
    thresholds: &TierThresholds,
    now: DateTime<Utc>,
) -> Result<RecommendedBuyersResult, RankingError>
where
    S: RecommendationSource + ?Sized,
{
    let Some(listing_id) = listing_id else {
        return Ok(RecommendedBuyersResult::empty(now));
    };
    if limit == 0 {
        return Ok(RecommendedBuyersResult::empty(now));
    }

    let (scored, disqualified) = load_scored(source, listing_id, limit).await?;
    let scored_ids: Vec<BuyerId> = scored.iter().map(|c| c.buyer_id).collect();
    let excluded: Vec<BuyerId> = scored_ids.iter().chain(&disqualified).copied().collect();

    let signal_sets = load_engagement(source, listing_id, &excluded).await?;
    let engaged = merge_engagement(&excluded, signal_sets);

    let universe = candidate_universe(&scored_ids, &engaged);
    tracing::debug!(
        %listing_id,
        scored = scored.len(),
        disqualified = disqualified.len(),
        engaged = engaged.len(),
        "assembled candidate universe"
    );
    if universe.is_empty() {
        return Ok(RecommendedBuyersResult::empty(now));
    }

    let lookups = load_enrichment(source, listing_id, &universe).await?;

    let mut buyers = build_ranked(&scored, &engaged, &lookups, thresholds, now);
    sort_ranked(&mut buyers);
    buyers.truncate(limit);

    let result = summarize(buyers, now);
    tracing::info!(
        %listing_id,
        total = result.total,
        total_scored = result.total_scored,
        move_now = result.tier_summary.move_now,
        "ranked recommended buyers"
    );
    Ok(result)
}

/// Top `2 × limit` eligible candidates with duplicate ids removed, plus
/// every id the scoring store disqualified for the listing.
///
/// A buyer with any disqualified row is dropped entirely, so an eligible
/// duplicate cannot bring it back.
async fn load_scored<S>(
    source: &S,
    listing_id: Uuid,
    limit: usize,
) -> Result<(Vec<ScoredCandidate>, Vec<BuyerId>), RankingError>
where
    S: RecommendationSource + ?Sized,
{
    let rows = source
        .fetch_scored_candidates(listing_id, limit.saturating_mul(2))
        .await?;

    let mut disqualified: Vec<BuyerId> = Vec::new();
    for candidate in rows.iter().filter(|c| c.is_disqualified()) {
        if !disqualified.contains(&candidate.buyer_id) {
            disqualified.push(candidate.buyer_id);
        }
    }

    let mut seen: HashSet<BuyerId> = disqualified.iter().copied().collect();
    let eligible = rows
        .into_iter()
        .filter(|candidate| seen.insert(candidate.buyer_id))
        .collect();
    Ok((eligible, disqualified))
}

/// Signal sets in [`EngagementSource::PRECEDENCE`] order.
async fn load_engagement<S>(
    source: &S,
    listing_id: Uuid,
    exclude: &[BuyerId],
) -> Result<[Vec<EngagementSignal>; 3], RankingError>
where
    S: RecommendationSource + ?Sized,
{
    let [first, second, third] = EngagementSource::PRECEDENCE;
    let (a, b, c) = futures::try_join!(
        source.fetch_engagement_signals(listing_id, first, exclude),
        source.fetch_engagement_signals(listing_id, second, exclude),
        source.fetch_engagement_signals(listing_id, third, exclude),
    )?;
    Ok([a, b, c])
}

/// Fold the signal sets into one list. An id keeps the first source that
/// reported it; excluded ids (scored or disqualified) are dropped even if a
/// store ignored the exclusion.
pub(crate) fn merge_engagement(
    excluded: &[BuyerId],
    signal_sets: [Vec<EngagementSignal>; 3],
) -> Vec<EngagedBuyer> {
    let excluded: HashSet<&BuyerId> = excluded.iter().collect();
    let mut seen: HashSet<BuyerId> = HashSet::new();
    let mut engaged = Vec::new();

    for (source, signals) in EngagementSource::PRECEDENCE.into_iter().zip(signal_sets) {
        for signal in signals {
            if excluded.contains(&signal.buyer_id) || !seen.insert(signal.buyer_id) {
                continue;
            }
            engaged.push(EngagedBuyer {
                buyer_id: signal.buyer_id,
                source,
            });
        }
    }

    engaged
}

fn candidate_universe(scored_ids: &[BuyerId], engaged: &[EngagedBuyer]) -> Vec<BuyerId> {
    scored_ids
        .iter()
        .copied()
        .chain(engaged.iter().map(|e| e.buyer_id))
        .collect()
}

async fn load_enrichment<S>(
    source: &S,
    listing_id: Uuid,
    universe: &[BuyerId],
) -> Result<Lookups, RankingError>
where
    S: RecommendationSource + ?Sized,
{
    let data = source.fetch_enrichment_data(listing_id, universe).await?;
    Ok(Lookups::build(data))
}

fn build_ranked(
    scored: &[ScoredCandidate],
    engaged: &[EngagedBuyer],
    lookups: &Lookups,
    thresholds: &TierThresholds,
    now: DateTime<Utc>,
) -> Vec<RankedBuyer> {
    let scored_path = scored
        .iter()
        .filter_map(|candidate| rank_scored(candidate, lookups, thresholds, now));
    let engagement_path = engaged
        .iter()
        .filter_map(|buyer| rank_engaged(*buyer, lookups, thresholds, now));

    scored_path.chain(engagement_path).collect()
}

fn rank_scored(
    candidate: &ScoredCandidate,
    lookups: &Lookups,
    thresholds: &TierThresholds,
    now: DateTime<Utc>,
) -> Option<RankedBuyer> {
    let profile = lookups.profiles.get(&candidate.buyer_id)?;
    let transcript = lookups.transcript(&candidate.buyer_id);
    let outreach = lookups.outreach.get(&candidate.buyer_id).cloned();

    let score = candidate.effective_score();
    let tier = classify_tier(
        score,
        profile.has_fee_agreement,
        profile.acquisition_appetite.as_deref(),
        thresholds,
    );
    let fit_signals = scored_fit_signals(candidate, profile, &transcript, outreach.as_ref());
    let last = scored_last_engagement(lookups.last_contact.get(&candidate.buyer_id), &transcript);
    let days = days_since(last.at, now);

    Some(RankedBuyer {
        buyer_id: profile.id,
        company_name: profile.company_name.clone(),
        pe_firm_name: profile.pe_firm_name.clone(),
        company_website: profile.company_website.clone(),
        hq_city: profile.hq_city.clone(),
        hq_state: profile.hq_state.clone(),
        acquisition_appetite: profile.acquisition_appetite.clone(),
        has_fee_agreement: profile.has_fee_agreement,
        thesis_summary: profile.thesis_summary.clone(),
        composite_fit_score: score,
        geography_score: candidate.geography_score,
        size_score: candidate.size_score,
        service_score: candidate.service_score,
        owner_goals_score: candidate.owner_goals_score,
        source: BuyerSource::Scored,
        tier,
        tier_label: tier.label().to_string(),
        fit_signals,
        fit_reasoning: candidate.fit_reasoning.clone(),
        transcript_insights: transcript,
        outreach_info: outreach,
        last_engagement: last.at,
        last_engagement_type: kind_label(&last),
        days_since_engagement: days,
        engagement_cold: is_cold(days),
    })
}

fn rank_engaged(
    buyer: EngagedBuyer,
    lookups: &Lookups,
    thresholds: &TierThresholds,
    now: DateTime<Utc>,
) -> Option<RankedBuyer> {
    let profile = lookups.profiles.get(&buyer.buyer_id)?;
    let transcript = lookups.transcript(&buyer.buyer_id);
    let outreach = lookups.outreach.get(&buyer.buyer_id).cloned();

    let score = engagement_score(profile, &transcript, outreach.as_ref());
    let tier = classify_tier(
        score,
        profile.has_fee_agreement,
        profile.acquisition_appetite.as_deref(),
        thresholds,
    );
    let fit_signals = engagement_fit_signals(buyer.source, profile, &transcript, outreach.as_ref());
    let last = engagement_only_last_engagement(
        buyer.source,
        lookups.last_contact.get(&buyer.buyer_id),
        &transcript,
        outreach.as_ref(),
    );
    let days = days_since(last.at, now);

    Some(RankedBuyer {
        buyer_id: profile.id,
        company_name: profile.company_name.clone(),
        pe_firm_name: profile.pe_firm_name.clone(),
        company_website: profile.company_website.clone(),
        hq_city: profile.hq_city.clone(),
        hq_state: profile.hq_state.clone(),
        acquisition_appetite: profile.acquisition_appetite.clone(),
        has_fee_agreement: profile.has_fee_agreement,
        thesis_summary: profile.thesis_summary.clone(),
        composite_fit_score: score,
        geography_score: None,
        size_score: None,
        service_score: None,
        owner_goals_score: None,
        source: buyer.source.into(),
        tier,
        tier_label: tier.label().to_string(),
        fit_signals,
        fit_reasoning: Some(engagement_reasoning(buyer.source, &transcript)),
        transcript_insights: transcript,
        outreach_info: outreach,
        last_engagement: last.at,
        last_engagement_type: kind_label(&last),
        days_since_engagement: days,
        engagement_cold: is_cold(days),
    })
}

fn kind_label(last: &LastEngagement) -> Option<String> {
    last.kind.map(str::to_string)
}

/// Total order used for the final ranking: score, fee agreement, calls,
/// then appetite.
pub(crate) fn compare_ranked(a: &RankedBuyer, b: &RankedBuyer) -> Ordering {
    b.composite_fit_score
        .total_cmp(&a.composite_fit_score)
        .then_with(|| b.has_fee_agreement.cmp(&a.has_fee_agreement))
        .then_with(|| {
            b.transcript_insights
                .call_count
                .cmp(&a.transcript_insights.call_count)
        })
        .then_with(|| {
            appetite_ordinal(a.acquisition_appetite.as_deref())
                .cmp(&appetite_ordinal(b.acquisition_appetite.as_deref()))
        })
}

fn sort_ranked(buyers: &mut [RankedBuyer]) {
    buyers.sort_by(compare_ranked);
}

fn summarize(buyers: Vec<RankedBuyer>, now: DateTime<Utc>) -> RecommendedBuyersResult {
    let mut tier_summary = TierSummary::default();
    let mut data_stats = DataStats::default();
    let mut total_scored = 0;

    for buyer in &buyers {
        tier_summary.record(buyer.tier);
        if buyer.source == BuyerSource::Scored {
            total_scored += 1;
        }
        if buyer.transcript_insights.call_count > 0 {
            data_stats.buyers_with_transcripts += 1;
        }
        if buyer.outreach_info.as_ref().is_some_and(|o| o.contacted) {
            data_stats.buyers_with_outreach += 1;
        }
        if buyer.transcript_insights.ceo_detected {
            data_stats.buyers_with_ceo_engagement += 1;
        }
    }

    RecommendedBuyersResult {
        total: buyers.len(),
        total_scored,
        tier_summary,
        data_stats,
        buyers,
        cached_at: now,
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
