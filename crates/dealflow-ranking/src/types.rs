use chrono::{DateTime, Utc};
use dealflow_core::{BuyerId, EngagementSource, Tier};
use serde::{Deserialize, Serialize};

/// Which path put a buyer into the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuyerSource {
    Scored,
    Marketplace,
    Pipeline,
    Contact,
}

impl BuyerSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BuyerSource::Scored => "scored",
            BuyerSource::Marketplace => "marketplace",
            BuyerSource::Pipeline => "pipeline",
            BuyerSource::Contact => "contact",
        }
    }
}

impl From<EngagementSource> for BuyerSource {
    fn from(source: EngagementSource) -> Self {
        match source {
            EngagementSource::Marketplace => BuyerSource::Marketplace,
            EngagementSource::Pipeline => BuyerSource::Pipeline,
            EngagementSource::Contact => BuyerSource::Contact,
        }
    }
}

/// Call-transcript activity rolled up per buyer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptInsight {
    pub call_count: u32,
    pub latest_call_date: Option<DateTime<Utc>>,
    pub ceo_detected: bool,
}

/// Outreach funnel state taken from the first outreach row seen for a buyer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct OutreachInfo {
    pub contacted: bool,
    pub nda_signed: bool,
    pub cim_sent: bool,
    pub meeting_scheduled: bool,
    pub contacted_at: Option<DateTime<Utc>>,
    pub outcome: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedBuyer {
    pub buyer_id: BuyerId,
    pub company_name: String,
    pub pe_firm_name: Option<String>,
    pub company_website: Option<String>,
    pub hq_city: Option<String>,
    pub hq_state: Option<String>,
    pub acquisition_appetite: Option<String>,
    pub has_fee_agreement: bool,
    pub thesis_summary: Option<String>,
    /// Formal score (override-aware) on the scored path, heuristic engagement
    /// score otherwise.
    pub composite_fit_score: f64,
    pub geography_score: Option<f64>,
    pub size_score: Option<f64>,
    pub service_score: Option<f64>,
    pub owner_goals_score: Option<f64>,
    pub source: BuyerSource,
    pub tier: Tier,
    pub tier_label: String,
    pub fit_signals: Vec<String>,
    pub fit_reasoning: Option<String>,
    pub transcript_insights: TranscriptInsight,
    pub outreach_info: Option<OutreachInfo>,
    pub last_engagement: Option<DateTime<Utc>>,
    pub last_engagement_type: Option<String>,
    pub days_since_engagement: Option<i64>,
    pub engagement_cold: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSummary {
    pub move_now: usize,
    pub strong_candidate: usize,
    pub speculative: usize,
}

impl TierSummary {
    pub(crate) fn record(&mut self, tier: Tier) {
        match tier {
            Tier::MoveNow => self.move_now += 1,
            Tier::StrongCandidate => self.strong_candidate += 1,
            Tier::Speculative => self.speculative += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStats {
    pub buyers_with_transcripts: usize,
    pub buyers_with_outreach: usize,
    pub buyers_with_ceo_engagement: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedBuyersResult {
    pub buyers: Vec<RankedBuyer>,
    pub total: usize,
    pub total_scored: usize,
    pub tier_summary: TierSummary,
    pub data_stats: DataStats,
    pub cached_at: DateTime<Utc>,
}

impl RecommendedBuyersResult {
    /// Well-formed result with no buyers and zeroed counters.
    #[must_use]
    pub fn empty(cached_at: DateTime<Utc>) -> Self {
        Self {
            buyers: Vec::new(),
            total: 0,
            total_scored: 0,
            tier_summary: TierSummary::default(),
            data_stats: DataStats::default(),
            cached_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_serializes_with_camel_case_envelope() {
        let result = RecommendedBuyersResult::empty(Utc::now());
        let json = serde_json::to_value(&result).expect("serialize");
        assert!(json.get("totalScored").is_some());
        assert!(json.get("tierSummary").is_some());
        assert_eq!(json["dataStats"]["buyers_with_ceo_engagement"], 0);
        assert_eq!(json["tierSummary"]["move_now"], 0);
        assert!(json["cachedAt"].is_string());
    }

    #[test]
    fn buyer_source_from_engagement_source() {
        assert_eq!(
            BuyerSource::from(EngagementSource::Pipeline),
            BuyerSource::Pipeline
        );
        let json = serde_json::to_string(&BuyerSource::Scored).expect("serialize");
        assert_eq!(json, "\"scored\"");
    }
}
