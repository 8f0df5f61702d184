//! Read-only inputs consumed by the buyer recommendation aggregator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type BuyerId = Uuid;

/// Where an engagement-only buyer was discovered.
///
/// Variants are declared in merge precedence order: a buyer seen in an
/// earlier source is never relabelled by a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementSource {
    Marketplace,
    Pipeline,
    Contact,
}

impl EngagementSource {
    /// All sources, highest precedence first.
    pub const PRECEDENCE: [EngagementSource; 3] = [
        EngagementSource::Marketplace,
        EngagementSource::Pipeline,
        EngagementSource::Contact,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EngagementSource::Marketplace => "marketplace",
            EngagementSource::Pipeline => "pipeline",
            EngagementSource::Contact => "contact",
        }
    }
}

impl std::fmt::Display for EngagementSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row from the scoring store for one (listing, buyer) pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub buyer_id: BuyerId,
    pub composite_score: Option<f64>,
    /// Manual correction entered by a deal lead; wins over `composite_score`.
    pub human_override_score: Option<f64>,
    pub geography_score: Option<f64>,
    pub size_score: Option<f64>,
    pub service_score: Option<f64>,
    pub owner_goals_score: Option<f64>,
    pub tier: Option<String>,
    pub status: Option<String>,
    pub fit_reasoning: Option<String>,
    pub is_disqualified: Option<bool>,
}

impl ScoredCandidate {
    /// Override score if present, else the composite, else zero.
    #[must_use]
    pub fn effective_score(&self) -> f64 {
        self.human_override_score
            .or(self.composite_score)
            .unwrap_or(0.0)
    }

    /// Only an explicit `true` disqualifies; `NULL` counts as eligible.
    #[must_use]
    pub fn is_disqualified(&self) -> bool {
        self.is_disqualified == Some(true)
    }
}

/// Presence of a buyer in one of the engagement sources for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementSignal {
    pub buyer_id: BuyerId,
    pub source: EngagementSource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuyerProfile {
    pub id: BuyerId,
    pub company_name: String,
    pub pe_firm_name: Option<String>,
    pub company_website: Option<String>,
    pub hq_city: Option<String>,
    pub hq_state: Option<String>,
    /// Free text; recognised values are `aggressive`, `active`, `selective`
    /// and `opportunistic` in any casing.
    pub acquisition_appetite: Option<String>,
    pub has_fee_agreement: bool,
    pub thesis_summary: Option<String>,
    pub archived: bool,
}

/// A marketplace connection request made against a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionRequest {
    pub listing_id: Uuid,
    pub user_id: Option<Uuid>,
    pub buyer_id: Option<BuyerId>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ConnectionRequest {
    /// Most recent activity on the request.
    #[must_use]
    pub fn last_touched(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// One recorded call with a buyer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptRow {
    pub buyer_id: BuyerId,
    pub call_date: Option<DateTime<Utc>>,
    /// Semi-structured output of transcript analysis.
    pub extracted_insights: Option<serde_json::Value>,
}

impl TranscriptRow {
    #[must_use]
    pub fn ceo_detected(&self) -> bool {
        self.extracted_insights
            .as_ref()
            .and_then(|insights| insights.get("ceo_detected"))
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }
}

/// Outreach funnel progress for one (listing, buyer) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutreachRow {
    pub buyer_id: BuyerId,
    pub contacted_at: Option<DateTime<Utc>>,
    pub nda_signed_at: Option<DateTime<Utc>>,
    pub cim_sent_at: Option<DateTime<Utc>>,
    pub meeting_scheduled_at: Option<DateTime<Utc>>,
    pub outcome: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_score_prefers_override() {
        let candidate = ScoredCandidate {
            composite_score: Some(62.0),
            human_override_score: Some(88.0),
            ..ScoredCandidate::default()
        };
        assert!((candidate.effective_score() - 88.0).abs() < f64::EPSILON);
    }

    #[test]
    fn effective_score_falls_back_to_zero() {
        let candidate = ScoredCandidate::default();
        assert!(candidate.effective_score().abs() < f64::EPSILON);
    }

    #[test]
    fn null_disqualification_is_eligible() {
        let mut candidate = ScoredCandidate::default();
        assert!(!candidate.is_disqualified());
        candidate.is_disqualified = Some(false);
        assert!(!candidate.is_disqualified());
        candidate.is_disqualified = Some(true);
        assert!(candidate.is_disqualified());
    }

    #[test]
    fn precedence_order_is_marketplace_pipeline_contact() {
        assert_eq!(
            EngagementSource::PRECEDENCE.map(EngagementSource::as_str),
            ["marketplace", "pipeline", "contact"]
        );
    }

    #[test]
    fn last_touched_falls_back_to_created_at() {
        let created_at = Utc::now();
        let request = ConnectionRequest {
            listing_id: Uuid::new_v4(),
            user_id: None,
            buyer_id: None,
            status: "pending".to_string(),
            created_at,
            updated_at: None,
        };
        assert_eq!(request.last_touched(), created_at);
    }

    #[test]
    fn ceo_detected_reads_insights_flag() {
        let row = TranscriptRow {
            buyer_id: Uuid::new_v4(),
            call_date: None,
            extracted_insights: Some(serde_json::json!({ "ceo_detected": true, "topics": [] })),
        };
        assert!(row.ceo_detected());

        let missing = TranscriptRow {
            extracted_insights: Some(serde_json::json!({ "ceo_detected": "yes" })),
            ..row
        };
        assert!(!missing.ceo_detected());
    }
}
