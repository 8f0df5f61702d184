//! Engagement-score heuristic and fit-signal text for ranked buyers.

use dealflow_core::{BuyerProfile, EngagementSource, ScoredCandidate};

use crate::tier::{appetite_ordinal, is_hot_appetite};
use crate::types::{OutreachInfo, TranscriptInsight};

/// Maximum fit signals attached to one buyer.
pub const MAX_FIT_SIGNALS: usize = 5;

/// Starting score for a buyer known only through engagement.
pub const ENGAGEMENT_BASE: f64 = 30.0;
/// At least one recorded call.
pub const BONUS_CALLS: f64 = 15.0;
/// A transcript flagged the CEO or owner on the call.
pub const BONUS_CEO: f64 = 10.0;
pub const BONUS_CONTACTED: f64 = 5.0;
pub const BONUS_NDA: f64 = 10.0;
pub const BONUS_MEETING: f64 = 10.0;
pub const BONUS_FEE_AGREEMENT: f64 = 10.0;
/// Appetite is `aggressive` or `active`.
pub const BONUS_APPETITE: f64 = 10.0;
pub const ENGAGEMENT_CAP: f64 = 100.0;

/// Sub-scores at or above this value earn a fit signal.
const STRONG_SUB_SCORE: f64 = 80.0;

/// Heuristic score for a buyer that has no formal score on the listing.
#[must_use]
pub fn engagement_score(
    profile: &BuyerProfile,
    transcript: &TranscriptInsight,
    outreach: Option<&OutreachInfo>,
) -> f64 {
    let mut score = ENGAGEMENT_BASE;

    if transcript.call_count > 0 {
        score += BONUS_CALLS;
    }
    if transcript.ceo_detected {
        score += BONUS_CEO;
    }
    if let Some(outreach) = outreach {
        if outreach.contacted {
            score += BONUS_CONTACTED;
        }
        if outreach.nda_signed {
            score += BONUS_NDA;
        }
        if outreach.meeting_scheduled {
            score += BONUS_MEETING;
        }
    }
    if profile.has_fee_agreement {
        score += BONUS_FEE_AGREEMENT;
    }
    if is_hot_appetite(profile.acquisition_appetite.as_deref()) {
        score += BONUS_APPETITE;
    }

    score.min(ENGAGEMENT_CAP)
}

fn call_signal(call_count: u32) -> String {
    if call_count == 1 {
        "1 call on record".to_string()
    } else {
        format!("{call_count} calls on record")
    }
}

fn source_signal(source: EngagementSource) -> &'static str {
    match source {
        EngagementSource::Marketplace => "Marketplace interest",
        EngagementSource::Pipeline => "In active pipeline",
        EngagementSource::Contact => "Prior contact on record",
    }
}

/// Evidence for a formally scored buyer, strongest fit dimensions first.
#[must_use]
pub fn scored_fit_signals(
    candidate: &ScoredCandidate,
    profile: &BuyerProfile,
    transcript: &TranscriptInsight,
    outreach: Option<&OutreachInfo>,
) -> Vec<String> {
    let strong = |score: Option<f64>| score.is_some_and(|s| s >= STRONG_SUB_SCORE);
    let mut signals: Vec<String> = Vec::new();

    if strong(candidate.geography_score) {
        signals.push("Strong geographic fit".to_string());
    }
    if strong(candidate.size_score) {
        signals.push("Size match".to_string());
    }
    if strong(candidate.service_score) {
        signals.push("Service alignment".to_string());
    }
    if strong(candidate.owner_goals_score) {
        signals.push("Owner goals aligned".to_string());
    }
    if profile.has_fee_agreement {
        signals.push("Fee agreement signed".to_string());
    }
    match appetite_ordinal(profile.acquisition_appetite.as_deref()) {
        0 => signals.push("Aggressive acquirer".to_string()),
        1 => signals.push("Active acquirer".to_string()),
        _ => {}
    }
    if transcript.call_count > 0 {
        signals.push(call_signal(transcript.call_count));
    }
    if transcript.ceo_detected {
        signals.push("CEO/owner engaged".to_string());
    }
    if let Some(outreach) = outreach {
        if outreach.nda_signed {
            signals.push("NDA executed".to_string());
        }
        if outreach.meeting_scheduled {
            signals.push("Meeting scheduled".to_string());
        }
        if outreach.cim_sent {
            signals.push("CIM sent".to_string());
        }
    }

    signals.truncate(MAX_FIT_SIGNALS);
    signals
}

/// Evidence for an engagement-only buyer. The source tag always comes first.
#[must_use]
pub fn engagement_fit_signals(
    source: EngagementSource,
    profile: &BuyerProfile,
    transcript: &TranscriptInsight,
    outreach: Option<&OutreachInfo>,
) -> Vec<String> {
    let mut signals = vec![source_signal(source).to_string()];

    if transcript.call_count > 0 {
        signals.push(call_signal(transcript.call_count));
    }
    if transcript.ceo_detected {
        signals.push("CEO/owner engaged".to_string());
    }
    if profile.has_fee_agreement {
        signals.push("Fee agreement signed".to_string());
    }
    if outreach.is_some_and(|o| o.nda_signed) {
        signals.push("NDA executed".to_string());
    }

    signals.truncate(MAX_FIT_SIGNALS);
    signals
}

/// Reasoning line shown for buyers ranked without a formal score.
#[must_use]
pub fn engagement_reasoning(source: EngagementSource, transcript: &TranscriptInsight) -> String {
    let mut reasoning = format!(
        "Ranked on engagement data ({}); not formally scored for this listing.",
        source_signal(source).to_lowercase()
    );
    if transcript.call_count > 0 {
        reasoning.push_str(&format!(" {}.", call_signal(transcript.call_count)));
    }
    reasoning
}
