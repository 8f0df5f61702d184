//! Last-engagement resolution and the cold-buyer rule.

use chrono::{DateTime, Utc};
use dealflow_core::EngagementSource;

use crate::lookups::LastContact;
use crate::types::{OutreachInfo, TranscriptInsight};

/// Buyers with no engagement for longer than this are cold.
pub const COLD_AFTER_DAYS: i64 = 90;

const MILLIS_PER_DAY: i64 = 86_400_000;

pub const CALL_RECORDING: &str = "Call recording";
pub const CONNECTION_REQUEST: &str = "Connection request";
pub const OUTREACH: &str = "Outreach";
pub const MARKETPLACE_INQUIRY: &str = "Marketplace inquiry";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastEngagement {
    pub at: Option<DateTime<Utc>>,
    pub kind: Option<&'static str>,
}

impl LastEngagement {
    fn new(at: Option<DateTime<Utc>>, kind: &'static str) -> Self {
        Self {
            at,
            kind: Some(kind),
        }
    }
}

/// Last engagement for a scored buyer: the latest connection request,
/// replaced by the latest call when the call is more recent.
#[must_use]
pub fn scored_last_engagement(
    contact: Option<&LastContact>,
    transcript: &TranscriptInsight,
) -> LastEngagement {
    let call = transcript.latest_call_date;

    match (contact, call) {
        (Some(contact), Some(call)) if call > contact.at => {
            LastEngagement::new(Some(call), CALL_RECORDING)
        }
        (Some(contact), _) => LastEngagement::new(Some(contact.at), CONNECTION_REQUEST),
        (None, Some(call)) => LastEngagement::new(Some(call), CALL_RECORDING),
        (None, None) => LastEngagement::default(),
    }
}

/// Last engagement for an engagement-only buyer: latest call, else the
/// outreach contact, else the marketplace inquiry itself. A marketplace
/// buyer whose connection request is missing has no engagement.
#[must_use]
pub fn engagement_only_last_engagement(
    source: EngagementSource,
    contact: Option<&LastContact>,
    transcript: &TranscriptInsight,
    outreach: Option<&OutreachInfo>,
) -> LastEngagement {
    if let Some(call) = transcript.latest_call_date {
        return LastEngagement::new(Some(call), CALL_RECORDING);
    }
    if let Some(outreach) = outreach.filter(|o| o.contacted) {
        return LastEngagement::new(outreach.contacted_at, OUTREACH);
    }
    match (source, contact) {
        (EngagementSource::Marketplace, Some(contact)) => {
            LastEngagement::new(Some(contact.at), MARKETPLACE_INQUIRY)
        }
        _ => LastEngagement::default(),
    }
}

/// Whole days elapsed from `at` to `now`, rounded down.
#[must_use]
pub fn days_since(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<i64> {
    at.map(|at| (now - at).num_milliseconds().div_euclid(MILLIS_PER_DAY))
}

#[must_use]
pub fn is_cold(days_since: Option<i64>) -> bool {
    days_since.is_none_or(|days| days > COLD_AFTER_DAYS)
}
