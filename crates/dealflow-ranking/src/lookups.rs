//! Per-buyer lookup maps built from enrichment rows.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use dealflow_core::{
    BuyerId, BuyerProfile, ConnectionRequest, EnrichmentData, OutreachRow, TranscriptRow,
};

use crate::types::{OutreachInfo, TranscriptInsight};

/// Most recent connection request a buyer made on the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastContact {
    pub at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Lookups {
    pub profiles: HashMap<BuyerId, BuyerProfile>,
    pub last_contact: HashMap<BuyerId, LastContact>,
    pub transcripts: HashMap<BuyerId, TranscriptInsight>,
    pub outreach: HashMap<BuyerId, OutreachInfo>,
}

impl Lookups {
    #[must_use]
    pub fn build(data: EnrichmentData) -> Self {
        let profiles = data
            .buyers
            .into_iter()
            .filter(|buyer| !buyer.archived)
            .map(|buyer| (buyer.id, buyer))
            .collect();

        Self {
            profiles,
            last_contact: latest_connections(&data.connection_requests),
            transcripts: aggregate_transcripts(&data.transcripts),
            outreach: first_outreach(&data.outreach),
        }
    }

    /// Transcript rollup for `buyer_id`, zeroed when the buyer has no calls.
    #[must_use]
    pub fn transcript(&self, buyer_id: &BuyerId) -> TranscriptInsight {
        self.transcripts.get(buyer_id).cloned().unwrap_or_default()
    }
}

/// Latest connection request per buyer, by `updated_at` falling back to
/// `created_at`. Requests without a buyer are ignored.
#[must_use]
pub fn latest_connections(rows: &[ConnectionRequest]) -> HashMap<BuyerId, LastContact> {
    let mut latest: HashMap<BuyerId, LastContact> = HashMap::new();

    for row in rows {
        let Some(buyer_id) = row.buyer_id else {
            continue;
        };
        let at = row.last_touched();
        let newer = latest.get(&buyer_id).is_none_or(|seen| at > seen.at);
        if newer {
            latest.insert(buyer_id, LastContact { at });
        }
    }

    latest
}

/// Roll transcript rows up per buyer: count every row, keep the latest call
/// date, and OR the `ceo_detected` insight flags.
#[must_use]
pub fn aggregate_transcripts(rows: &[TranscriptRow]) -> HashMap<BuyerId, TranscriptInsight> {
    let mut insights: HashMap<BuyerId, TranscriptInsight> = HashMap::new();

    for row in rows {
        let entry = insights.entry(row.buyer_id).or_default();
        entry.call_count = entry.call_count.saturating_add(1);
        entry.latest_call_date = entry.latest_call_date.max(row.call_date);
        entry.ceo_detected |= row.ceo_detected();
    }

    insights
}

/// Outreach state from the first row seen per buyer; later rows are ignored.
#[must_use]
pub fn first_outreach(rows: &[OutreachRow]) -> HashMap<BuyerId, OutreachInfo> {
    let mut outreach: HashMap<BuyerId, OutreachInfo> = HashMap::new();

    for row in rows {
        outreach
            .entry(row.buyer_id)
            .or_insert_with(|| OutreachInfo {
                contacted: row.contacted_at.is_some(),
                nda_signed: row.nda_signed_at.is_some(),
                cim_sent: row.cim_sent_at.is_some(),
                meeting_scheduled: row.meeting_scheduled_at.is_some(),
                contacted_at: row.contacted_at,
                outcome: row.outcome.clone(),
            });
    }

    outreach
}
