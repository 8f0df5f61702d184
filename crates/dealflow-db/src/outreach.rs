//! Read queries for the `outreach_records` table.

use chrono::{DateTime, Utc};
use dealflow_core::{BuyerId, OutreachRow};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OutreachRecordRow {
    pub buyer_id: BuyerId,
    pub contacted_at: Option<DateTime<Utc>>,
    pub nda_signed_at: Option<DateTime<Utc>>,
    pub cim_sent_at: Option<DateTime<Utc>>,
    pub meeting_scheduled_at: Option<DateTime<Utc>>,
    pub outcome: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<OutreachRecordRow> for OutreachRow {
    fn from(row: OutreachRecordRow) -> Self {
        Self {
            buyer_id: row.buyer_id,
            contacted_at: row.contacted_at,
            nda_signed_at: row.nda_signed_at,
            cim_sent_at: row.cim_sent_at,
            meeting_scheduled_at: row.meeting_scheduled_at,
            outcome: row.outcome,
            created_at: row.created_at,
        }
    }
}

/// Outreach rows for the listing restricted to `buyer_ids`, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_outreach_records(
    pool: &PgPool,
    listing_id: Uuid,
    buyer_ids: &[BuyerId],
) -> Result<Vec<OutreachRecordRow>, DbError> {
    let rows = sqlx::query_as::<_, OutreachRecordRow>(
        "SELECT buyer_id, contacted_at, nda_signed_at, cim_sent_at, meeting_scheduled_at, \
                outcome, created_at \
         FROM outreach_records \
         WHERE listing_id = $1 AND buyer_id = ANY($2) \
         ORDER BY created_at DESC",
    )
    .bind(listing_id)
    .bind(buyer_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
