//! Read queries for the `buyer_transcripts` table.

use chrono::{DateTime, Utc};
use dealflow_core::{BuyerId, TranscriptRow};
use serde_json::Value;
use sqlx::PgPool;

use crate::DbError;

/// A row from `buyer_transcripts`; `extracted_insights` is the raw JSONB.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TranscriptDbRow {
    pub buyer_id: BuyerId,
    pub call_date: Option<DateTime<Utc>>,
    pub extracted_insights: Option<Value>,
}

impl From<TranscriptDbRow> for TranscriptRow {
    fn from(row: TranscriptDbRow) -> Self {
        Self {
            buyer_id: row.buyer_id,
            call_date: row.call_date,
            extracted_insights: row.extracted_insights,
        }
    }
}

/// Every transcript recorded for any of `buyer_ids`, across all listings.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_transcripts_for_buyers(
    pool: &PgPool,
    buyer_ids: &[BuyerId],
) -> Result<Vec<TranscriptDbRow>, DbError> {
    let rows = sqlx::query_as::<_, TranscriptDbRow>(
        "SELECT buyer_id, call_date, extracted_insights \
         FROM buyer_transcripts \
         WHERE buyer_id = ANY($1) \
         ORDER BY call_date DESC NULLS LAST",
    )
    .bind(buyer_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
