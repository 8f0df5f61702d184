//! Read queries for the `buyers` table.

use dealflow_core::{BuyerId, BuyerProfile};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `buyers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BuyerRow {
    pub id: BuyerId,
    pub company_name: String,
    pub pe_firm_name: Option<String>,
    pub company_website: Option<String>,
    pub hq_city: Option<String>,
    pub hq_state: Option<String>,
    pub acquisition_appetite: Option<String>,
    pub has_fee_agreement: bool,
    pub thesis_summary: Option<String>,
    pub archived: bool,
}

impl From<BuyerRow> for BuyerProfile {
    fn from(row: BuyerRow) -> Self {
        Self {
            id: row.id,
            company_name: row.company_name,
            pe_firm_name: row.pe_firm_name,
            company_website: row.company_website,
            hq_city: row.hq_city,
            hq_state: row.hq_state,
            acquisition_appetite: row.acquisition_appetite,
            has_fee_agreement: row.has_fee_agreement,
            thesis_summary: row.thesis_summary,
            archived: row.archived,
        }
    }
}

/// Returns the non-archived buyers among `ids`. Unknown ids are ignored.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_active_buyers_by_ids(
    pool: &PgPool,
    ids: &[BuyerId],
) -> Result<Vec<BuyerRow>, DbError> {
    let rows = sqlx::query_as::<_, BuyerRow>(
        "SELECT id, company_name, pe_firm_name, company_website, hq_city, hq_state, \
                acquisition_appetite, has_fee_agreement, thesis_summary, archived \
         FROM buyers \
         WHERE id = ANY($1) AND archived = false",
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
