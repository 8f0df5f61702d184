//! Read queries for the `remarketing_scores` table.

use dealflow_core::{BuyerId, ScoredCandidate};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{decimal_to_f64, DbError};

/// A row from the `remarketing_scores` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScoreRow {
    pub buyer_id: BuyerId,
    pub composite_score: Option<Decimal>,
    pub human_override_score: Option<Decimal>,
    pub geography_score: Option<Decimal>,
    pub size_score: Option<Decimal>,
    pub service_score: Option<Decimal>,
    pub owner_goals_score: Option<Decimal>,
    pub tier: Option<String>,
    pub status: Option<String>,
    pub fit_reasoning: Option<String>,
    pub is_disqualified: Option<bool>,
}

impl From<ScoreRow> for ScoredCandidate {
    fn from(row: ScoreRow) -> Self {
        Self {
            buyer_id: row.buyer_id,
            composite_score: decimal_to_f64(row.composite_score),
            human_override_score: decimal_to_f64(row.human_override_score),
            geography_score: decimal_to_f64(row.geography_score),
            size_score: decimal_to_f64(row.size_score),
            service_score: decimal_to_f64(row.service_score),
            owner_goals_score: decimal_to_f64(row.owner_goals_score),
            tier: row.tier,
            status: row.status,
            fit_reasoning: row.fit_reasoning,
            is_disqualified: row.is_disqualified,
        }
    }
}

/// Returns up to `limit` non-disqualified score rows for a listing, best
/// composite score first, followed by every disqualified row. A `NULL`
/// disqualification flag counts as eligible. The disqualified rows do not
/// count toward `limit`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_scored_candidates(
    pool: &PgPool,
    listing_id: Uuid,
    limit: i64,
) -> Result<Vec<ScoreRow>, DbError> {
    let rows = sqlx::query_as::<_, ScoreRow>(
        "SELECT * FROM ( \
            (SELECT buyer_id, composite_score, human_override_score, geography_score, \
                    size_score, service_score, owner_goals_score, tier, status, fit_reasoning, \
                    is_disqualified \
             FROM remarketing_scores \
             WHERE listing_id = $1 AND is_disqualified IS NOT TRUE \
             ORDER BY composite_score DESC NULLS LAST, buyer_id \
             LIMIT $2) \
            UNION ALL \
            (SELECT buyer_id, composite_score, human_override_score, geography_score, \
                    size_score, service_score, owner_goals_score, tier, status, fit_reasoning, \
                    is_disqualified \
             FROM remarketing_scores \
             WHERE listing_id = $1 AND is_disqualified IS TRUE) \
         ) AS candidates \
         ORDER BY is_disqualified IS TRUE, composite_score DESC NULLS LAST, buyer_id",
    )
    .bind(listing_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
