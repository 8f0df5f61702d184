//! Buyer ids surfaced by the three engagement stores for a listing.
//!
//! Each query takes the ids the caller already holds and leaves them out.

use dealflow_core::{BuyerId, EngagementSource};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// Buyers that made a marketplace connection request on the listing.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_marketplace_buyer_ids(
    pool: &PgPool,
    listing_id: Uuid,
    exclude: &[BuyerId],
) -> Result<Vec<BuyerId>, DbError> {
    let ids = sqlx::query_scalar::<_, Uuid>(
        "SELECT DISTINCT buyer_id \
         FROM connection_requests \
         WHERE listing_id = $1 AND buyer_id IS NOT NULL AND NOT (buyer_id = ANY($2))",
    )
    .bind(listing_id)
    .bind(exclude)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

/// Buyers currently in the listing's deal pipeline.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_pipeline_buyer_ids(
    pool: &PgPool,
    listing_id: Uuid,
    exclude: &[BuyerId],
) -> Result<Vec<BuyerId>, DbError> {
    let ids = sqlx::query_scalar::<_, Uuid>(
        "SELECT DISTINCT buyer_id \
         FROM deal_pipeline \
         WHERE listing_id = $1 AND deleted_at IS NULL AND NOT (buyer_id = ANY($2))",
    )
    .bind(listing_id)
    .bind(exclude)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

/// Buyers with a contact record tied to the listing.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_contact_buyer_ids(
    pool: &PgPool,
    listing_id: Uuid,
    exclude: &[BuyerId],
) -> Result<Vec<BuyerId>, DbError> {
    let ids = sqlx::query_scalar::<_, Uuid>(
        "SELECT DISTINCT buyer_id \
         FROM buyer_contacts \
         WHERE listing_id = $1 AND NOT (buyer_id = ANY($2))",
    )
    .bind(listing_id)
    .bind(exclude)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

/// Dispatch to the query backing `source`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_engaged_buyer_ids(
    pool: &PgPool,
    listing_id: Uuid,
    source: EngagementSource,
    exclude: &[BuyerId],
) -> Result<Vec<BuyerId>, DbError> {
    match source {
        EngagementSource::Marketplace => {
            list_marketplace_buyer_ids(pool, listing_id, exclude).await
        }
        EngagementSource::Pipeline => list_pipeline_buyer_ids(pool, listing_id, exclude).await,
        EngagementSource::Contact => list_contact_buyer_ids(pool, listing_id, exclude).await,
    }
}
