//! Read queries for the `connection_requests` table.

use chrono::{DateTime, Utc};
use dealflow_core::{BuyerId, ConnectionRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConnectionRequestRow {
    pub listing_id: Uuid,
    pub user_id: Option<Uuid>,
    pub buyer_id: Option<BuyerId>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ConnectionRequestRow> for ConnectionRequest {
    fn from(row: ConnectionRequestRow) -> Self {
        Self {
            listing_id: row.listing_id,
            user_id: row.user_id,
            buyer_id: row.buyer_id,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Every connection request made on a listing, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_connection_requests(
    pool: &PgPool,
    listing_id: Uuid,
) -> Result<Vec<ConnectionRequestRow>, DbError> {
    let rows = sqlx::query_as::<_, ConnectionRequestRow>(
        "SELECT listing_id, user_id, buyer_id, status, created_at, updated_at \
         FROM connection_requests \
         WHERE listing_id = $1 \
         ORDER BY created_at",
    )
    .bind(listing_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
