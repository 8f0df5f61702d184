use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use dealflow_ranking::RankingError;
use serde::Deserialize;
use uuid::Uuid;

use super::{normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct RecommendedBuyersQuery {
    pub limit: Option<i64>,
}

pub(super) async fn list_recommended_buyers(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(listing_id): Path<String>,
    Query(params): Query<RecommendedBuyersQuery>,
) -> Result<Response, ApiError> {
    let Ok(listing_id) = Uuid::parse_str(&listing_id) else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            format!("listing_id is not a valid UUID: {listing_id}"),
        ));
    };
    let limit = normalize_limit(params.limit, state.default_limit);

    let result = state
        .cache
        .get(listing_id, limit)
        .await
        .map_err(|e| map_ranking_error(req_id.0.clone(), &e))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data: result.as_ref(),
            meta: ResponseMeta::new(req_id.0),
        }),
    )
        .into_response())
}

fn map_ranking_error(request_id: String, error: &RankingError) -> ApiError {
    match error {
        RankingError::Source(source) => {
            tracing::error!(store = source.store, error = %source, "recommendation source failed");
            ApiError::new(
                request_id,
                "upstream_error",
                format!("failed to load {}", source.store),
            )
        }
    }
}
