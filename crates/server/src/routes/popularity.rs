use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::{get, post},
};
use services::services::popularity::{
    DEFAULT_TOP_PRODUCTS, PopularProduct, PopularityService, TrackPopularityRequest,
};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, extract::AppJson};

/// POST /api/track-popularity
/// Record a storefront click on a product or category
pub async fn track_popularity(
    State(state): State<AppState>,
    AppJson(payload): AppJson<TrackPopularityRequest>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    PopularityService::track(&state.db().pool, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

/// GET /api/admin/popularity
pub async fn get_popular_products(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<PopularProduct>>>, ApiError> {
    let top = PopularityService::top_products(&state.db().pool, DEFAULT_TOP_PRODUCTS).await?;
    Ok(ResponseJson(ApiResponse::success(top)))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/track-popularity", post(track_popularity))
        .route("/admin/popularity", get(get_popular_products))
}
