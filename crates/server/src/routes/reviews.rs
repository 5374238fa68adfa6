use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::{delete, get, post},
};
use db::models::review::{Review, ReviewStatus};
use serde::Deserialize;
use services::services::reviews::{ReviewService, SubmitReview};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, extract::AppJson};

#[derive(Debug, Deserialize)]
pub struct ReviewFilter {
    pub status: Option<ReviewStatus>,
}

/// GET /api/reviews
/// Approved reviews for the storefront
pub async fn list_published_reviews(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Review>>>, ApiError> {
    let reviews = ReviewService::published(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(reviews)))
}

/// POST /api/reviews
pub async fn submit_review(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubmitReview>,
) -> Result<ResponseJson<ApiResponse<Review>>, ApiError> {
    let review = ReviewService::submit(&state.db().pool, payload).await?;
    Ok(ResponseJson(ApiResponse::success(review)))
}

/// GET /api/admin/reviews?status=pending
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(filter): Query<ReviewFilter>,
) -> Result<ResponseJson<ApiResponse<Vec<Review>>>, ApiError> {
    let reviews = ReviewService::list(&state.db().pool, filter.status).await?;
    Ok(ResponseJson(ApiResponse::success(reviews)))
}

/// POST /api/admin/reviews/{id}/approve
pub async fn approve_review(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
) -> Result<ResponseJson<ApiResponse<Review>>, ApiError> {
    let review = ReviewService::approve(&state.db().pool, review_id).await?;
    Ok(ResponseJson(ApiResponse::success(review)))
}

/// DELETE /api/admin/reviews/{id}
pub async fn delete_review(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    ReviewService::delete(&state.db().pool, review_id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/reviews", get(list_published_reviews).post(submit_review))
        .route("/admin/reviews", get(list_reviews))
        .route("/admin/reviews/{id}", delete(delete_review))
        .route("/admin/reviews/{id}/approve", post(approve_review))
}
