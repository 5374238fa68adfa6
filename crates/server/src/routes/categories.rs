use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::category::Category;
use services::services::categories::{CategoryService, SaveCategory};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, extract::AppJson};

/// GET /api/admin/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Category>>>, ApiError> {
    let categories = CategoryService::list(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(categories)))
}

/// POST /api/admin/categories
pub async fn create_category(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SaveCategory>,
) -> Result<ResponseJson<ApiResponse<Category>>, ApiError> {
    let category = CategoryService::create(&state.db().pool, payload).await?;
    Ok(ResponseJson(ApiResponse::success(category)))
}

/// PUT /api/admin/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
    AppJson(payload): AppJson<SaveCategory>,
) -> Result<ResponseJson<ApiResponse<Category>>, ApiError> {
    let category = CategoryService::update(&state.db().pool, category_id, payload).await?;
    Ok(ResponseJson(ApiResponse::success(category)))
}

/// DELETE /api/admin/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    CategoryService::delete(&state.db().pool, category_id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/admin/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/admin/categories/{id}",
            put(update_category).delete(delete_category),
        )
}
