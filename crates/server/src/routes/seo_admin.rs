use axum::{
    Router,
    extract::{Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::seo_metadata::{MetadataOverride, UpsertMetadataOverride};
use serde::Deserialize;
use services::services::seo_admin::SeoAdminService;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, extract::AppJson};

#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub path: String,
}

/// GET /api/admin/seo
pub async fn list_overrides(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<MetadataOverride>>>, ApiError> {
    let overrides = SeoAdminService::list(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(overrides)))
}

/// PUT /api/admin/seo
/// Create or replace the override for a path
pub async fn upsert_override(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpsertMetadataOverride>,
) -> Result<ResponseJson<ApiResponse<MetadataOverride>>, ApiError> {
    let saved = SeoAdminService::upsert(&state.db().pool, payload).await?;
    Ok(ResponseJson(ApiResponse::success(saved)))
}

/// DELETE /api/admin/seo?path=/contact
pub async fn delete_override(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    SeoAdminService::delete(&state.db().pool, query.path.trim()).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().route(
        "/admin/seo",
        get(list_overrides)
            .put(upsert_override)
            .delete(delete_override),
    )
}
