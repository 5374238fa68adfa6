//! Page metadata lookups used by the storefront at render time.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use serde::Deserialize;
use services::services::page_head::PageHead;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct MetadataQuery {
    pub path: Option<String>,
}

/// GET /api/metadata?path=/contact
pub async fn get_page_metadata(
    State(state): State<AppState>,
    Query(query): Query<MetadataQuery>,
) -> Result<ResponseJson<ApiResponse<PageHead>>, ApiError> {
    let path = query
        .path
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("path is required".to_string()))?;

    let resolved = state.resolver().resolve(&path, None).await;
    Ok(ResponseJson(ApiResponse::success(resolved.into())))
}

/// GET /api/metadata/product/{id}
pub async fn get_product_metadata(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> ResponseJson<ApiResponse<PageHead>> {
    let resolved = state
        .resolver()
        .resolve_product_page(state.db(), &product_id)
        .await;
    ResponseJson(ApiResponse::success(resolved.into()))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/metadata", get(get_page_metadata))
        .route("/metadata/product/{id}", get(get_product_metadata))
}
