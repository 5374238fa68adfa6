use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use services::services::dashboard::{DashboardService, DashboardStats};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

/// GET /api/admin/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<DashboardStats>>, ApiError> {
    let stats = DashboardService::stats(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(stats)))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().route("/admin/dashboard", get(get_dashboard))
}
