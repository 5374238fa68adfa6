//! Routes for order administration.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::{delete, get, patch},
};
use db::models::order::Order;
use serde::Deserialize;
use services::services::orders::{OrderService, UpdateOrderStatus, WhatsAppLink};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, extract::AppJson};

#[derive(Debug, Deserialize)]
pub struct OrderSearch {
    pub search: Option<String>,
}

/// GET /api/admin/orders?search=
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderSearch>,
) -> Result<ResponseJson<ApiResponse<Vec<Order>>>, ApiError> {
    let orders = OrderService::list(&state.db().pool, query.search.as_deref()).await?;
    Ok(ResponseJson(ApiResponse::success(orders)))
}

/// PATCH /api/admin/orders/{id}/status
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    AppJson(payload): AppJson<UpdateOrderStatus>,
) -> Result<ResponseJson<ApiResponse<Order>>, ApiError> {
    let order = OrderService::update_status(&state.db().pool, order_id, payload.status).await?;
    Ok(ResponseJson(ApiResponse::success(order)))
}

/// DELETE /api/admin/orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    OrderService::delete(&state.db().pool, order_id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

/// GET /api/admin/orders/{id}/whatsapp
/// Pre-filled WhatsApp status message for the customer
pub async fn get_whatsapp_link(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> Result<ResponseJson<ApiResponse<WhatsAppLink>>, ApiError> {
    let brand = &state.config().seo_defaults.brand;
    let link = OrderService::whatsapp_link(&state.db().pool, order_id, brand).await?;
    Ok(ResponseJson(ApiResponse::success(link)))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/orders", get(list_orders))
        .route("/admin/orders/{id}", delete(delete_order))
        .route("/admin/orders/{id}/status", patch(update_order_status))
        .route("/admin/orders/{id}/whatsapp", get(get_whatsapp_link))
}
