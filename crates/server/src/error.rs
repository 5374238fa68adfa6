use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use services::services::{
    categories::CategoryServiceError, dashboard::DashboardError, orders::OrderServiceError,
    popularity::PopularityError, reviews::ReviewServiceError, seo_admin::SeoAdminError,
    sitemap::SitemapError,
};
use thiserror::Error;
use utils::response::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{}", .0.body_text())]
    Json(#[from] JsonRejection),
    #[error(transparent)]
    SeoAdmin(#[from] SeoAdminError),
    #[error(transparent)]
    Popularity(#[from] PopularityError),
    #[error(transparent)]
    Orders(#[from] OrderServiceError),
    #[error(transparent)]
    Categories(#[from] CategoryServiceError),
    #[error(transparent)]
    Reviews(#[from] ReviewServiceError),
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
    #[error(transparent)]
    Sitemap(#[from] SitemapError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Json(rejection) => rejection.status(),
            ApiError::SeoAdmin(SeoAdminError::Validation(_))
            | ApiError::Categories(CategoryServiceError::Validation(_))
            | ApiError::Reviews(ReviewServiceError::Validation(_))
            | ApiError::Popularity(
                PopularityError::MissingFields | PopularityError::UnknownItemType(_),
            ) => StatusCode::BAD_REQUEST,
            ApiError::SeoAdmin(SeoAdminError::NotFound(_))
            | ApiError::Orders(OrderServiceError::NotFound(_))
            | ApiError::Categories(CategoryServiceError::NotFound(_))
            | ApiError::Reviews(ReviewServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        (status, ResponseJson(ApiResponse::<()>::error(message))).into_response()
    }
}
