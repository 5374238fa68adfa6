use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` whose rejections are reported through [`ApiError`], so a
/// malformed body still gets the `ApiResponse` error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
