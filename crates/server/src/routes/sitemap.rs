use axum::{
    Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use services::services::sitemap::{SitemapService, render_xml};

use crate::{AppState, error::ApiError};

/// GET /sitemap.xml
pub async fn get_sitemap(State(state): State<AppState>) -> Result<Response, ApiError> {
    let entries = SitemapService::generate(&state.db().pool, &state.config().site_url).await;
    let xml = render_xml(&entries)?;
    Ok(([(header::CONTENT_TYPE, "application/xml")], xml).into_response())
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().route("/sitemap.xml", get(get_sitemap))
}
