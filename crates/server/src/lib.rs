use std::sync::Arc;

use axum::Router;
use db::DBService;
use services::services::{config::SiteConfig, seo::MetadataResolver};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod error;
pub mod extract;
pub mod routes;

/// Shared state handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    db: DBService,
    resolver: MetadataResolver,
    config: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(db: DBService, config: SiteConfig) -> Self {
        let mut resolver =
            MetadataResolver::new(Arc::new(db.clone()), config.seo_defaults.clone());
        if let Some(timeout) = config.seo_lookup_timeout {
            resolver = resolver.with_lookup_timeout(timeout);
        }

        Self {
            db,
            resolver,
            config: Arc::new(config),
        }
    }

    pub fn db(&self) -> &DBService {
        &self.db
    }

    pub fn resolver(&self) -> &MetadataResolver {
        &self.resolver
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }
}

pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::metadata::router(&state))
        .merge(routes::seo_admin::router(&state))
        .merge(routes::popularity::router(&state))
        .merge(routes::orders::router(&state))
        .merge(routes::categories::router(&state))
        .merge(routes::reviews::router(&state))
        .merge(routes::dashboard::router(&state));

    Router::new()
        .nest("/api", api)
        .merge(routes::sitemap::router(&state))
        .merge(routes::health::router(&state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
