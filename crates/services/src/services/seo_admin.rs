//! Admin management of per-path metadata overrides.

use db::models::seo_metadata::{MetadataOverride, UpsertMetadataOverride};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SeoAdminError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Validation(String),
    #[error("no SEO entry for path {0}")]
    NotFound(String),
}

pub struct SeoAdminService;

impl SeoAdminService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<MetadataOverride>, SeoAdminError> {
        Ok(MetadataOverride::find_all(pool).await?)
    }

    pub async fn upsert(
        pool: &SqlitePool,
        mut data: UpsertMetadataOverride,
    ) -> Result<MetadataOverride, SeoAdminError> {
        data.path = data.path.trim().to_string();
        data.title = data.title.trim().to_string();

        if !data.path.starts_with('/') {
            return Err(SeoAdminError::Validation(
                "Path must start with '/'".to_string(),
            ));
        }
        if data.title.is_empty() {
            return Err(SeoAdminError::Validation("Title is required".to_string()));
        }

        let saved = MetadataOverride::upsert(pool, &data).await?;
        info!(path = %saved.path, "SEO metadata saved");
        Ok(saved)
    }

    pub async fn delete(pool: &SqlitePool, path: &str) -> Result<(), SeoAdminError> {
        if MetadataOverride::delete(pool, path).await? == 0 {
            return Err(SeoAdminError::NotFound(path.to_string()));
        }
        info!(path = %path, "SEO metadata deleted");
        Ok(())
    }
}
