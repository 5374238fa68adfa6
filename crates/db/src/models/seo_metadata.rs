use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use utils::text::non_blank;

/// Admin-configured metadata for a single page path
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS, PartialEq)]
pub struct MetadataOverride {
    pub path: String, // exact-match key, no wildcard matching
    pub title: String,
    pub description: Option<String>,
    pub og_image: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing an override
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpsertMetadataOverride {
    pub path: String,
    pub title: String,
    pub description: Option<String>,
    pub og_image: Option<String>,
}

impl MetadataOverride {
    pub async fn find_by_path(pool: &SqlitePool, path: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, MetadataOverride>(
            r#"SELECT path, title, description, og_image, updated_at
            FROM seo_metadata
            WHERE path = $1"#,
        )
        .bind(path)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, MetadataOverride>(
            r#"SELECT path, title, description, og_image, updated_at
            FROM seo_metadata
            ORDER BY path ASC"#,
        )
        .fetch_all(pool)
        .await
    }

    /// Insert or replace the override for `data.path`. Blank optional fields are stored as NULL.
    pub async fn upsert(
        pool: &SqlitePool,
        data: &UpsertMetadataOverride,
    ) -> Result<Self, sqlx::Error> {
        let description = non_blank(data.description.clone());
        let og_image = non_blank(data.og_image.clone());

        sqlx::query_as::<_, MetadataOverride>(
            r#"INSERT INTO seo_metadata (path, title, description, og_image)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT(path) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                og_image = excluded.og_image,
                updated_at = datetime('now', 'subsec')
            RETURNING path, title, description, og_image, updated_at"#,
        )
        .bind(&data.path)
        .bind(&data.title)
        .bind(description)
        .bind(og_image)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, path: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM seo_metadata WHERE path = $1")
            .bind(path)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
