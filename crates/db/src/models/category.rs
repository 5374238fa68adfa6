use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated category fields, slug already derived from the name
#[derive(Debug, Clone)]
pub struct CategoryFields {
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
}

impl Category {
    pub async fn create(pool: &SqlitePool, data: &CategoryFields) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            r#"INSERT INTO categories (name, slug, image_url)
            VALUES ($1, $2, $3)
            RETURNING id, name, slug, image_url, created_at"#,
        )
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.image_url)
        .fetch_one(pool)
        .await
    }

    /// Update name and slug; the image is only replaced when a new one is supplied.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        data: &CategoryFields,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            r#"UPDATE categories
            SET name = $2,
                slug = $3,
                image_url = COALESCE($4, image_url)
            WHERE id = $1
            RETURNING id, name, slug, image_url, created_at"#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.image_url)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            r#"SELECT id, name, slug, image_url, created_at
            FROM categories
            ORDER BY created_at DESC, id DESC"#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_all_slugs(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT slug FROM categories ORDER BY id ASC")
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
