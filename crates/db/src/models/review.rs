use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

/// Reviews stay hidden from the storefront until approved.
#[derive(
    Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "review_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Review {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub rating: i64, // 1..=5
    pub comment: String,
    pub image_url: Option<String>,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateReview {
    pub name: String,
    pub email: String,
    pub rating: i64,
    pub comment: String,
    pub image_url: Option<String>,
}

impl Review {
    pub async fn create(pool: &SqlitePool, data: &CreateReview) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"INSERT INTO reviews (name, email, rating, comment, image_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, rating, comment, image_url, status, created_at"#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.rating)
        .bind(&data.comment)
        .bind(&data.image_url)
        .fetch_one(pool)
        .await
    }

    /// All reviews, newest first
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"SELECT id, name, email, rating, comment, image_url, status, created_at
            FROM reviews
            ORDER BY created_at DESC, id DESC"#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_status(
        pool: &SqlitePool,
        status: ReviewStatus,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"SELECT id, name, email, rating, comment, image_url, status, created_at
            FROM reviews
            WHERE status = $1
            ORDER BY created_at DESC, id DESC"#,
        )
        .bind(status)
        .fetch_all(pool)
        .await
    }

    pub async fn update_status(
        pool: &SqlitePool,
        id: i64,
        status: ReviewStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"UPDATE reviews
            SET status = $2
            WHERE id = $1
            RETURNING id, name, email, rating, comment, image_url, status, created_at"#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DBService;

    fn review(name: &str) -> CreateReview {
        CreateReview {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            rating: 5,
            comment: "Stunning stone".to_string(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_new_reviews_are_pending_until_approved() {
        let db = DBService::new_in_memory().await.unwrap();
        let first = Review::create(&db.pool, &review("Kasun")).await.unwrap();
        Review::create(&db.pool, &review("Dilini")).await.unwrap();
        assert_eq!(first.status, ReviewStatus::Pending);

        Review::update_status(&db.pool, first.id, ReviewStatus::Approved)
            .await
            .unwrap()
            .unwrap();

        let approved = Review::find_by_status(&db.pool, ReviewStatus::Approved)
            .await
            .unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].name, "Kasun");
        assert_eq!(Review::find_all(&db.pool).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_rating_outside_range_is_rejected_by_store() {
        let db = DBService::new_in_memory().await.unwrap();
        let mut bad = review("Kasun");
        bad.rating = 6;
        assert!(Review::create(&db.pool, &bad).await.is_err());
    }
}
