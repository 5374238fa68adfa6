//! Customer reviews: public submission and admin moderation.

use db::models::review::{CreateReview, Review, ReviewStatus};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;
use ts_rs::TS;
use utils::text::non_blank;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

#[derive(Debug, Error)]
pub enum ReviewServiceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Validation(String),
    #[error("review {0} not found")]
    NotFound(i64),
}

/// Body of the public review form. The optional photo is uploaded to the
/// image host by the client; only its URL arrives here.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct SubmitReview {
    pub name: String,
    pub email: String,
    #[serde(default = "default_rating")]
    pub rating: i64,
    pub comment: String,
    pub image_url: Option<String>,
}

fn default_rating() -> i64 {
    MAX_RATING
}

impl SubmitReview {
    fn validate(self) -> Result<CreateReview, ReviewServiceError> {
        let required = |value: String, field: &str| {
            let value = value.trim().to_string();
            if value.is_empty() {
                Err(ReviewServiceError::Validation(format!("{field} is required")))
            } else {
                Ok(value)
            }
        };

        let name = required(self.name, "Name")?;
        let email = required(self.email, "Email")?;
        let comment = required(self.comment, "Feedback")?;
        if !email.contains('@') {
            return Err(ReviewServiceError::Validation(
                "Email address is invalid".to_string(),
            ));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ReviewServiceError::Validation(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }

        Ok(CreateReview {
            name,
            email,
            rating: self.rating,
            comment,
            image_url: non_blank(self.image_url),
        })
    }
}

pub struct ReviewService;

impl ReviewService {
    /// New reviews always start pending.
    pub async fn submit(pool: &SqlitePool, data: SubmitReview) -> Result<Review, ReviewServiceError> {
        let review = Review::create(pool, &data.validate()?).await?;
        info!(review_id = review.id, rating = review.rating, "Review submitted");
        Ok(review)
    }

    pub async fn list(
        pool: &SqlitePool,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<Review>, ReviewServiceError> {
        Ok(match status {
            Some(status) => Review::find_by_status(pool, status).await?,
            None => Review::find_all(pool).await?,
        })
    }

    /// Reviews visible on the storefront
    pub async fn published(pool: &SqlitePool) -> Result<Vec<Review>, ReviewServiceError> {
        Self::list(pool, Some(ReviewStatus::Approved)).await
    }

    pub async fn approve(pool: &SqlitePool, id: i64) -> Result<Review, ReviewServiceError> {
        let review = Review::update_status(pool, id, ReviewStatus::Approved)
            .await?
            .ok_or(ReviewServiceError::NotFound(id))?;
        info!(review_id = id, "Review approved");
        Ok(review)
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), ReviewServiceError> {
        if Review::delete(pool, id).await? == 0 {
            return Err(ReviewServiceError::NotFound(id));
        }
        info!(review_id = id, "Review deleted");
        Ok(())
    }
}
