//! Category administration. Images are uploaded by the client to the image
//! host beforehand; only the resulting URL arrives here.

use db::models::category::{Category, CategoryFields};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;
use ts_rs::TS;
use utils::text::{non_blank, slugify};

#[derive(Debug, Error)]
pub enum CategoryServiceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Validation(String),
    #[error("category {0} not found")]
    NotFound(i64),
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct SaveCategory {
    pub name: String,
    pub image_url: Option<String>,
}

impl SaveCategory {
    fn into_fields(self, require_image: bool) -> Result<CategoryFields, CategoryServiceError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(CategoryServiceError::Validation(
                "Category name is required".to_string(),
            ));
        }
        let image_url = non_blank(self.image_url);
        if require_image && image_url.is_none() {
            return Err(CategoryServiceError::Validation(
                "Category image is required for new categories".to_string(),
            ));
        }
        let slug = slugify(&name);
        if slug.is_empty() {
            return Err(CategoryServiceError::Validation(format!(
                "Category name '{name}' has no characters usable in a URL"
            )));
        }
        Ok(CategoryFields {
            name,
            slug,
            image_url,
        })
    }
}

/// A duplicate slug is an admin-fixable conflict, not a storage failure.
fn map_slug_conflict(err: sqlx::Error) -> CategoryServiceError {
    let duplicate = err
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());
    if duplicate {
        CategoryServiceError::Validation("A category with this name already exists".to_string())
    } else {
        CategoryServiceError::Database(err)
    }
}

pub struct CategoryService;

impl CategoryService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Category>, CategoryServiceError> {
        Ok(Category::find_all(pool).await?)
    }

    pub async fn create(
        pool: &SqlitePool,
        data: SaveCategory,
    ) -> Result<Category, CategoryServiceError> {
        let fields = data.into_fields(true)?;
        let category = Category::create(pool, &fields)
            .await
            .map_err(map_slug_conflict)?;
        info!(category_id = category.id, slug = %category.slug, "Category created");
        Ok(category)
    }

    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        data: SaveCategory,
    ) -> Result<Category, CategoryServiceError> {
        let fields = data.into_fields(false)?;
        Category::update(pool, id, &fields)
            .await
            .map_err(map_slug_conflict)?
            .ok_or(CategoryServiceError::NotFound(id))
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), CategoryServiceError> {
        if Category::delete(pool, id).await? == 0 {
            return Err(CategoryServiceError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use db::DBService;

    use super::*;

    #[tokio::test]
    async fn test_create_derives_slug_and_requires_image() {
        let db = DBService::new_in_memory().await.unwrap();

        let err = CategoryService::create(
            &db.pool,
            SaveCategory {
                name: "Yellow Sapphires".to_string(),
                image_url: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CategoryServiceError::Validation(_)));

        let created = CategoryService::create(
            &db.pool,
            SaveCategory {
                name: "  Yellow Sapphires ".to_string(),
                image_url: Some("https://cdn/yellow.jpg".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(created.name, "Yellow Sapphires");
        assert_eq!(created.slug, "yellow-sapphires");
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_a_validation_error() {
        let db = DBService::new_in_memory().await.unwrap();
        let save = |name: &str| SaveCategory {
            name: name.to_string(),
            image_url: Some("https://cdn/stone.jpg".to_string()),
        };

        CategoryService::create(&db.pool, save("Blue Sapphires"))
            .await
            .unwrap();
        let rubies = CategoryService::create(&db.pool, save("Rubies"))
            .await
            .unwrap();

        let err = CategoryService::create(&db.pool, save("blue sapphires"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "A category with this name already exists");

        let err = CategoryService::update(&db.pool, rubies.id, save("Blue Sapphires"))
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_blank_name_and_missing_category() {
        let db = DBService::new_in_memory().await.unwrap();

        let err = CategoryService::update(
            &db.pool,
            1,
            SaveCategory {
                name: " ".to_string(),
                image_url: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Category name is required");

        let err = CategoryService::update(
            &db.pool,
            77,
            SaveCategory {
                name: "Spinel".to_string(),
                image_url: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CategoryServiceError::NotFound(77)));
    }
}
