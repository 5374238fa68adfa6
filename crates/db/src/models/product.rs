use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use ts_rs::TS;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Product {
    pub id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub images: String, // JSON-serialized Vec<String>, ordered
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Read-only projection used when deriving page metadata
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
pub struct ProductSummary {
    pub name: String,
    pub description: Option<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateProduct {
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Parse the stored image list. Malformed JSON reads as no images.
    pub fn parsed_images(&self) -> Vec<String> {
        serde_json::from_str(&self.images).unwrap_or_default()
    }
}

impl From<Product> for ProductSummary {
    fn from(product: Product) -> Self {
        let images = product.parsed_images();
        Self {
            name: product.name,
            description: product.description,
            images,
        }
    }
}

impl Product {
    pub async fn create(pool: &SqlitePool, data: &CreateProduct) -> Result<Self, sqlx::Error> {
        let images = serde_json::to_string(&data.images)
            .map_err(|e| sqlx::Error::Protocol(e.to_string()))?;
        sqlx::query_as::<_, Product>(
            r#"INSERT INTO products (category_id, name, description, price, images)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, category_id, name, description, price, images, created_at, updated_at"#,
        )
        .bind(data.category_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(images)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            r#"SELECT id, category_id, name, description, price, images, created_at, updated_at
            FROM products
            WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_all_ids(pool: &SqlitePool) -> Result<Vec<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM products ORDER BY id ASC")
            .fetch_all(pool)
            .await
    }

    /// Names for the given ids, as `(id, name)` pairs. Unknown ids are simply absent.
    pub async fn find_names_by_ids(
        pool: &SqlitePool,
        ids: &[i64],
    ) -> Result<Vec<(i64, String)>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id, name FROM products WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        query.build_query_as::<(i64, String)>().fetch_all(pool).await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await
    }
}
