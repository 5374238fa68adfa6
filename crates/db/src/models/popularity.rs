use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

/// Kind of storefront item a click was recorded against
#[derive(Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, Hash, TS, EnumString, Display)]
#[sqlx(type_name = "item_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemType {
    Product,
    Category,
}

/// A single recorded click
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct PopularityEvent {
    pub id: Uuid,
    pub item_id: String,
    pub item_type: ItemType,
    pub created_at: DateTime<Utc>,
}

impl PopularityEvent {
    pub async fn create(
        pool: &SqlitePool,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, PopularityEvent>(
            r#"INSERT INTO popularity (id, item_id, item_type)
            VALUES ($1, $2, $3)
            RETURNING id, item_id, item_type, created_at"#,
        )
        .bind(id)
        .bind(item_id)
        .bind(item_type)
        .fetch_one(pool)
        .await
    }

    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, PopularityEvent>(
            r#"SELECT id, item_id, item_type, created_at
            FROM popularity
            ORDER BY created_at ASC"#,
        )
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::DBService;

    #[test]
    fn test_item_type_string_forms() {
        assert_eq!(ItemType::from_str("product").unwrap(), ItemType::Product);
        assert_eq!(ItemType::Category.to_string(), "category");
        assert!(ItemType::from_str("collection").is_err());
    }

    #[tokio::test]
    async fn test_create_round_trips_item_type() {
        let db = DBService::new_in_memory().await.unwrap();
        PopularityEvent::create(&db.pool, "42", ItemType::Product)
            .await
            .unwrap();
        PopularityEvent::create(&db.pool, "sapphires", ItemType::Category)
            .await
            .unwrap();

        let events = PopularityEvent::find_all(&db.pool).await.unwrap();
        assert_eq!(events.len(), 2);
        assert!(
            events
                .iter()
                .any(|e| e.item_id == "sapphires" && e.item_type == ItemType::Category)
        );
    }
}
