use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

/// Fulfilment state of an order. Any state may be set from any other.
#[derive(
    Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    HandedOver,
    Delivered,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateOrder {
    pub customer_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub total: f64,
}

impl Order {
    pub async fn create(pool: &SqlitePool, data: &CreateOrder) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"INSERT INTO orders (customer_name, email, phone, total)
            VALUES ($1, $2, $3, $4)
            RETURNING id, customer_name, email, phone, total, status, created_at"#,
        )
        .bind(&data.customer_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(data.total)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"SELECT id, customer_name, email, phone, total, status, created_at
            FROM orders
            WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// All orders, newest first
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"SELECT id, customer_name, email, phone, total, status, created_at
            FROM orders
            ORDER BY created_at DESC, id DESC"#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn update_status(
        pool: &SqlitePool,
        id: i64,
        status: OrderStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"UPDATE orders
            SET status = $2
            WHERE id = $1
            RETURNING id, customer_name, email, phone, total, status, created_at"#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
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

    #[tokio::test]
    async fn test_status_defaults_to_pending_and_updates() {
        let db = DBService::new_in_memory().await.unwrap();
        let order = Order::create(
            &db.pool,
            &CreateOrder {
                customer_name: "Nimali Perera".to_string(),
                email: None,
                phone: Some("94771234567".to_string()),
                total: 12500.0,
            },
        )
        .await
        .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);

        // No transition rules: jump straight to delivered, then back.
        let delivered = Order::update_status(&db.pool, order.id, OrderStatus::Delivered)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(delivered.status, OrderStatus::Delivered);
        let handed = Order::update_status(&db.pool, order.id, OrderStatus::HandedOver)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(handed.status, OrderStatus::HandedOver);

        assert!(
            Order::update_status(&db.pool, 404, OrderStatus::Processing)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(OrderStatus::HandedOver.to_string(), "handed_over");
        assert_eq!(
            serde_json::to_value(OrderStatus::Processing).unwrap(),
            serde_json::json!("processing")
        );
    }
}
