//! Order administration: listing, status changes and customer status updates.

use db::models::order::{Order, OrderStatus};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;
use ts_rs::TS;
use url::{Url, form_urlencoded};
use utils::text::{capitalize, format_amount};

const WHATSAPP_BASE_URL: &str = "https://wa.me/";
const SHORT_ID_LEN: usize = 8;

#[derive(Debug, Error)]
pub enum OrderServiceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("order {0} not found")]
    NotFound(i64),
    #[error("invalid whatsapp link: {0}")]
    InvalidLink(#[from] url::ParseError),
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct WhatsAppLink {
    pub message: String,
    pub url: String,
}

/// Human label shown to staff and customers
pub fn status_label(status: OrderStatus) -> String {
    match status {
        OrderStatus::HandedOver => "Handed to Delivery".to_string(),
        other => capitalize(&other.to_string()),
    }
}

/// Case-insensitive match on customer name, order id or email. A blank term matches everything.
pub fn matches_search(order: &Order, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    order.customer_name.to_lowercase().contains(&term)
        || order.id.to_string().contains(&term)
        || order
            .email
            .as_deref()
            .is_some_and(|email| email.to_lowercase().contains(&term))
}

pub fn status_update_message(order: &Order, brand: &str) -> String {
    let short_id: String = order.id.to_string().chars().take(SHORT_ID_LEN).collect();
    format!(
        "*Order Update: #{short_id}*\n\nHello {},\n\nYour order status is currently: *{}*.\nTotal: Rs. {}\n\nThank you for shopping with {brand}!",
        order.customer_name,
        status_label(order.status),
        format_amount(order.total),
    )
}

pub fn whatsapp_link(order: &Order, brand: &str) -> Result<WhatsAppLink, OrderServiceError> {
    let message = status_update_message(order, brand);
    let phone: String = order
        .phone
        .as_deref()
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    let mut url = Url::parse(WHATSAPP_BASE_URL)?.join(&phone)?;
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("text", &message)
        .finish();
    url.set_query(Some(&query));

    Ok(WhatsAppLink {
        message,
        url: url.to_string(),
    })
}

pub struct OrderService;

impl OrderService {
    pub async fn list(pool: &SqlitePool, search: Option<&str>) -> Result<Vec<Order>, OrderServiceError> {
        let orders = Order::find_all(pool).await?;
        Ok(match search {
            Some(term) => orders
                .into_iter()
                .filter(|order| matches_search(order, term))
                .collect(),
            None => orders,
        })
    }

    pub async fn update_status(
        pool: &SqlitePool,
        id: i64,
        status: OrderStatus,
    ) -> Result<Order, OrderServiceError> {
        let order = Order::update_status(pool, id, status)
            .await?
            .ok_or(OrderServiceError::NotFound(id))?;
        info!(order_id = id, status = %status, "Order status updated");
        Ok(order)
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), OrderServiceError> {
        if Order::delete(pool, id).await? == 0 {
            return Err(OrderServiceError::NotFound(id));
        }
        info!(order_id = id, "Order deleted");
        Ok(())
    }

    pub async fn whatsapp_link(
        pool: &SqlitePool,
        id: i64,
        brand: &str,
    ) -> Result<WhatsAppLink, OrderServiceError> {
        let order = Order::find_by_id(pool, id)
            .await?
            .ok_or(OrderServiceError::NotFound(id))?;
        whatsapp_link(&order, brand)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use db::{DBService, models::order::CreateOrder};

    use super::*;

    fn order(id: i64, status: OrderStatus) -> Order {
        Order {
            id,
            customer_name: "Nimali Perera".to_string(),
            email: Some("Nimali@Example.com".to_string()),
            phone: Some("+94 77 123 4567".to_string()),
            total: 125000.0,
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(status_label(OrderStatus::Pending), "Pending");
        assert_eq!(status_label(OrderStatus::Processing), "Processing");
        assert_eq!(status_label(OrderStatus::HandedOver), "Handed to Delivery");
        assert_eq!(status_label(OrderStatus::Delivered), "Delivered");
    }

    #[test]
    fn test_search_matches_name_id_and_email() {
        let order = order(1207, OrderStatus::Pending);
        assert!(matches_search(&order, "nimali"));
        assert!(matches_search(&order, "120"));
        assert!(matches_search(&order, "example.COM"));
        assert!(matches_search(&order, "  "));
        assert!(!matches_search(&order, "kamal"));
    }

    #[test]
    fn test_status_update_message() {
        let message = status_update_message(&order(123456789, OrderStatus::HandedOver), "Serendia Gems");
        assert_eq!(
            message,
            "*Order Update: #12345678*\n\nHello Nimali Perera,\n\nYour order status is currently: *Handed to Delivery*.\nTotal: Rs. 125,000\n\nThank you for shopping with Serendia Gems!"
        );
    }

    #[test]
    fn test_whatsapp_link_encodes_message() {
        let link = whatsapp_link(&order(7, OrderStatus::Delivered), "Serendia Gems").unwrap();
        assert!(link.url.starts_with("https://wa.me/94771234567?text="));
        assert!(link.url.contains("Order+Update%3A+%237"));
        assert!(!link.url.contains(' '));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_order() {
        let db = DBService::new_in_memory().await.unwrap();
        let created = Order::create(
            &db.pool,
            &CreateOrder {
                customer_name: "Kamal Silva".to_string(),
                email: None,
                phone: None,
                total: 9800.0,
            },
        )
        .await
        .unwrap();

        let updated = OrderService::update_status(&db.pool, created.id, OrderStatus::Processing)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Processing);

        assert!(matches!(
            OrderService::update_status(&db.pool, 404, OrderStatus::Delivered).await,
            Err(OrderServiceError::NotFound(404))
        ));

        OrderService::delete(&db.pool, created.id).await.unwrap();
        assert!(matches!(
            OrderService::delete(&db.pool, created.id).await,
            Err(OrderServiceError::NotFound(_))
        ));
        assert!(OrderService::list(&db.pool, None).await.unwrap().is_empty());
    }
}
