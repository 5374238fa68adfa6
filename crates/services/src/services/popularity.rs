//! Click tracking for products and categories, and the dashboard ranking built from it.

use std::{collections::HashMap, str::FromStr};

use db::models::{
    popularity::{ItemType, PopularityEvent},
    product::Product,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, error};
use ts_rs::TS;

pub const DEFAULT_TOP_PRODUCTS: usize = 5;

#[derive(Debug, Error)]
pub enum PopularityError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Missing itemId or itemType")]
    MissingFields,
    #[error("unknown item type: {0}")]
    UnknownItemType(String),
}

/// Body of a click-tracking request. The storefront sends product ids as
/// numbers and category ids as strings, so both are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPopularityRequest {
    pub item_id: Option<Value>,
    pub item_type: Option<String>,
}

impl TrackPopularityRequest {
    fn validate(&self) -> Result<(String, ItemType), PopularityError> {
        let item_id = match &self.item_id {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(PopularityError::MissingFields),
        };
        let raw_type = self
            .item_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(PopularityError::MissingFields)?;
        let item_type = ItemType::from_str(raw_type)
            .map_err(|_| PopularityError::UnknownItemType(raw_type.to_string()))?;
        Ok((item_id, item_type))
    }
}

/// Click totals keyed by item id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClickCounts {
    pub products: HashMap<String, i64>,
    pub categories: HashMap<String, i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
pub struct PopularProduct {
    pub name: String,
    pub clicks: i64,
}

pub fn aggregate(events: &[PopularityEvent]) -> ClickCounts {
    let mut counts = ClickCounts::default();
    for event in events {
        let bucket = match event.item_type {
            ItemType::Product => &mut counts.products,
            ItemType::Category => &mut counts.categories,
        };
        *bucket.entry(event.item_id.clone()).or_insert(0) += 1;
    }
    counts
}

/// Highest counts first; equal counts are ordered by id so the ranking is stable.
pub fn top_items(counts: &HashMap<String, i64>, limit: usize) -> Vec<(String, i64)> {
    let mut ranked: Vec<(String, i64)> = counts.iter().map(|(id, n)| (id.clone(), *n)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

pub struct PopularityService;

impl PopularityService {
    pub async fn track(
        pool: &SqlitePool,
        request: &TrackPopularityRequest,
    ) -> Result<PopularityEvent, PopularityError> {
        let (item_id, item_type) = request.validate()?;
        let event = PopularityEvent::create(pool, &item_id, item_type)
            .await
            .map_err(|e| {
                error!(item_id = %item_id, item_type = %item_type, error = %e, "Error tracking popularity");
                e
            })?;
        debug!(item_id = %event.item_id, item_type = %event.item_type, "Popularity click recorded");
        Ok(event)
    }

    /// The `limit` most-clicked products that still exist in the catalog.
    pub async fn top_products(
        pool: &SqlitePool,
        limit: usize,
    ) -> Result<Vec<PopularProduct>, PopularityError> {
        let events = PopularityEvent::find_all(pool).await?;
        let ranked = top_items(&aggregate(&events).products, limit);
        if ranked.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = ranked.iter().filter_map(|(id, _)| id.parse().ok()).collect();
        let names: HashMap<String, String> = Product::find_names_by_ids(pool, &ids)
            .await?
            .into_iter()
            .map(|(id, name)| (id.to_string(), name))
            .collect();

        Ok(ranked
            .into_iter()
            .filter_map(|(id, clicks)| {
                names
                    .get(&id)
                    .map(|name| PopularProduct {
                        name: name.clone(),
                        clicks,
                    })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use db::{DBService, models::product::CreateProduct};
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    fn event(item_id: &str, item_type: ItemType) -> PopularityEvent {
        PopularityEvent {
            id: Uuid::new_v4(),
            item_id: item_id.to_string(),
            item_type,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_aggregate_counts_per_type() {
        let events = vec![
            event("1", ItemType::Product),
            event("1", ItemType::Product),
            event("2", ItemType::Product),
            event("1", ItemType::Category),
            event("sapphires", ItemType::Category),
        ];

        let counts = aggregate(&events);

        assert_eq!(counts.products.get("1"), Some(&2));
        assert_eq!(counts.products.get("2"), Some(&1));
        assert_eq!(counts.categories.get("1"), Some(&1));
        assert_eq!(counts.categories.get("sapphires"), Some(&1));
    }

    #[test]
    fn test_top_items_orders_by_clicks_then_id() {
        let counts = HashMap::from([
            ("a".to_string(), 3),
            ("c".to_string(), 5),
            ("b".to_string(), 3),
            ("d".to_string(), 1),
        ]);

        assert_eq!(
            top_items(&counts, 3),
            vec![
                ("c".to_string(), 5),
                ("a".to_string(), 3),
                ("b".to_string(), 3),
            ]
        );
        assert!(top_items(&HashMap::new(), 5).is_empty());
    }

    #[test]
    fn test_request_validation() {
        let numeric: TrackPopularityRequest =
            serde_json::from_value(json!({ "itemId": 42, "itemType": "product" })).unwrap();
        assert_eq!(
            numeric.validate().unwrap(),
            ("42".to_string(), ItemType::Product)
        );

        let missing: TrackPopularityRequest =
            serde_json::from_value(json!({ "itemType": "product" })).unwrap();
        assert!(matches!(
            missing.validate(),
            Err(PopularityError::MissingFields)
        ));

        let blank: TrackPopularityRequest =
            serde_json::from_value(json!({ "itemId": " ", "itemType": "category" })).unwrap();
        assert!(matches!(blank.validate(), Err(PopularityError::MissingFields)));

        let unknown: TrackPopularityRequest =
            serde_json::from_value(json!({ "itemId": "x", "itemType": "banner" })).unwrap();
        assert!(matches!(
            unknown.validate(),
            Err(PopularityError::UnknownItemType(t)) if t == "banner"
        ));
    }

    #[tokio::test]
    async fn test_top_products_maps_names_and_drops_deleted() {
        let db = DBService::new_in_memory().await.unwrap();
        let create = |name: &str| CreateProduct {
            category_id: None,
            name: name.to_string(),
            description: None,
            price: 1.0,
            images: vec![],
        };
        let sapphire = Product::create(&db.pool, &create("Blue Sapphire"))
            .await
            .unwrap();
        let ruby = Product::create(&db.pool, &create("Star Ruby")).await.unwrap();

        let clicks = [
            sapphire.id.to_string(),
            ruby.id.to_string(),
            ruby.id.to_string(),
            "9999".to_string(),
            "9999".to_string(),
            "9999".to_string(),
        ];
        for id in &clicks {
            let request = TrackPopularityRequest {
                item_id: Some(Value::String(id.clone())),
                item_type: Some("product".to_string()),
            };
            PopularityService::track(&db.pool, &request).await.unwrap();
        }

        let top = PopularityService::top_products(&db.pool, DEFAULT_TOP_PRODUCTS)
            .await
            .unwrap();

        assert_eq!(
            top,
            vec![
                PopularProduct {
                    name: "Star Ruby".to_string(),
                    clicks: 2
                },
                PopularProduct {
                    name: "Blue Sapphire".to_string(),
                    clicks: 1
                },
            ]
        );
    }
}
