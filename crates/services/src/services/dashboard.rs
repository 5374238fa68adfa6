//! Summary numbers for the admin landing page.

use db::models::{category::Category, order::Order, product::Product};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use ts_rs::TS;

use super::popularity::{DEFAULT_TOP_PRODUCTS, PopularProduct, PopularityError, PopularityService};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Popularity(#[from] PopularityError),
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct DashboardStats {
    pub total_orders: i64,
    pub total_products: i64,
    pub total_categories: i64,
    pub popular_products: Vec<PopularProduct>,
}

pub struct DashboardService;

impl DashboardService {
    pub async fn stats(pool: &SqlitePool) -> Result<DashboardStats, DashboardError> {
        Ok(DashboardStats {
            total_orders: Order::count(pool).await?,
            total_products: Product::count(pool).await?,
            total_categories: Category::count(pool).await?,
            popular_products: PopularityService::top_products(pool, DEFAULT_TOP_PRODUCTS).await?,
        })
    }
}
