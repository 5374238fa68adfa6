//! sitemaps.org document listing every public storefront URL.

use chrono::{DateTime, SecondsFormat, Utc};
use db::models::{category::Category, product::Product};
use serde::Serialize;
use sqlx::SqlitePool;
use strum_macros::Display;
use thiserror::Error;
use tracing::warn;
use ts_rs::TS;

const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("failed to render sitemap xml: {0}")]
    Xml(String),
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

#[derive(Debug, Clone, Serialize, PartialEq, TS)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Static pages first, then one entry per product and per category filter.
pub fn build_sitemap(
    base_url: &str,
    product_ids: &[i64],
    category_slugs: &[String],
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let base = base_url.trim_end_matches('/');
    let entry = |url: String, change_frequency, priority| SitemapEntry {
        url,
        last_modified: now,
        change_frequency,
        priority,
    };

    let mut entries = vec![
        entry(base.to_string(), ChangeFrequency::Weekly, 1.0),
        entry(format!("{base}/collections"), ChangeFrequency::Weekly, 0.8),
        entry(format!("{base}/about"), ChangeFrequency::Monthly, 0.5),
        entry(format!("{base}/contact"), ChangeFrequency::Yearly, 0.5),
    ];

    entries.extend(
        product_ids
            .iter()
            .map(|id| entry(format!("{base}/product/{id}"), ChangeFrequency::Weekly, 0.7)),
    );
    entries.extend(category_slugs.iter().map(|slug| {
        entry(
            format!("{base}/collections?category={slug}"),
            ChangeFrequency::Weekly,
            0.6,
        )
    }));

    entries
}

#[derive(Serialize)]
#[serde(rename = "urlset")]
struct UrlSet {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "url")]
    urls: Vec<UrlElement>,
}

#[derive(Serialize)]
struct UrlElement {
    loc: String,
    lastmod: String,
    changefreq: String,
    priority: String,
}

pub fn render_xml(entries: &[SitemapEntry]) -> Result<String, SitemapError> {
    let urlset = UrlSet {
        xmlns: SITEMAP_NAMESPACE,
        urls: entries
            .iter()
            .map(|e| UrlElement {
                loc: e.url.clone(),
                lastmod: e.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true),
                changefreq: e.change_frequency.to_string(),
                priority: format!("{:.1}", e.priority),
            })
            .collect(),
    };

    let body = quick_xml::se::to_string(&urlset).map_err(|e| SitemapError::Xml(e.to_string()))?;
    Ok(format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}",
        body
    ))
}

pub struct SitemapService;

impl SitemapService {
    /// Enumerate products and categories from the database. A failed listing
    /// drops that section rather than failing the whole document.
    pub async fn generate(pool: &SqlitePool, base_url: &str) -> Vec<SitemapEntry> {
        let product_ids = Product::find_all_ids(pool).await.unwrap_or_else(|e| {
            warn!(error = %e, "Sitemap: failed to list products");
            Vec::new()
        });
        let category_slugs = Category::find_all_slugs(pool).await.unwrap_or_else(|e| {
            warn!(error = %e, "Sitemap: failed to list categories");
            Vec::new()
        });

        build_sitemap(base_url, &product_ids, &category_slugs, Utc::now())
    }
}
