//! SEO metadata resolution for storefront pages.
//!
//! Every server-rendered page asks [`MetadataResolver::resolve`] for its
//! title, description and social preview image. Resolution falls through
//! three tiers: an admin override stored against the exact page path, then
//! (product pages only) fields derived from the catalog product, then the
//! brand-wide [`StaticDefaults`]. Lookup failures never reach the caller; they
//! are logged and treated as "nothing found".

use std::{future::Future, sync::Arc, time::Duration};

use async_trait::async_trait;
use db::{
    DBService,
    models::{
        product::{Product, ProductSummary},
        seo_metadata::MetadataOverride,
    },
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;
use utils::text::{non_blank, truncate_chars};

/// Maximum length, in characters, of a description derived from a product.
pub const PRODUCT_DESCRIPTION_MAX_CHARS: usize = 160;

/// Outcome of a collaborator lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    /// The store could not answer (transport, storage or timeout).
    Unavailable(String),
}

impl<T, E: std::fmt::Display> From<Result<Option<T>, E>> for Lookup<T> {
    fn from(result: Result<Option<T>, E>) -> Self {
        match result {
            Ok(Some(value)) => Lookup::Found(value),
            Ok(None) => Lookup::NotFound,
            Err(e) => Lookup::Unavailable(e.to_string()),
        }
    }
}

/// Exact-match lookup of admin overrides by page path
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn find_override_by_path(&self, path: &str) -> Lookup<MetadataOverride>;
}

/// Read-only access to catalog products. Ids are opaque to the resolver.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn find_product_by_id(&self, id: &str) -> Lookup<ProductSummary>;
}

#[async_trait]
impl MetadataStore for DBService {
    async fn find_override_by_path(&self, path: &str) -> Lookup<MetadataOverride> {
        MetadataOverride::find_by_path(&self.pool, path).await.into()
    }
}

#[async_trait]
impl ProductCatalog for DBService {
    async fn find_product_by_id(&self, id: &str) -> Lookup<ProductSummary> {
        // Catalog keys are integers; anything else cannot name a product.
        let Ok(id) = id.parse::<i64>() else {
            return Lookup::NotFound;
        };
        Product::find_by_id(&self.pool, id)
            .await
            .map(|product| product.map(ProductSummary::from))
            .into()
    }
}

/// Brand-wide fallback metadata, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct StaticDefaults {
    pub title: String,
    pub description: String,
    pub og_image: String,
    /// Appended to product names: `"{name} | {brand}"`.
    pub brand: String,
    /// Used for products that have no description of their own.
    pub product_description_fallback: String,
}

impl Default for StaticDefaults {
    fn default() -> Self {
        Self {
            title: "Serendia Gems | Heart of Sri Lanka".to_string(),
            description: "Ethically mined, expertly cut. Discover the world's finest Sapphires directly from the source.".to_string(),
            og_image: "/hero/hero.jpeg".to_string(),
            brand: "Serendia Gems".to_string(),
            product_description_fallback: "Luxury gemstone from Serendia Gems.".to_string(),
        }
    }
}

/// Metadata attached to a single page render. Recomputed on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ResolvedMetadata {
    pub title: String,
    pub description: String,
    /// `None` leaves the choice of preview image to the rendering platform.
    pub og_image: Option<String>,
}

/// Product lookup capability handed in by product-detail pages
#[derive(Clone, Copy)]
pub struct ProductLookup<'a> {
    pub catalog: &'a dyn ProductCatalog,
    pub product_id: &'a str,
}

/// Logical path of a product-detail page
pub fn product_path(product_id: &str) -> String {
    format!("/product/{product_id}")
}

/// Stateless three-tier metadata resolver
#[derive(Clone)]
pub struct MetadataResolver {
    store: Arc<dyn MetadataStore>,
    defaults: Arc<StaticDefaults>,
    lookup_timeout: Option<Duration>,
}

impl MetadataResolver {
    pub fn new(store: Arc<dyn MetadataStore>, defaults: StaticDefaults) -> Self {
        Self {
            store,
            defaults: Arc::new(defaults),
            lookup_timeout: None,
        }
    }

    /// Bound each collaborator lookup; an expired lookup counts as unavailable.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = Some(timeout);
        self
    }

    /// Resolve metadata for `path`. Never fails; every failure degrades to a
    /// more generic tier.
    pub async fn resolve(&self, path: &str, product: Option<ProductLookup<'_>>) -> ResolvedMetadata {
        match self.fetch_override(path).await {
            // An override carrying the brand tagline on a product page reads as
            // "never configured", so the catalog gets a say.
            Some(found) if product.is_some() && found.title == self.defaults.title => {
                debug!(path = %path, "Override title matches default, deriving from product");
            }
            Some(found) => {
                debug!(path = %path, "Using metadata override");
                return self.from_override(found);
            }
            None => {}
        }

        if let Some(lookup) = product {
            if let Some(summary) = self.fetch_product(lookup).await {
                debug!(path = %path, product_id = %lookup.product_id, "Using product-derived metadata");
                return self.from_product(summary);
            }
        }

        self.static_defaults()
    }

    /// Resolve metadata for the product-detail page of `product_id`.
    pub async fn resolve_product_page(
        &self,
        catalog: &dyn ProductCatalog,
        product_id: &str,
    ) -> ResolvedMetadata {
        let path = product_path(product_id);
        self.resolve(
            &path,
            Some(ProductLookup {
                catalog,
                product_id,
            }),
        )
        .await
    }

    async fn fetch_override(&self, path: &str) -> Option<MetadataOverride> {
        match self.bounded(self.store.find_override_by_path(path)).await {
            Lookup::Found(found) if found.title.trim().is_empty() => {
                warn!(path = %path, "Ignoring metadata override with a blank title");
                None
            }
            Lookup::Found(found) => Some(found),
            Lookup::NotFound => None,
            Lookup::Unavailable(reason) => {
                warn!(path = %path, error = %reason, "Failed to fetch SEO metadata, using defaults");
                None
            }
        }
    }

    async fn fetch_product(&self, lookup: ProductLookup<'_>) -> Option<ProductSummary> {
        match self
            .bounded(lookup.catalog.find_product_by_id(lookup.product_id))
            .await
        {
            Lookup::Found(summary) => Some(summary),
            Lookup::NotFound => None,
            Lookup::Unavailable(reason) => {
                warn!(
                    product_id = %lookup.product_id,
                    error = %reason,
                    "Failed to fetch product for metadata, using defaults"
                );
                None
            }
        }
    }

    async fn bounded<T>(&self, lookup: impl Future<Output = Lookup<T>>) -> Lookup<T> {
        let Some(limit) = self.lookup_timeout else {
            return lookup.await;
        };
        tokio::time::timeout(limit, lookup).await.unwrap_or_else(|_| {
            Lookup::Unavailable(format!("lookup timed out after {}ms", limit.as_millis()))
        })
    }

    fn from_override(&self, found: MetadataOverride) -> ResolvedMetadata {
        ResolvedMetadata {
            title: found.title,
            description: non_blank(found.description)
                .unwrap_or_else(|| self.defaults.description.clone()),
            og_image: Some(
                non_blank(found.og_image).unwrap_or_else(|| self.defaults.og_image.clone()),
            ),
        }
    }

    fn from_product(&self, product: ProductSummary) -> ResolvedMetadata {
        let description = non_blank(product.description)
            .map(|d| truncate_chars(&d, PRODUCT_DESCRIPTION_MAX_CHARS).to_string())
            .unwrap_or_else(|| self.defaults.product_description_fallback.clone());

        ResolvedMetadata {
            title: format!("{} | {}", product.name, self.defaults.brand),
            description,
            og_image: product.images.into_iter().next(),
        }
    }

    fn static_defaults(&self) -> ResolvedMetadata {
        ResolvedMetadata {
            title: self.defaults.title.clone(),
            description: self.defaults.description.clone(),
            og_image: Some(self.defaults.og_image.clone()),
        }
    }
}
