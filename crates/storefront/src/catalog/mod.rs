//! CMS catalog client.
//!
//! Reads published products, benefits, ingredients and the header/footer
//! globals from the CMS REST API. Responses are cached with `moka` for the
//! configured TTL (5 minutes by default).
//!
//! Storefront pages render with whatever the catalog returns, so the plain
//! accessors never fail: errors are logged and collapse to an empty list or
//! `None`. The `try_*` variants expose the error for callers that care.

mod cache;

use std::sync::Arc;

use moka::future::Cache;
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use borzfuel_core::{Benefit, Ingredient, Product};

use crate::config::StorefrontConfig;

use cache::{CacheKey, CacheValue, Global};

/// Errors that can occur when reading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The CMS answered with a non-success status.
    #[error("CMS returned status {0}")]
    Status(u16),

    /// The response body was not the expected JSON shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Paginated collection response; only `docs` is used.
#[derive(Debug, Deserialize)]
struct DocList {
    #[serde(default)]
    docs: Vec<serde_json::Value>,
}

/// Parse a collection response, skipping documents that do not match `T`.
fn parse_docs<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, serde_json::Error> {
    let list: DocList = serde_json::from_str(body)?;
    Ok(list
        .docs
        .into_iter()
        .filter_map(|doc| {
            let id = doc.get("id").cloned();
            serde_json::from_value(doc)
                .inspect_err(|e| warn!(id = ?id, error = %e, "Skipping malformed catalog document"))
                .ok()
        })
        .collect())
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the CMS catalog collections.
///
/// Cheap to clone; clones share the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(64)
            .time_to_live(config.catalog_cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.cms_url.clone(),
                cache,
            }),
        })
    }

    /// GET a CMS path and return the body of a successful response.
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, CatalogError> {
        let url = self.inner.base_url.join(path)?;
        let response = self.inner.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    async fn get_docs<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, CatalogError> {
        let body = self.get(path, query).await?;
        Ok(parse_docs(&body)?)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Published products, with their image populated.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a
    /// collection listing.
    #[instrument(skip(self))]
    pub async fn try_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for products");
            return Ok(products.to_vec());
        }

        let products: Vec<Product> = self
            .get_docs(
                "api/products",
                &[("where[status][equals]", "published"), ("populate", "image")],
            )
            .await?;

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(products.clone().into()))
            .await;
        Ok(products)
    }

    /// Published products, or an empty list if the catalog is unavailable.
    pub async fn products(&self) -> Vec<Product> {
        self.try_products().await.unwrap_or_else(|e| {
            warn!(error = %e, "Error fetching products");
            Vec::new()
        })
    }

    /// A published product by its URL slug.
    pub async fn product_by_slug(&self, slug: &str) -> Option<Product> {
        self.products().await.into_iter().find(|p| p.slug == slug)
    }

    // =========================================================================
    // Benefits & Ingredients
    // =========================================================================

    /// Product benefits in display order (at most 10).
    ///
    /// # Errors
    ///
    /// See [`try_products`](Self::try_products).
    #[instrument(skip(self))]
    pub async fn try_benefits(&self) -> Result<Vec<Benefit>, CatalogError> {
        if let Some(CacheValue::Benefits(benefits)) =
            self.inner.cache.get(&CacheKey::Benefits).await
        {
            debug!("Cache hit for benefits");
            return Ok(benefits.to_vec());
        }

        let benefits: Vec<Benefit> = self
            .get_docs("api/benefits", &[("sort", "order"), ("limit", "10")])
            .await?;

        self.inner
            .cache
            .insert(CacheKey::Benefits, CacheValue::Benefits(benefits.clone().into()))
            .await;
        Ok(benefits)
    }

    pub async fn benefits(&self) -> Vec<Benefit> {
        self.try_benefits().await.unwrap_or_else(|e| {
            warn!(error = %e, "Error fetching benefits");
            Vec::new()
        })
    }

    /// Ingredients in display order (at most 20).
    ///
    /// # Errors
    ///
    /// See [`try_products`](Self::try_products).
    #[instrument(skip(self))]
    pub async fn try_ingredients(&self) -> Result<Vec<Ingredient>, CatalogError> {
        if let Some(CacheValue::Ingredients(ingredients)) =
            self.inner.cache.get(&CacheKey::Ingredients).await
        {
            debug!("Cache hit for ingredients");
            return Ok(ingredients.to_vec());
        }

        let ingredients: Vec<Ingredient> = self
            .get_docs("api/ingredients", &[("sort", "order"), ("limit", "20")])
            .await?;

        self.inner
            .cache
            .insert(
                CacheKey::Ingredients,
                CacheValue::Ingredients(ingredients.clone().into()),
            )
            .await;
        Ok(ingredients)
    }

    pub async fn ingredients(&self) -> Vec<Ingredient> {
        self.try_ingredients().await.unwrap_or_else(|e| {
            warn!(error = %e, "Error fetching ingredients");
            Vec::new()
        })
    }

    // =========================================================================
    // Globals
    // =========================================================================

    async fn try_global(&self, global: Global) -> Result<serde_json::Value, CatalogError> {
        let key = CacheKey::Global(global);
        if let Some(CacheValue::Global(value)) = self.inner.cache.get(&key).await {
            debug!(global = global.slug(), "Cache hit for global");
            return Ok(value.as_ref().clone());
        }

        let body = self
            .get(&format!("api/globals/{}", global.slug()), &[])
            .await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;

        self.inner
            .cache
            .insert(key, CacheValue::Global(Arc::new(value.clone())))
            .await;
        Ok(value)
    }

    async fn global(&self, global: Global) -> Option<serde_json::Value> {
        self.try_global(global)
            .await
            .inspect_err(|e| warn!(global = global.slug(), error = %e, "Error fetching global"))
            .ok()
    }

    /// The header global, or `None` if unavailable.
    #[instrument(skip(self))]
    pub async fn header(&self) -> Option<serde_json::Value> {
        self.global(Global::Header).await
    }

    /// The footer global, or `None` if unavailable.
    #[instrument(skip(self))]
    pub async fn footer(&self) -> Option<serde_json::Value> {
        self.global(Global::Footer).await
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Drop every cached response.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use borzfuel_core::{BenefitIcon, IngredientCategory};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_docs_skips_malformed() {
        let body = json!({
            "docs": [
                { "id": "b1", "title": "Energy", "description": "All day", "icon": "zap", "order": 1 },
                { "id": "b2", "title": "Broken" },
                { "id": 3, "title": "Focus", "description": "Sharp", "icon": "brain" }
            ],
            "totalDocs": 3
        })
        .to_string();

        let benefits: Vec<Benefit> = parse_docs(&body).unwrap();
        assert_eq!(benefits.len(), 2);
        assert_eq!(benefits[0].icon, BenefitIcon::Zap);
        assert_eq!(benefits[1].id.as_str(), "3");
    }

    #[test]
    fn test_parse_docs_missing_docs_is_empty() {
        let ingredients: Vec<Ingredient> = parse_docs("{}").unwrap();
        assert!(ingredients.is_empty());
    }

    #[test]
    fn test_parse_docs_rejects_non_object() {
        assert!(parse_docs::<Ingredient>("[]").is_err());
        assert!(parse_docs::<Ingredient>("not json").is_err());
    }

    #[test]
    fn test_parse_ingredient() {
        let body = json!({
            "docs": [{
                "id": "i1",
                "name": "L-Citrulline",
                "amount": "6000mg",
                "benefit": "Pump",
                "category": "pump"
            }]
        })
        .to_string();

        let ingredients: Vec<Ingredient> = parse_docs(&body).unwrap();
        assert_eq!(ingredients[0].category, IngredientCategory::Pump);
        assert_eq!(ingredients[0].order, None);
    }

    #[test]
    fn test_global_slugs() {
        assert_eq!(Global::Header.slug(), "header");
        assert_eq!(Global::Footer.slug(), "footer");
    }
}
