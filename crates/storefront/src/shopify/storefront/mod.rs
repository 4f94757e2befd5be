//! Shopify Storefront API client implementation.
//!
//! Sends GraphQL documents with `reqwest` 0.13, wrapped in
//! `graphql_client` request/response envelopes.
//! Caches products and collections using `moka` (5-minute TTL).

mod cache;
mod conversions;
pub mod queries;

use std::sync::Arc;
use std::time::Duration;

use graphql_client::{QueryBody, Response};
use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::types::{Collection, Product, ProductConnection};
use crate::shopify::{GraphQLError, ShopifyError};

use cache::CacheValue;
use conversions::{convert_collection, convert_product, convert_product_connection};
use queries::{
    CollectionProductsData, CollectionProductsVariables, GET_COLLECTION_PRODUCTS,
    GET_PRODUCT_BY_HANDLE, GET_PRODUCTS, ProductByHandleData, ProductByHandleVariables,
    ProductsData, ProductsVariables,
};

const IMAGE_COUNT: i64 = 10;
const VARIANT_COUNT: i64 = 50;

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Products and collections are cached for 5 minutes. Search results are
/// never cached.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    cache: Cache<String, CacheValue>,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300))
            .build();

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint: config.endpoint(),
                access_token: config.storefront_token.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL operation and return its `data`.
    async fn execute<V, D>(
        &self,
        operation_name: &'static str,
        query: &'static str,
        variables: V,
    ) -> Result<D, ShopifyError>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        let body = QueryBody {
            variables,
            query,
            operation_name,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            // Private tokens use a different header than the public one.
            .header("Shopify-Storefront-Private-Token", &self.inner.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                operation = operation_name,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::GraphQL(vec![GraphQLError::message(format!(
                "HTTP {status}: {}",
                response_text.chars().take(200).collect::<String>()
            ))]));
        }

        let response: Response<D> = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                operation = operation_name,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse Shopify GraphQL response"
            );
            ShopifyError::Parse(e)
        })?;

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(errors = ?errors, "GraphQL errors in response");
            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(GraphQLError::from).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                operation = operation_name,
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::GraphQL(vec![GraphQLError::message("No data in response")])
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a product by its handle.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::NotFound`] if no product has this handle, or
    /// another error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_by_handle(&self, handle: &str) -> Result<Product, ShopifyError> {
        let cache_key = format!("product:{handle}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let variables = ProductByHandleVariables {
            handle: handle.to_string(),
            image_count: IMAGE_COUNT,
            variant_count: VARIANT_COUNT,
        };

        let data: ProductByHandleData = self
            .execute("GetProductByHandle", GET_PRODUCT_BY_HANDLE, variables)
            .await?;

        let product = data
            .product
            .map(convert_product)
            .ok_or_else(|| ShopifyError::NotFound(format!("Product not found: {handle}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get a page of products, optionally filtered by a Shopify search query.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        first: i64,
        after: Option<String>,
        query: Option<String>,
    ) -> Result<ProductConnection, ShopifyError> {
        let cache_key = format!("products:{first}:{}", after.as_deref().unwrap_or(""));

        if query.is_none()
            && let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let is_search = query.is_some();
        let variables = ProductsVariables {
            first,
            after,
            query,
            image_count: IMAGE_COUNT,
            variant_count: VARIANT_COUNT,
        };

        let data: ProductsData = self.execute("GetProducts", GET_PRODUCTS, variables).await?;
        let connection = convert_product_connection(data.products);

        if !is_search {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(connection.clone()))
                .await;
        }

        Ok(connection)
    }

    /// Fetch several products by handle, skipping any that no longer exist.
    ///
    /// Used to enrich CMS content that references Shopify products.
    ///
    /// # Errors
    ///
    /// Returns the first error other than [`ShopifyError::NotFound`].
    #[instrument(skip(self, handles), fields(count = handles.len()))]
    pub async fn get_products_by_handles(
        &self,
        handles: &[String],
    ) -> Result<Vec<Product>, ShopifyError> {
        let results =
            futures::future::join_all(handles.iter().map(|h| self.get_product_by_handle(h))).await;

        let mut products = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(product) => products.push(product),
                Err(ShopifyError::NotFound(message)) => debug!(%message, "Skipping missing product"),
                Err(e) => return Err(e),
            }
        }
        Ok(products)
    }

    // =========================================================================
    // Collection Methods
    // =========================================================================

    /// Get a collection and a page of its products.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::NotFound`] if no collection has this handle,
    /// or another error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_collection_products(
        &self,
        handle: &str,
        first: i64,
        after: Option<String>,
    ) -> Result<Collection, ShopifyError> {
        let cache_key = format!(
            "collection:{handle}:{first}:{}",
            after.as_deref().unwrap_or("")
        );

        if let Some(CacheValue::Collection(collection)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for collection");
            return Ok(*collection);
        }

        let variables = CollectionProductsVariables {
            handle: handle.to_string(),
            first,
            after,
            image_count: IMAGE_COUNT,
            variant_count: VARIANT_COUNT,
        };

        let data: CollectionProductsData = self
            .execute("GetCollectionProducts", GET_COLLECTION_PRODUCTS, variables)
            .await?;

        let collection = data
            .collection
            .map(convert_collection)
            .ok_or_else(|| ShopifyError::NotFound(format!("Collection not found: {handle}")))?;

        self.inner
            .cache
            .insert(
                cache_key,
                CacheValue::Collection(Box::new(collection.clone())),
            )
            .await;

        Ok(collection)
    }
}
