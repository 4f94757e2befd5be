use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dewdrop_core::format::format_date;
use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::SanityConfig;

use super::queries;
use super::types::{
    Banner, Category, GlobalContent, HomepageContent, ImageResolver, ResolveImages, SkinConcern,
};
use super::{Perspective, SanityError};

/// Client for the Sanity HTTP query API.
///
/// Published results are cached for 60 seconds. Draft results are never
/// cached.
#[derive(Clone)]
pub struct SanityClient {
    inner: Arc<SanityClientInner>,
}

struct SanityClientInner {
    client: reqwest::Client,
    published_url: String,
    live_url: String,
    token: Option<SecretString>,
    images: ImageResolver,
    cache: Cache<String, Value>,
}

#[derive(Deserialize)]
struct QueryResponse {
    result: Value,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    description: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl SanityClient {
    #[must_use]
    pub fn new(config: &SanityConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(500)
            .time_to_live(Duration::from_secs(60))
            .build();

        Self {
            inner: Arc::new(SanityClientInner {
                client: reqwest::Client::new(),
                published_url: config.published_query_url(),
                live_url: config.live_query_url(),
                token: config.api_token.clone(),
                images: ImageResolver::new(&config.project_id, &config.dataset),
                cache,
            }),
        }
    }

    /// Run a GROQ query and deserialize its `result`.
    ///
    /// `params` are bound as `$name` and JSON-encoded as Sanity expects.
    ///
    /// # Errors
    ///
    /// Returns [`SanityError::MissingToken`] for draft reads without a
    /// token, [`SanityError::Api`] when Sanity rejects the query, or an
    /// HTTP/parse error.
    #[instrument(skip(self, query, params), fields(perspective = %perspective))]
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &[(&str, Value)],
        perspective: Perspective,
    ) -> Result<T, SanityError> {
        let cache_key = cache_key(query, params);

        if perspective == Perspective::Published
            && let Some(cached) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for Sanity query");
            return Ok(serde_json::from_value(cached)?);
        }

        let result = self.query(query, params, perspective).await?;

        if perspective == Perspective::Published {
            self.inner.cache.insert(cache_key, result.clone()).await;
        }

        Ok(serde_json::from_value(result)?)
    }

    async fn query(
        &self,
        query: &str,
        params: &[(&str, Value)],
        perspective: Perspective,
    ) -> Result<Value, SanityError> {
        let mut pairs: Vec<(String, String)> = Vec::with_capacity(params.len() + 2);
        pairs.push(("query".to_string(), query.to_string()));
        for (name, value) in params {
            pairs.push((format!("${name}"), value.to_string()));
        }
        pairs.push(("perspective".to_string(), perspective.as_str().to_string()));

        let request = match perspective {
            Perspective::Published => {
                let request = self.inner.client.get(&self.inner.published_url);
                match &self.inner.token {
                    // Tokens bypass the CDN; only send one off-CDN.
                    Some(token) if self.inner.published_url == self.inner.live_url => {
                        request.bearer_auth(token.expose_secret())
                    }
                    _ => request,
                }
            }
            Perspective::Drafts => {
                let token = self.inner.token.as_ref().ok_or(SanityError::MissingToken)?;
                self.inner
                    .client
                    .get(&self.inner.live_url)
                    .bearer_auth(token.expose_secret())
            }
        };

        let response = request.query(&pairs).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error.description.or(e.error.kind))
                .unwrap_or_else(|| body.chars().take(200).collect());
            tracing::error!(status = %status, %message, "Sanity query failed");
            return Err(SanityError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: QueryResponse = serde_json::from_str(&body)?;
        Ok(parsed.result)
    }

    /// Fetch a single document, mapping a `null` result to `NotFound`.
    async fn fetch_one<T: DeserializeOwned + ResolveImages>(
        &self,
        query: &str,
        params: &[(&str, Value)],
        perspective: Perspective,
        what: &str,
    ) -> Result<T, SanityError> {
        let mut doc: T = self
            .fetch::<Option<T>>(query, params, perspective)
            .await?
            .ok_or_else(|| SanityError::NotFound(what.to_string()))?;
        doc.resolve_images(&self.inner.images);
        Ok(doc)
    }

    // =========================================================================
    // Typed reads
    // =========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn categories(&self, perspective: Perspective) -> Result<Vec<Category>, SanityError> {
        let mut categories: Vec<Category> =
            self.fetch(queries::CATEGORIES, &[], perspective).await?;
        categories.resolve_images(&self.inner.images);
        Ok(categories)
    }

    /// # Errors
    ///
    /// Returns [`SanityError::NotFound`] if no category has this slug.
    pub async fn category_by_slug(
        &self,
        slug: &str,
        perspective: Perspective,
    ) -> Result<Category, SanityError> {
        self.fetch_one(
            queries::CATEGORY_BY_SLUG,
            &[("slug", Value::String(slug.to_string()))],
            perspective,
            &format!("Category not found: {slug}"),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn skin_concerns(
        &self,
        perspective: Perspective,
    ) -> Result<Vec<SkinConcern>, SanityError> {
        self.fetch(queries::SKIN_CONCERNS, &[], perspective).await
    }

    /// # Errors
    ///
    /// Returns [`SanityError::NotFound`] if the homepage document is missing.
    pub async fn homepage(&self, perspective: Perspective) -> Result<HomepageContent, SanityError> {
        self.fetch_one(queries::HOMEPAGE, &[], perspective, "Homepage content")
            .await
    }

    /// Banners that are active and inside their schedule right now.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn banners(&self, perspective: Perspective) -> Result<Vec<Banner>, SanityError> {
        let now = Utc::now();
        let mut banners: Vec<Banner> = self.fetch(queries::BANNERS, &[], perspective).await?;
        banners.retain(|b| b.is_live(now));
        banners.resolve_images(&self.inner.images);
        for banner in &mut banners {
            banner.ends_on = banner.end_date.as_ref().map(format_date);
        }
        Ok(banners)
    }

    /// # Errors
    ///
    /// Returns [`SanityError::NotFound`] if the global content document is
    /// missing.
    pub async fn global_content(
        &self,
        perspective: Perspective,
    ) -> Result<GlobalContent, SanityError> {
        self.fetch::<Option<GlobalContent>>(queries::GLOBAL_CONTENT, &[], perspective)
            .await?
            .ok_or_else(|| SanityError::NotFound("Global content".to_string()))
    }
}

fn cache_key(query: &str, params: &[(&str, Value)]) -> String {
    let mut key = query.to_string();
    for (name, value) in params {
        key.push('|');
        key.push_str(name);
        key.push('=');
        key.push_str(&value.to_string());
    }
    key
}
