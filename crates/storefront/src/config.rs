//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., dewdrop.myshopify.com)
//! - `SHOPIFY_STOREFRONT_TOKEN` - Storefront API private access token
//! - `SANITY_PROJECT_ID` - Sanity project ID
//! - `SANITY_PREVIEW_SECRET` - Shared secret for draft-mode preview links (min 32 chars)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `CORS_ALLOWED_ORIGINS` - Comma-separated origins (default: any)
//! - `SHOPIFY_API_VERSION` - API version (default: 2026-01)
//! - `SHOPIFY_STOREFRONT_API_URL` - Full GraphQL endpoint override (staging proxies)
//! - `SANITY_DATASET` - Dataset name (default: production)
//! - `SANITY_API_VERSION` - Query API version (default: 2025-02-19)
//! - `SANITY_API_TOKEN` - Read token, required for draft-mode reads
//! - `SANITY_USE_CDN` - Use the API CDN for published reads (default: true)
//! - `SANITY_API_HOST` - Base URL override for the query API
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use dewdrop_core::secret::{self, SecretError};
use secrecy::SecretString;
use thiserror::Error;

const MIN_PREVIEW_SECRET_LENGTH: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, SecretError),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Origins allowed by CORS; empty means any origin
    pub cors_allowed_origins: Vec<String>,
    /// Shopify Storefront API configuration
    pub shopify: ShopifyStorefrontConfig,
    /// Sanity content API configuration
    pub sanity: SanityConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. production, staging)
    pub sentry_environment: Option<String>,
}

/// Shopify Storefront API configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct ShopifyStorefrontConfig {
    /// Shopify store domain (e.g., dewdrop.myshopify.com)
    pub store: String,
    /// Shopify API version (e.g., 2026-01)
    pub api_version: String,
    /// Storefront API private access token (server-side only)
    pub storefront_token: SecretString,
    /// Full endpoint override; derived from `store` when unset
    pub api_url: Option<String>,
}

impl ShopifyStorefrontConfig {
    /// The GraphQL endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> String {
        self.api_url.clone().unwrap_or_else(|| {
            format!(
                "https://{}/api/{}/graphql.json",
                self.store, self.api_version
            )
        })
    }
}

impl std::fmt::Debug for ShopifyStorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyStorefrontConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("storefront_token", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Sanity query API configuration.
#[derive(Clone)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// Read token; without it draft-mode reads fail
    pub api_token: Option<SecretString>,
    pub use_cdn: bool,
    /// Secret expected in `/api/draft?secret=...`
    pub preview_secret: SecretString,
    /// Base URL override (scheme + host), mainly for local mocks
    pub api_host: Option<String>,
}

impl SanityConfig {
    /// Query endpoint for published reads (CDN when enabled).
    #[must_use]
    pub fn published_query_url(&self) -> String {
        let host = self.api_host.clone().unwrap_or_else(|| {
            let subdomain = if self.use_cdn { "apicdn" } else { "api" };
            format!("https://{}.{subdomain}.sanity.io", self.project_id)
        });
        self.query_url_on(&host)
    }

    /// Query endpoint for draft reads; never the CDN.
    #[must_use]
    pub fn live_query_url(&self) -> String {
        let host = self
            .api_host
            .clone()
            .unwrap_or_else(|| format!("https://{}.api.sanity.io", self.project_id));
        self.query_url_on(&host)
    }

    fn query_url_on(&self, host: &str) -> String {
        format!(
            "{}/v{}/data/query/{}",
            host.trim_end_matches('/'),
            self.api_version,
            self.dataset
        )
    }
}

impl std::fmt::Debug for SanityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanityConfig")
            .field("project_id", &self.project_id)
            .field("dataset", &self.dataset)
            .field("api_version", &self.api_version)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("use_cdn", &self.use_cdn)
            .field("preview_secret", &"[REDACTED]")
            .field("api_host", &self.api_host)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        url::Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            host,
            port,
            base_url,
            cors_allowed_origins: parse_origins(
                get_optional_env("CORS_ALLOWED_ORIGINS").as_deref(),
            ),
            shopify: ShopifyStorefrontConfig::from_env()?,
            sanity: SanityConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl ShopifyStorefrontConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            store: get_required_env("SHOPIFY_STORE")?,
            api_version: get_env_or_default("SHOPIFY_API_VERSION", "2026-01"),
            storefront_token: get_validated_secret("SHOPIFY_STOREFRONT_TOKEN")?,
            api_url: get_optional_env("SHOPIFY_STOREFRONT_API_URL"),
        })
    }
}

impl SanityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_token = match get_optional_env("SANITY_API_TOKEN") {
            Some(token) => {
                secret::validate_strength(&token).map_err(|e| {
                    ConfigError::InsecureSecret("SANITY_API_TOKEN".to_string(), e)
                })?;
                Some(SecretString::from(token))
            }
            None => None,
        };

        let preview_secret = get_required_env("SANITY_PREVIEW_SECRET")?;
        secret::validate_min_length(&preview_secret, MIN_PREVIEW_SECRET_LENGTH)
            .and_then(|()| secret::validate_strength(&preview_secret))
            .map_err(|e| ConfigError::InsecureSecret("SANITY_PREVIEW_SECRET".to_string(), e))?;

        let use_cdn = parse_bool("SANITY_USE_CDN", &get_env_or_default("SANITY_USE_CDN", "true"))?;

        Ok(Self {
            project_id: get_required_env("SANITY_PROJECT_ID")?,
            dataset: get_env_or_default("SANITY_DATASET", "production"),
            api_version: get_env_or_default("SANITY_API_VERSION", "2025-02-19"),
            api_token,
            use_cdn,
            preview_secret: SecretString::from(preview_secret),
            api_host: get_optional_env("SANITY_API_HOST"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    secret::validate_strength(&value)
        .map_err(|e| ConfigError::InsecureSecret(key.to_string(), e))?;
    Ok(SecretString::from(value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

/// Split a comma-separated origin list; `*` or an empty value allows any origin.
fn parse_origins(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty() && origin != "*")
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sanity_config() -> SanityConfig {
        SanityConfig {
            project_id: "abc123".to_string(),
            dataset: "production".to_string(),
            api_version: "2025-02-19".to_string(),
            api_token: Some(SecretString::from("sk_live_token_value")),
            use_cdn: true,
            preview_secret: SecretString::from("preview_secret_value"),
            api_host: None,
        }
    }

    #[test]
    fn test_parse_origins() {
        assert!(parse_origins(None).is_empty());
        assert!(parse_origins(Some("*")).is_empty());
        assert_eq!(
            parse_origins(Some("https://dewdrop.shop/, https://www.dewdrop.shop")),
            vec!["https://dewdrop.shop", "https://www.dewdrop.shop"]
        );
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "TRUE").unwrap());
        assert!(!parse_bool("X", "off").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }

    #[test]
    fn test_shopify_endpoint() {
        let mut config = ShopifyStorefrontConfig {
            store: "dewdrop.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            storefront_token: SecretString::from("token"),
            api_url: None,
        };
        assert_eq!(
            config.endpoint(),
            "https://dewdrop.myshopify.com/api/2026-01/graphql.json"
        );

        config.api_url = Some("http://127.0.0.1:9999/graphql".to_string());
        assert_eq!(config.endpoint(), "http://127.0.0.1:9999/graphql");
    }

    #[test]
    fn test_sanity_urls() {
        let mut config = sanity_config();
        assert_eq!(
            config.published_query_url(),
            "https://abc123.apicdn.sanity.io/v2025-02-19/data/query/production"
        );
        assert_eq!(
            config.live_query_url(),
            "https://abc123.api.sanity.io/v2025-02-19/data/query/production"
        );

        config.use_cdn = false;
        assert!(config.published_query_url().starts_with("https://abc123.api.sanity.io"));

        config.api_host = Some("http://127.0.0.1:4000/".to_string());
        assert_eq!(
            config.live_query_url(),
            "http://127.0.0.1:4000/v2025-02-19/data/query/production"
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug_output = format!("{:?}", sanity_config());
        assert!(debug_output.contains("abc123"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("sk_live_token_value"));
        assert!(!debug_output.contains("preview_secret_value"));

        let shopify = ShopifyStorefrontConfig {
            store: "dewdrop.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            storefront_token: SecretString::from("shpat_super_private"),
            api_url: None,
        };
        assert!(!format!("{shopify:?}").contains("shpat_super_private"));
    }
}
