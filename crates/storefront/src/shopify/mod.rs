//! Shopify Storefront API client.
//!
//! # Architecture
//!
//! - GraphQL documents are plain strings sent with `reqwest`; the request
//!   and response envelopes come from `graphql_client`
//! - Shopify is source of truth - no local sync, direct API calls
//! - In-memory caching via `moka` for API responses (5 minute TTL)
//!
//! # Example
//!
//! ```rust,ignore
//! use dewdrop_storefront::shopify::StorefrontClient;
//!
//! let client = StorefrontClient::new(&config.shopify);
//! let product = client.get_product_by_handle("rose-hydrating-serum").await?;
//! let page = client.get_products(Some(12), None, Some("tag:vegan".into())).await?;
//! ```

mod storefront;
pub mod types;

pub use storefront::StorefrontClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with Shopify APIs.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// A GraphQL error returned by the Shopify API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    pub line: i64,
    pub column: i64,
}

impl From<graphql_client::Error> for GraphQLError {
    fn from(e: graphql_client::Error) -> Self {
        Self {
            message: e.message,
            locations: e
                .locations
                .unwrap_or_default()
                .into_iter()
                .map(|l| GraphQLErrorLocation {
                    line: i64::from(l.line),
                    column: i64::from(l.column),
                })
                .collect(),
            path: e
                .path
                .unwrap_or_default()
                .into_iter()
                .map(|fragment| match fragment {
                    graphql_client::PathFragment::Key(s) => serde_json::Value::String(s),
                    graphql_client::PathFragment::Index(i) => serde_json::Value::Number(i.into()),
                })
                .collect(),
        }
    }
}

impl GraphQLError {
    /// An error synthesized locally (bad status, empty payload).
    pub(crate) fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
            path: vec![],
        }
    }
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_error_formatting() {
        let err = ShopifyError::GraphQL(vec![
            GraphQLError::message("Field 'ingredients' doesn't exist on type 'Product'"),
            GraphQLError::message("Throttled"),
        ]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field 'ingredients' doesn't exist on type 'Product'; Throttled"
        );
    }

    #[test]
    fn test_graphql_error_path_and_location() {
        let err = ShopifyError::GraphQL(vec![GraphQLError {
            message: String::new(),
            locations: vec![GraphQLErrorLocation { line: 3, column: 7 }],
            path: vec![
                serde_json::Value::String("products".to_string()),
                serde_json::Value::Number(2.into()),
            ],
        }]);
        assert_eq!(err.to_string(), "GraphQL errors: path: products.2 at line 3:7");
    }

    #[test]
    fn test_graphql_error_without_details() {
        assert_eq!(
            ShopifyError::GraphQL(vec![GraphQLError::message("")]).to_string(),
            "GraphQL errors: [error 1]: (no details)"
        );
        assert_eq!(
            ShopifyError::GraphQL(vec![]).to_string(),
            "GraphQL errors: (no error details provided)"
        );
    }

    #[test]
    fn test_from_graphql_client_error() {
        let raw: graphql_client::Error = serde_json::from_value(serde_json::json!({
            "message": "Invalid handle",
            "locations": [{"line": 2, "column": 5}],
            "path": ["product", "variants", 0]
        }))
        .unwrap();
        let converted = GraphQLError::from(raw);
        assert_eq!(converted.message, "Invalid handle");
        assert_eq!(converted.locations.len(), 1);
        assert_eq!(
            converted.path,
            vec![
                serde_json::Value::String("product".to_string()),
                serde_json::Value::String("variants".to_string()),
                serde_json::Value::Number(0.into()),
            ]
        );
    }
}
