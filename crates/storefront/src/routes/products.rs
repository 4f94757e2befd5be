//! Product route handlers.

use axum::extract::State;
use dewdrop_core::Handle;
use serde::Deserialize;

use crate::error::AppError;
use crate::shopify::{Product, ProductConnection};
use crate::state::AppState;

use super::{ApiPath, ApiQuery, ApiResult, ok};

pub const DEFAULT_PAGE_SIZE: i64 = 12;
pub const MAX_PAGE_SIZE: i64 = 50;

/// Cursor pagination and search parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub first: Option<i64>,
    pub after: Option<String>,
    /// Shopify search syntax, e.g. `tag:vegan` or `title:serum*`.
    pub query: Option<String>,
}

impl ProductListQuery {
    /// Page size clamped to `1..=50`, defaulting to 12.
    #[must_use]
    pub fn page_size(&self) -> i64 {
        self.first
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Non-blank search text.
    #[must_use]
    pub fn search(&self) -> Option<String> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(String::from)
    }

    #[must_use]
    pub fn cursor(&self) -> Option<String> {
        self.after.clone().filter(|c| !c.is_empty())
    }
}

/// Validate a handle from the path.
pub(crate) fn parse_handle(raw: &str) -> Result<Handle, AppError> {
    Handle::parse(raw).map_err(|e| AppError::BadRequest(format!("Invalid handle: {e}")))
}

/// List products.
pub async fn index(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProductListQuery>,
) -> ApiResult<ProductConnection> {
    let page = state
        .storefront()
        .get_products(query.page_size(), query.cursor(), query.search())
        .await?;
    ok(page)
}

/// Show a single product.
pub async fn show(
    State(state): State<AppState>,
    ApiPath(handle): ApiPath<String>,
) -> ApiResult<Product> {
    let handle = parse_handle(&handle)?;
    let product = state
        .storefront()
        .get_product_by_handle(handle.as_str())
        .await?;
    ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_clamped() {
        let mut query = ProductListQuery::default();
        assert_eq!(query.page_size(), 12);
        query.first = Some(0);
        assert_eq!(query.page_size(), 1);
        query.first = Some(500);
        assert_eq!(query.page_size(), 50);
        query.first = Some(24);
        assert_eq!(query.page_size(), 24);
    }

    #[test]
    fn test_blank_search_ignored() {
        let query = ProductListQuery {
            query: Some("   ".to_string()),
            after: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(query.search(), None);
        assert_eq!(query.cursor(), None);
    }

    #[test]
    fn test_parse_handle_rejects_bad_input() {
        assert!(parse_handle("rose-hydrating-serum").is_ok());
        assert!(matches!(
            parse_handle("Rose Serum!"),
            Err(AppError::BadRequest(_))
        ));
    }
}
