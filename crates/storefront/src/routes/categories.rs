//! Category and skin-concern route handlers.
//!
//! Categories are CMS documents. A category's products come from the Shopify
//! collection it points at.

use axum::extract::State;
use serde::Serialize;

use crate::middleware::DraftMode;
use crate::sanity::{Category, SkinConcern};
use crate::shopify::{PageInfo, ProductConnection};
use crate::state::AppState;

use super::products::{ProductListQuery, parse_handle};
use super::{ApiPath, ApiQuery, ApiResult, ok};

#[derive(Debug, Serialize)]
pub struct CategoryProducts {
    pub category: Category,
    pub products: ProductConnection,
}

pub async fn index(
    State(state): State<AppState>,
    draft: DraftMode,
) -> ApiResult<Vec<Category>> {
    ok(state.sanity().categories(draft.perspective()).await?)
}

pub async fn show(
    State(state): State<AppState>,
    draft: DraftMode,
    ApiPath(slug): ApiPath<String>,
) -> ApiResult<Category> {
    let slug = parse_handle(&slug)?;
    ok(state
        .sanity()
        .category_by_slug(slug.as_str(), draft.perspective())
        .await?)
}

/// Products of the category's Shopify collection. A category without a
/// linked collection has no products.
pub async fn products(
    State(state): State<AppState>,
    draft: DraftMode,
    ApiPath(slug): ApiPath<String>,
    ApiQuery(query): ApiQuery<ProductListQuery>,
) -> ApiResult<CategoryProducts> {
    let slug = parse_handle(&slug)?;
    let category = state
        .sanity()
        .category_by_slug(slug.as_str(), draft.perspective())
        .await?;

    let products = match category.shopify_collection_handle.as_deref() {
        Some(handle) => {
            state
                .storefront()
                .get_collection_products(handle, query.page_size(), query.cursor())
                .await?
                .products
        }
        None => ProductConnection {
            products: vec![],
            page_info: PageInfo {
                has_next_page: false,
                end_cursor: None,
            },
        },
    };

    ok(CategoryProducts { category, products })
}

pub async fn skin_concerns(
    State(state): State<AppState>,
    draft: DraftMode,
) -> ApiResult<Vec<SkinConcern>> {
    ok(state.sanity().skin_concerns(draft.perspective()).await?)
}
