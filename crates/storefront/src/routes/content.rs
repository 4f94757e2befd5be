//! CMS content route handlers.

use axum::extract::State;
use serde::Serialize;

use crate::middleware::DraftMode;
use crate::sanity::{Banner, GlobalContent, HomepageContent};
use crate::shopify::Product;
use crate::state::AppState;

use super::{ApiResult, ok};

/// Homepage content with its featured products resolved from Shopify.
#[derive(Debug, Serialize)]
pub struct Homepage {
    #[serde(flatten)]
    pub content: HomepageContent,
    pub featured_products: Vec<Product>,
}

pub async fn homepage(State(state): State<AppState>, draft: DraftMode) -> ApiResult<Homepage> {
    let content = state.sanity().homepage(draft.perspective()).await?;
    let featured_products = state
        .storefront()
        .get_products_by_handles(&content.featured_product_handles)
        .await?;

    ok(Homepage {
        content,
        featured_products,
    })
}

pub async fn banners(State(state): State<AppState>, draft: DraftMode) -> ApiResult<Vec<Banner>> {
    ok(state.sanity().banners(draft.perspective()).await?)
}

pub async fn global(State(state): State<AppState>, draft: DraftMode) -> ApiResult<GlobalContent> {
    ok(state.sanity().global_content(draft.perspective()).await?)
}
