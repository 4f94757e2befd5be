//! Collection route handlers.

use axum::extract::State;

use crate::shopify::Collection;
use crate::state::AppState;

use super::products::{ProductListQuery, parse_handle};
use super::{ApiPath, ApiQuery, ApiResult, ok};

/// Show a collection and a page of its products.
pub async fn show(
    State(state): State<AppState>,
    ApiPath(handle): ApiPath<String>,
    ApiQuery(query): ApiQuery<ProductListQuery>,
) -> ApiResult<Collection> {
    let handle = parse_handle(&handle)?;
    let collection = state
        .storefront()
        .get_collection_products(handle.as_str(), query.page_size(), query.cursor())
        .await?;
    ok(collection)
}
