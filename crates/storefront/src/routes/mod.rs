//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                           - Health check
//!
//! # Shopify
//! GET  /api/products                     - Product list (?first, ?after, ?query)
//! GET  /api/products/{handle}            - Product detail
//! GET  /api/collections/{handle}         - Collection with products
//!
//! # Sanity
//! GET  /api/categories                   - Categories
//! GET  /api/categories/{slug}            - Category detail
//! GET  /api/categories/{slug}/products   - Products in the category's collection
//! GET  /api/skin-concerns                - Skin concerns
//! GET  /api/content/homepage             - Homepage with featured products
//! GET  /api/content/banners              - Live banners
//! GET  /api/content/global               - Header/footer copy
//!
//! # Preview
//! GET  /api/draft                        - Enable draft mode (?secret, ?slug)
//! GET  /api/draft/disable                - Disable draft mode (?slug)
//! ```

pub mod categories;
pub mod collections;
pub mod content;
pub mod draft;
pub mod extract;
pub mod products;

use axum::{Json, Router, routing::get};
use dewdrop_core::ApiResponse;
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

pub use extract::{ApiPath, ApiQuery};

/// Handler result carrying the success envelope.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Wrap data in the success envelope.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::ok(data)))
}

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
    version: &'static str,
}

/// Liveness check.
pub async fn health() -> Json<ApiResponse<Health>> {
    Json(ApiResponse::ok(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{handle}", get(products::show))
        .route("/collections/{handle}", get(collections::show))
        .route("/categories", get(categories::index))
        .route("/categories/{slug}", get(categories::show))
        .route("/categories/{slug}/products", get(categories::products))
        .route("/skin-concerns", get(categories::skin_concerns))
        .route("/content/homepage", get(content::homepage))
        .route("/content/banners", get(content::banners))
        .route("/content/global", get(content::global))
        .route("/draft", get(draft::enable))
        .route("/draft/disable", get(draft::disable))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
}
