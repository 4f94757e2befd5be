//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                          - Health check
//!
//! # Auth
//! POST   /api/auth/login                  - Password login (rate limited)
//! POST   /api/auth/logout                 - Logout
//! GET    /api/auth/me                     - Current admin and permissions
//!
//! # Dashboard
//! GET    /api/dashboard/stats             - Catalog statistics
//!
//! # Products
//! GET    /api/products                    - Filtered, sorted, paginated list
//! POST   /api/products                    - Create
//! POST   /api/products/bulk-delete        - Delete several
//! GET    /api/products/handle/{handle}    - Lookup by handle
//! GET    /api/products/{id}               - Detail
//! PUT    /api/products/{id}               - Partial update
//! DELETE /api/products/{id}               - Delete
//! POST   /api/products/{id}/stock         - Adjust stock by a delta
//!
//! # Categories
//! GET    /api/categories                  - List with product counts
//! POST   /api/categories                  - Create
//! PUT    /api/categories/{id}             - Update
//! DELETE /api/categories/{id}             - Delete (409 while in use)
//!
//! # Admin users
//! GET    /api/admin-users                 - List
//! POST   /api/admin-users                 - Create
//! ```

pub mod admin_users;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod extract;
pub mod products;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post, put},
};
use dewdrop_core::ApiResponse;
use serde::Serialize;

use crate::error::AppError;
use crate::middleware::login_rate_limiter;
use crate::state::AppState;

pub use extract::{ApiJson, ApiPath, ApiQuery};

/// Handler result carrying the success envelope.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Handler result for creation endpoints (201).
pub type CreatedResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), AppError>;

/// Wrap data in the success envelope.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::ok(data)))
}

/// Wrap data in the success envelope with `201 Created`.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn created<T: Serialize>(data: T) -> CreatedResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(data))))
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
        .route("/auth/login", post(auth::login).layer(login_rate_limiter()))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/products", get(products::index).post(products::create))
        .route("/products/bulk-delete", post(products::bulk_delete))
        .route("/products/handle/{handle}", get(products::show_by_handle))
        .route(
            "/products/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
        .route("/products/{id}/stock", post(products::adjust_stock))
        .route(
            "/categories",
            get(categories::index).post(categories::create),
        )
        .route(
            "/categories/{id}",
            put(categories::update).delete(categories::destroy),
        )
        .route(
            "/admin-users",
            get(admin_users::index).post(admin_users::create),
        )
}

/// Create all routes for admin.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
}
