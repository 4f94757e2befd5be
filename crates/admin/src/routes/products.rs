//! Product management route handlers.

use axum::extract::State;
use dewdrop_core::api::Paginated;
use dewdrop_core::{Handle, Permission, ProductId};
use serde::Serialize;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::RequireAdminAuth;
use crate::models::{
    BulkDelete, NewProduct, Product, ProductFilter, ProductUpdate, StockAdjustment,
};
use crate::state::AppState;

use super::{ApiJson, ApiPath, ApiQuery, ApiResult, CreatedResult, created, ok};

#[derive(Debug, Serialize)]
pub struct BulkDeleteResult {
    pub deleted: usize,
}

/// List products with filters, sorting and pagination.
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    ApiQuery(filter): ApiQuery<ProductFilter>,
) -> ApiResult<Paginated<Product>> {
    admin.require(Permission::ViewProducts)?;
    ok(state.catalog().list_products(&filter).await)
}

pub async fn show(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    ApiPath(id): ApiPath<ProductId>,
) -> ApiResult<Product> {
    admin.require(Permission::ViewProducts)?;
    ok(state.catalog().get_product(id).await?)
}

/// Look a product up by its handle. Malformed handles are a 400.
pub async fn show_by_handle(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    ApiPath(handle): ApiPath<String>,
) -> ApiResult<Product> {
    admin.require(Permission::ViewProducts)?;
    let handle =
        Handle::parse(&handle).map_err(|e| AppError::BadRequest(format!("Invalid handle: {e}")))?;
    ok(state.catalog().get_product_by_handle(&handle).await?)
}

#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    ApiJson(input): ApiJson<NewProduct>,
) -> CreatedResult<Product> {
    admin.require(Permission::EditProducts)?;
    created(state.catalog().create_product(input).await?)
}

#[instrument(skip_all, fields(admin_id = %admin.id, product_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    ApiPath(id): ApiPath<ProductId>,
    ApiJson(update): ApiJson<ProductUpdate>,
) -> ApiResult<Product> {
    admin.require(Permission::EditProducts)?;
    ok(state.catalog().update_product(id, update).await?)
}

/// Delete a product, returning the removed record.
#[instrument(skip_all, fields(admin_id = %admin.id, product_id = %id))]
pub async fn destroy(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    ApiPath(id): ApiPath<ProductId>,
) -> ApiResult<Product> {
    admin.require(Permission::DeleteProducts)?;
    ok(state.catalog().delete_product(id).await?)
}

/// Delete every listed product that exists.
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn bulk_delete(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    ApiJson(body): ApiJson<BulkDelete>,
) -> ApiResult<BulkDeleteResult> {
    admin.require(Permission::DeleteProducts)?;
    if body.ids.is_empty() {
        return Err(AppError::BadRequest("ids must not be empty".to_string()));
    }
    let deleted = state.catalog().delete_products(&body.ids).await;
    ok(BulkDeleteResult { deleted })
}

#[instrument(skip_all, fields(admin_id = %admin.id, product_id = %id))]
pub async fn adjust_stock(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    ApiPath(id): ApiPath<ProductId>,
    ApiJson(body): ApiJson<StockAdjustment>,
) -> ApiResult<Product> {
    admin.require(Permission::EditProducts)?;
    ok(state.catalog().adjust_stock(id, body.delta).await?)
}
