//! Category management route handlers.

use axum::extract::State;
use dewdrop_core::{CategoryId, Permission};
use tracing::instrument;

use crate::middleware::RequireAdminAuth;
use crate::models::{Category, CategorySummary, CategoryUpdate, NewCategory};
use crate::state::AppState;

use super::{ApiJson, ApiPath, ApiResult, CreatedResult, created, ok};

/// Categories with product counts, sorted by name.
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> ApiResult<Vec<CategorySummary>> {
    admin.require(Permission::ViewProducts)?;
    ok(state.catalog().list_categories().await)
}

#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    ApiJson(input): ApiJson<NewCategory>,
) -> CreatedResult<Category> {
    admin.require(Permission::ManageCategories)?;
    created(state.catalog().create_category(input).await?)
}

#[instrument(skip_all, fields(admin_id = %admin.id, category_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    ApiPath(id): ApiPath<CategoryId>,
    ApiJson(update): ApiJson<CategoryUpdate>,
) -> ApiResult<Category> {
    admin.require(Permission::ManageCategories)?;
    ok(state.catalog().update_category(id, update).await?)
}

#[instrument(skip_all, fields(admin_id = %admin.id, category_id = %id))]
pub async fn destroy(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    ApiPath(id): ApiPath<CategoryId>,
) -> ApiResult<Category> {
    admin.require(Permission::ManageCategories)?;
    ok(state.catalog().delete_category(id).await?)
}
