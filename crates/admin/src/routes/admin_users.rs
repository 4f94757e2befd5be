//! Admin user management route handlers (super admin only).

use axum::extract::State;
use dewdrop_core::Permission;
use tracing::instrument;

use crate::middleware::RequireAdminAuth;
use crate::models::{AdminUserView, NewAdminUser};
use crate::services::AuthService;
use crate::state::AppState;

use super::{ApiJson, ApiResult, CreatedResult, created, ok};

pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> ApiResult<Vec<AdminUserView>> {
    admin.require(Permission::ManageUsers)?;
    ok(state.directory().list().await)
}

/// Create an admin user. Role defaults to viewer.
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    ApiJson(input): ApiJson<NewAdminUser>,
) -> CreatedResult<AdminUserView> {
    admin.require(Permission::ManageUsers)?;
    let user = AuthService::new(state.directory())
        .create_user(input)
        .await?;
    created(AdminUserView::from(&user))
}
