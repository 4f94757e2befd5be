//! Dashboard route handlers.

use axum::extract::State;
use dewdrop_core::Permission;

use crate::middleware::RequireAdminAuth;
use crate::models::DashboardStats;
use crate::state::AppState;

use super::{ApiResult, ok};

/// Catalog statistics for the dashboard overview.
pub async fn stats(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> ApiResult<DashboardStats> {
    admin.require(Permission::ViewDashboard)?;
    ok(state.catalog().stats().await)
}
