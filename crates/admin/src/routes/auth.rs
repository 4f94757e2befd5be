//! Authentication route handlers.

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{
    OptionalAdminAuth, RequireAdminAuth, clear_current_admin, set_current_admin,
};
use crate::models::{CurrentAdmin, SessionInfo};
use crate::services::AuthService;
use crate::state::AppState;

use super::{ApiJson, ApiResult, ok};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub logged_out: bool,
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}

/// Log in with email and password.
///
/// The session ID is cycled so a pre-login cookie cannot be fixated.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ApiJson(body): ApiJson<LoginRequest>,
) -> ApiResult<SessionInfo> {
    let email = required(body.email, "email")?;
    let password = required(body.password, "password")?;

    let user = AuthService::new(state.directory())
        .login(&email, &password)
        .await?;

    session.cycle_id().await?;
    let admin = CurrentAdmin::from(&user);
    set_current_admin(&session, &admin).await?;
    set_sentry_user(admin.id.as_i32(), Some(admin.email.as_str()));

    ok(SessionInfo::from(admin))
}

/// Log out. Succeeds whether or not anyone was logged in.
#[instrument(skip_all)]
pub async fn logout(
    session: Session,
    OptionalAdminAuth(admin): OptionalAdminAuth,
) -> ApiResult<LogoutResponse> {
    if let Some(admin) = &admin {
        tracing::info!(admin_id = %admin.id, "Admin logged out");
    }
    clear_current_admin(&session).await?;
    session.flush().await?;
    clear_sentry_user();
    ok(LogoutResponse { logged_out: true })
}

/// The logged-in admin with the permissions their role grants.
pub async fn me(RequireAdminAuth(admin): RequireAdminAuth) -> ApiResult<SessionInfo> {
    ok(SessionInfo::from(admin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        assert!(required(None, "email").is_err());
        assert!(required(Some("   ".to_string()), "email").is_err());
        assert_eq!(
            required(Some("ops@dewdrop.shop".to_string()), "email").ok(),
            Some("ops@dewdrop.shop".to_string())
        );
    }
}
