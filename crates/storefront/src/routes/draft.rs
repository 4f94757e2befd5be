//! Draft-mode (CMS preview) toggles.
//!
//! The CMS links editors to `/api/draft?secret=...&slug=/products/x`. A
//! matching secret sets the session flag and redirects to the slug.

use axum::{extract::State, response::Redirect};
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use serde::Deserialize;
use sha2::Sha256;
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::middleware::{disable_draft_mode, enable_draft_mode};
use crate::state::AppState;

use super::ApiQuery;

#[derive(Debug, Deserialize)]
pub struct EnableQuery {
    pub secret: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DisableQuery {
    pub slug: Option<String>,
}

/// Compare secrets without leaking length or prefix timing.
fn secrets_match(provided: &str, expected: &str) -> bool {
    let Ok(mut expected_mac) = Hmac::<Sha256>::new_from_slice(expected.as_bytes()) else {
        return false;
    };
    expected_mac.update(expected.as_bytes());
    let expected_tag = expected_mac.finalize().into_bytes();

    let Ok(mut provided_mac) = Hmac::<Sha256>::new_from_slice(expected.as_bytes()) else {
        return false;
    };
    provided_mac.update(provided.as_bytes());
    provided_mac.verify_slice(&expected_tag).is_ok()
}

/// Validate a redirect target. Only site-relative paths are allowed so the
/// endpoint cannot be used as an open redirect.
fn redirect_target(slug: Option<&str>) -> Result<String> {
    let slug = slug.map(str::trim).filter(|s| !s.is_empty()).unwrap_or("/");

    if !slug.starts_with('/') || slug.starts_with("//") || slug.contains('\\') {
        return Err(AppError::BadRequest(
            "slug must be a site-relative path".to_string(),
        ));
    }

    Ok(slug.to_string())
}

/// Enable draft mode and redirect to the previewed page.
pub async fn enable(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(query): ApiQuery<EnableQuery>,
) -> Result<Redirect> {
    let expected = state.config().sanity.preview_secret.expose_secret();
    let authorized = query
        .secret
        .as_deref()
        .is_some_and(|secret| secrets_match(secret, expected));

    if !authorized {
        tracing::warn!("Draft mode requested with invalid secret");
        return Err(AppError::Unauthorized("Invalid preview secret".to_string()));
    }

    let target = redirect_target(query.slug.as_deref())?;

    // New session id so a pre-set cookie cannot be promoted to preview.
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to cycle session: {e}")))?;
    enable_draft_mode(&session)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to enable draft mode: {e}")))?;

    tracing::info!(slug = %target, "Draft mode enabled");
    Ok(Redirect::temporary(&target))
}

/// Disable draft mode and redirect back.
pub async fn disable(
    session: Session,
    ApiQuery(query): ApiQuery<DisableQuery>,
) -> Result<Redirect> {
    let target = redirect_target(query.slug.as_deref())?;

    disable_draft_mode(&session)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to disable draft mode: {e}")))?;

    Ok(Redirect::temporary(&target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_match() {
        let secret = "k3Jd9aP0qZx7Lm2Nv8Bc4Rt6Yw1Ue5Hs";
        assert!(secrets_match(secret, secret));
        assert!(!secrets_match("k3Jd9aP0qZx7Lm2Nv8Bc4Rt6Yw1Ue5H", secret));
        assert!(!secrets_match("", secret));
    }

    #[test]
    fn test_redirect_target() {
        assert_eq!(redirect_target(None).ok().as_deref(), Some("/"));
        assert_eq!(redirect_target(Some("  ")).ok().as_deref(), Some("/"));
        assert_eq!(
            redirect_target(Some("/products/rose-serum")).ok().as_deref(),
            Some("/products/rose-serum")
        );
        assert!(redirect_target(Some("https://evil.example")).is_err());
        assert!(redirect_target(Some("//evil.example")).is_err());
        assert!(redirect_target(Some("/\\evil.example")).is_err());
    }
}
