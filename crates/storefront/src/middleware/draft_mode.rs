//! Draft-mode extractor.
//!
//! Draft mode is a session flag set by `/api/draft`. While it is on,
//! content reads use the Sanity `drafts` perspective.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::sanity::Perspective;

/// Session key for the draft-mode flag.
pub const DRAFT_MODE_KEY: &str = "draft_mode";

/// Whether the current request is in draft mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftMode(pub bool);

impl DraftMode {
    #[must_use]
    pub const fn perspective(self) -> Perspective {
        Perspective::for_draft_mode(self.0)
    }
}

impl<S> FromRequestParts<S> for DraftMode
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let enabled = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<bool>(DRAFT_MODE_KEY)
                .await
                .ok()
                .flatten()
                .unwrap_or(false),
            None => false,
        };

        Ok(Self(enabled))
    }
}

/// Turn draft mode on for this session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn enable_draft_mode(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.insert(DRAFT_MODE_KEY, true).await
}

/// Turn draft mode off for this session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn disable_draft_mode(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<bool>(DRAFT_MODE_KEY).await?;
    Ok(())
}
