//! Sanity content API client.
//!
//! Content (categories, skin concerns, homepage, banners, global site
//! copy) lives in Sanity and is read over the HTTP query API with GROQ.
//! Published reads go through the CDN and are cached for a minute; draft
//! reads hit the live API with a token and are never cached.

mod client;
pub mod queries;
pub mod types;

pub use client::SanityClient;
pub use types::*;

use core::fmt;

use thiserror::Error;

/// Errors that can occur when querying Sanity.
#[derive(Debug, Error)]
pub enum SanityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Sanity answered with an error document.
    #[error("Sanity API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Draft reads need `SANITY_API_TOKEN`.
    #[error("Draft content requested but no Sanity API token is configured")]
    MissingToken,
}

/// Which version of documents a query sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Perspective {
    #[default]
    Published,
    /// Drafts overlaid on published documents (preview).
    Drafts,
}

impl Perspective {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Drafts => "drafts",
        }
    }

    /// Perspective for a request, given whether draft mode is on.
    #[must_use]
    pub const fn for_draft_mode(enabled: bool) -> Self {
        if enabled { Self::Drafts } else { Self::Published }
    }
}

impl fmt::Display for Perspective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
