//! Dewdrop storefront library.
//!
//! JSON API over the Shopify Storefront API (products, collections) and
//! Sanity (categories, skin concerns, page content), with a CMS preview
//! toggle. Exposed as a library so the integration tests can build the
//! router directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod sanity;
pub mod shopify;
pub mod state;

pub use app::build_router;
pub use state::AppState;
