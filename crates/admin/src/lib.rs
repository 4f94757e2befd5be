//! Dewdrop admin library.
//!
//! Dashboard API for the skincare catalog: password login, role and
//! permission checks, product/category management over an in-memory
//! catalog, and admin user management. Exposed as a library so the CLI can
//! reuse the catalog and password hashing, and the integration tests can
//! build the router directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod catalog;
pub mod config;
pub mod directory;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use app::build_router;
pub use state::AppState;
