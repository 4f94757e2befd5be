//! Dewdrop Core - Shared types library.
//!
//! This crate provides common types used across all Dewdrop components:
//! - `storefront` - Public JSON API in front of Shopify and Sanity
//! - `admin` - Dashboard API with role-gated product management
//! - `cli` - Operator tooling
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, handles, prices and roles
//! - [`api`] - The `{success, data | error}` response envelope
//! - [`format`] - Display formatting helpers
//! - [`secret`] - Strength checks for configured secrets

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod format;
pub mod secret;
pub mod types;

pub use api::ApiResponse;
pub use types::*;
