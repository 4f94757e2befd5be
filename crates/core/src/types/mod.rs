//! Core types for Dewdrop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod handle;
pub mod id;
pub mod price;
pub mod role;

pub use email::{Email, EmailError};
pub use handle::{Handle, HandleError};
pub use id::*;
pub use price::{CurrencyCode, Price, PriceError};
pub use role::{AdminRole, Permission};
