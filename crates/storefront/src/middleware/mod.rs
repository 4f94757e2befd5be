//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction per route)
//! 2. `TraceLayer` (request span)
//! 3. Request ID
//! 4. CORS
//! 5. Security headers
//! 6. Session layer (draft-mode flag)

pub mod cors;
pub mod draft_mode;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use cors::cors_layer;
pub use draft_mode::{DraftMode, disable_draft_mode, enable_draft_mode};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
