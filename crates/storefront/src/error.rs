//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Errors are rendered as the
//! `{ "success": false, "error": "..." }` envelope; upstream and internal
//! failures are captured to Sentry and replaced by a generic message.

use axum::{
    Json,
    extract::rejection::{PathRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use dewdrop_core::ApiResponse;
use thiserror::Error;

use crate::sanity::SanityError;
use crate::shopify::ShopifyError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),

    #[error("Sanity error: {0}")]
    Sanity(#[from] SanityError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Shopify(ShopifyError::NotFound(_)) | Self::Sanity(SanityError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::Shopify(ShopifyError::RateLimited(_)) => StatusCode::TOO_MANY_REQUESTS,
            Self::Shopify(_) | Self::Sanity(SanityError::Api { .. } | SanityError::Http(_)) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Sanity(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message shown to the client.
    fn public_message(&self) -> String {
        match self {
            Self::Shopify(ShopifyError::NotFound(msg))
            | Self::Sanity(SanityError::NotFound(msg))
            | Self::NotFound(msg) => msg.clone(),
            Self::Shopify(ShopifyError::RateLimited(_)) => {
                "Too many requests, please try again shortly".to_string()
            }
            Self::Shopify(_) | Self::Sanity(_) => "External service error".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Unauthorized(msg) | Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = Json(ApiResponse::<()>::error(self.public_message()));
        let mut response = (status, body).into_response();

        if let Self::Shopify(ShopifyError::RateLimited(seconds)) = &self
            && let Ok(value) = HeaderValue::from_str(&seconds.to_string())
        {
            response.headers_mut().insert(RETRY_AFTER, value);
        }

        response
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Shopify(ShopifyError::NotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Sanity(SanityError::NotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Shopify(ShopifyError::RateLimited(2)).status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::Sanity(SanityError::Api {
                status: 400,
                message: "bad query".into()
            })
            .status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Sanity(SanityError::MissingToken).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_upstream_details_hidden() {
        let err = AppError::Sanity(SanityError::Api {
            status: 401,
            message: "token abc rejected".into(),
        });
        assert_eq!(err.public_message(), "External service error");
    }
}
