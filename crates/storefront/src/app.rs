//! Router assembly.
//!
//! Kept separate from `main` so integration tests drive the same stack the
//! binary serves.

use std::time::Duration;

use axum::{Router, middleware::from_fn};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{
    cors_layer, create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::routes;
use crate::state::AppState;

/// Build the storefront router with its full middleware stack.
pub fn build_router(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());
    let cors = cors_layer(&state.config().cors_allowed_origins);

    routes::routes()
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use secrecy::SecretString;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{SanityConfig, ShopifyStorefrontConfig, StorefrontConfig};

    // Upstream hosts point at a closed port; these tests never reach them.
    fn router(cors_allowed_origins: Vec<String>) -> Router {
        let config = StorefrontConfig {
            host: [127, 0, 0, 1].into(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            cors_allowed_origins,
            shopify: ShopifyStorefrontConfig {
                store: "dewdrop-test.myshopify.com".to_string(),
                api_version: "2026-01".to_string(),
                storefront_token: SecretString::from("shpat_unit_test"),
                api_url: Some("http://127.0.0.1:9/graphql.json".to_string()),
            },
            sanity: SanityConfig {
                project_id: "dd7test".to_string(),
                dataset: "production".to_string(),
                api_version: "2025-02-19".to_string(),
                api_token: None,
                use_cdn: false,
                preview_secret: SecretString::from("p7Vq2Lm9Xc4Rt8Bn1Kw6Hy3Js5Fd0Ga"),
                api_host: Some("http://127.0.0.1:9".to_string()),
            },
            sentry_dsn: None,
            sentry_environment: None,
        };
        build_router(AppState::new(config))
    }

    #[tokio::test]
    async fn test_health() {
        let response = router(vec![])
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_draft_without_secret_is_unauthorized() {
        let response = router(vec![])
            .oneshot(Request::get("/api/draft?slug=/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_bad_query_parameter_uses_envelope() {
        let response = router(vec![])
            .oneshot(
                Request::get("/api/products?first=abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("first"));
    }

    #[tokio::test]
    async fn test_cors_echoes_listed_origin() {
        let response = router(vec!["https://dewdrop.shop".to_string()])
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "https://dewdrop.shop")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://dewdrop.shop"
        );
    }
}
