//! Integration tests for Dewdrop.
//!
//! Tests spawn the real admin and storefront routers on ephemeral ports and
//! talk to them over HTTP with `reqwest`, the same way a browser or the
//! dashboard frontend would. The storefront is pointed at in-process
//! Shopify and Sanity stand-ins from [`mocks`].
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p dewdrop-integration-tests
//! ```

pub mod mocks;

use std::net::{IpAddr, SocketAddr};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode, redirect};
use secrecy::SecretString;
use serde_json::Value;

use dewdrop_admin::config::{AdminConfig, BootstrapAdmin};
use dewdrop_admin::services::auth::hash_password;

/// Super admin created at startup by every spawned admin server.
pub const OWNER_EMAIL: &str = "owner@dewdrop.shop";
pub const OWNER_PASSWORD: &str = "Dewy-skin-2026";

/// Serve `router` on 127.0.0.1 with an OS-assigned port.
pub async fn spawn(router: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
            .expect("Test server error");
    });

    addr
}

/// Spawn an admin server over the seed catalog with the owner account.
pub async fn spawn_admin() -> SocketAddr {
    let hash = hash_password(OWNER_PASSWORD).expect("Failed to hash owner password");
    let bootstrap = BootstrapAdmin::new(OWNER_EMAIL, "Owner".to_string(), SecretString::from(hash))
        .expect("Invalid bootstrap admin");

    let config = AdminConfig {
        host: IpAddr::from([127, 0, 0, 1]),
        port: 0,
        base_url: "http://127.0.0.1".to_string(),
        bootstrap: Some(bootstrap),
        catalog_path: None,
        sentry_dsn: None,
        sentry_environment: None,
    };

    let state = dewdrop_admin::AppState::from_config(config)
        .await
        .expect("Failed to build admin state");
    spawn(dewdrop_admin::build_router(state)).await
}

/// HTTP client bound to one spawned server.
///
/// Keeps cookies, never follows redirects, and presents itself as
/// `client_ip` through `X-Forwarded-For` (the login rate limiter keys on it).
pub struct TestClient {
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestClient {
    pub fn new(addr: SocketAddr, client_ip: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_str(client_ip).expect("Invalid client IP header"),
        );
        Self::with_headers(addr, headers)
    }

    /// A client that connects directly, as if no proxy were in front.
    pub fn direct(addr: SocketAddr) -> Self {
        Self::with_headers(addr, HeaderMap::new())
    }

    fn with_headers(addr: SocketAddr, headers: HeaderMap) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    pub async fn post(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST request failed")
    }

    pub async fn put(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("PUT request failed")
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE request failed")
    }

    /// Log in and panic unless the server accepts the credentials.
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let resp = self
            .post(
                "/api/auth/login",
                &serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        let (status, body) = json_body(resp).await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body
    }
}

/// Logged-in owner session on a fresh admin server.
pub async fn owner_client(addr: SocketAddr) -> TestClient {
    let client = TestClient::new(addr, "203.0.113.10");
    client.login(OWNER_EMAIL, OWNER_PASSWORD).await;
    client
}

/// Create an admin with `role` through the owner session, then log in as
/// them from a separate client.
pub async fn client_with_role(addr: SocketAddr, owner: &TestClient, role: &str) -> TestClient {
    let email = format!("{role}@dewdrop.shop");
    let password = "Fresh-face-2026";

    let resp = owner
        .post(
            "/api/admin-users",
            &serde_json::json!({
                "email": email,
                "name": format!("{role} user"),
                "role": role,
                "password": password,
            }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let client = TestClient::new(addr, "203.0.113.20");
    client.login(&email, password).await;
    client
}

/// Status and parsed JSON body.
pub async fn json_body(resp: Response) -> (StatusCode, Value) {
    let status = resp.status();
    let body = resp.json().await.expect("Response body is not JSON");
    (status, body)
}

/// Assert the error envelope and return its message.
pub fn error_message(body: &Value) -> &str {
    assert_eq!(body["success"], false, "expected error envelope: {body}");
    assert!(body.get("data").is_none());
    body["error"].as_str().expect("error envelope has no message")
}
