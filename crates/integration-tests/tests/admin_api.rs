//! Admin API tests against a spawned dashboard server.
//!
//! Every test gets a fresh server over the seed catalog, so mutations do not
//! leak between tests.

use dewdrop_integration_tests::{
    OWNER_EMAIL, OWNER_PASSWORD, TestClient, client_with_role, error_message, json_body,
    owner_client, spawn_admin,
};
use reqwest::StatusCode;
use reqwest::header::SET_COOKIE;
use serde_json::{Value, json};

fn new_product() -> Value {
    json!({
        "name": "Rose Hydrating Toner",
        "description": "Alcohol-free toner with rose water.",
        "price": "22.00",
        "category_id": 1,
        "skin_concerns": ["dryness"],
        "ingredients": ["rose water", "glycerin"],
        "stock": 40,
        "status": "active"
    })
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_health_is_public() {
    let client = TestClient::new(spawn_admin().await, "203.0.113.1");
    let (status, body) = json_body(client.get("/health").await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_login_returns_session_info() {
    let client = TestClient::new(spawn_admin().await, "203.0.113.1");
    let resp = client
        .post(
            "/api/auth/login",
            &json!({ "email": "Owner@Dewdrop.shop", "password": OWNER_PASSWORD }),
        )
        .await;

    let cookie = resp
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .expect("login sets a session cookie");
    assert!(cookie.starts_with("dd_admin_session="));
    assert!(cookie.contains("HttpOnly"));

    let (status, body) = json_body(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], OWNER_EMAIL);
    assert_eq!(body["data"]["role"], "super_admin");
    assert!(
        body["data"]["permissions"]
            .as_array()
            .expect("permissions")
            .contains(&json!("manage_users"))
    );
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let client = TestClient::new(spawn_admin().await, "203.0.113.1");

    let (status, wrong_password) = json_body(
        client
            .post(
                "/api/auth/login",
                &json!({ "email": OWNER_EMAIL, "password": "Not-the-password-1" }),
            )
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown_user) = json_body(
        client
            .post(
                "/api/auth/login",
                &json!({ "email": "nobody@dewdrop.shop", "password": OWNER_PASSWORD }),
            )
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&wrong_password), "Invalid email or password");
    assert_eq!(error_message(&wrong_password), error_message(&unknown_user));
}

#[tokio::test]
async fn test_login_requires_fields() {
    let client = TestClient::new(spawn_admin().await, "203.0.113.1");
    let (status, body) = json_body(
        client
            .post("/api/auth/login", &json!({ "email": OWNER_EMAIL }))
            .await,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "password is required");
}

#[tokio::test]
async fn test_login_without_proxy_headers_uses_peer_address() {
    let client = TestClient::direct(spawn_admin().await);
    client.login(OWNER_EMAIL, OWNER_PASSWORD).await;

    let (status, body) = json_body(client.get("/api/auth/me").await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], OWNER_EMAIL);
}

#[tokio::test]
async fn test_login_is_rate_limited_per_client() {
    let addr = spawn_admin().await;
    let client = TestClient::new(addr, "203.0.113.99");
    // Incomplete bodies fail fast, so the whole burst lands inside one refill
    let incomplete = json!({ "email": OWNER_EMAIL });

    let mut statuses = Vec::new();
    for _ in 0..6 {
        statuses.push(client.post("/api/auth/login", &incomplete).await.status());
    }
    assert!(statuses[..5].iter().all(|s| *s == StatusCode::BAD_REQUEST));
    assert_eq!(statuses[5], StatusCode::TOO_MANY_REQUESTS);

    // Other clients keep their own budget
    let other = TestClient::new(addr, "203.0.113.100");
    other.login(OWNER_EMAIL, OWNER_PASSWORD).await;
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    let client = TestClient::new(spawn_admin().await, "203.0.113.1");

    for path in ["/api/auth/me", "/api/products", "/api/dashboard/stats"] {
        let (status, body) = json_body(client.get(path).await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(error_message(&body), "Authentication required");
    }
}

#[tokio::test]
async fn test_me_and_logout() {
    let client = owner_client(spawn_admin().await).await;

    let (status, body) = json_body(client.get("/api/auth/me").await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Owner");

    let (status, body) = json_body(client.post("/api/auth/logout", &json!({})).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["logged_out"], true);

    let resp = client.get("/api/auth/me").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_security_headers() {
    let client = TestClient::new(spawn_admin().await, "203.0.113.1");
    let resp = client.get("/health").await;
    let headers = resp.headers();

    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["cache-control"], "no-store");
    assert!(headers.contains_key("x-request-id"));
}

// ============================================================================
// Roles & permissions
// ============================================================================

#[tokio::test]
async fn test_viewer_can_read_but_not_write() {
    let addr = spawn_admin().await;
    let owner = owner_client(addr).await;
    let viewer = client_with_role(addr, &owner, "viewer").await;

    let (status, body) = json_body(viewer.get("/api/auth/me").await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["permissions"],
        json!(["view_dashboard", "view_products"])
    );

    assert_eq!(viewer.get("/api/products").await.status(), StatusCode::OK);
    assert_eq!(
        viewer.get("/api/dashboard/stats").await.status(),
        StatusCode::OK
    );

    let (status, body) = json_body(viewer.post("/api/products", &new_product()).await).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_message(&body), "Missing permission: edit_products");

    let resp = viewer.delete("/api/products/1").await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = viewer.get("/api/admin-users").await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_editor_cannot_delete_or_manage_categories() {
    let addr = spawn_admin().await;
    let owner = owner_client(addr).await;
    let editor = client_with_role(addr, &owner, "editor").await;

    let resp = editor.post("/api/products", &new_product()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = editor.delete("/api/products/1").await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = editor
        .post("/api/categories", &json!({ "name": "Toners" }))
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_users_create_and_list() {
    let owner = owner_client(spawn_admin().await).await;

    let (status, body) = json_body(
        owner
            .post(
                "/api/admin-users",
                &json!({
                    "email": "Editor@Dewdrop.shop",
                    "name": "Eddie",
                    "role": "editor",
                    "password": "Serum-lover-2026"
                }),
            )
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "editor@dewdrop.shop");
    assert!(body["data"].get("password_hash").is_none());

    let (status, body) = json_body(
        owner
            .post(
                "/api/admin-users",
                &json!({ "email": "editor@dewdrop.shop", "name": "Again", "password": "Serum-lover-2026" }),
            )
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(error_message(&body).contains("already exists"));

    let resp = owner
        .post(
            "/api/admin-users",
            &json!({ "email": "weak@dewdrop.shop", "name": "Weak", "password": "short" }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (_, body) = json_body(owner.get("/api/admin-users").await).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_product_list_filters_and_paginates() {
    let owner = owner_client(spawn_admin().await).await;

    let (status, body) = json_body(owner.get("/api/products").await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 8);
    assert_eq!(body["data"]["page"], 1);

    let (_, body) = json_body(owner.get("/api/products?status=draft").await).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["handle"], "overnight-repair-mask");

    let (_, body) = json_body(
        owner
            .get("/api/products?sort=price&order=desc&per_page=3&page=2")
            .await,
    )
    .await;
    assert_eq!(body["data"]["per_page"], 3);
    assert_eq!(body["data"]["total_pages"], 3);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(3));

    let (_, body) = json_body(owner.get("/api/products?search=SERUM").await).await;
    assert_eq!(body["data"]["total"], 3);

    let (status, body) = json_body(owner.get("/api/products?status=sold_out").await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    error_message(&body);
}

#[tokio::test]
async fn test_product_lookup() {
    let owner = owner_client(spawn_admin().await).await;

    let (status, body) = json_body(owner.get("/api/products/2").await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["handle"], "vitamin-c-brightening-serum");
    assert_eq!(body["data"]["price"], "48.00");

    let (status, body) = json_body(
        owner
            .get("/api/products/handle/vitamin-c-brightening-serum")
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 2);

    let (status, body) = json_body(owner.get("/api/products/999").await).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "Product not found: 999");

    let resp = owner.get("/api/products/handle/no-such-product").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = owner.get("/api/products/handle/Not_A_Handle").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (status, body) = json_body(owner.get("/api/products/abc").await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    error_message(&body);
}

#[tokio::test]
async fn test_create_product() {
    let owner = owner_client(spawn_admin().await).await;

    let (status, body) = json_body(owner.post("/api/products", &new_product()).await).await;
    assert_eq!(status, StatusCode::CREATED);
    let product = &body["data"];
    assert_eq!(product["id"], 9);
    assert_eq!(product["handle"], "rose-hydrating-toner");
    assert_eq!(product["price"], "22.00");

    // Same name again gets a suffixed handle
    let (status, body) = json_body(owner.post("/api/products", &new_product()).await).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["handle"], "rose-hydrating-toner-2");

    let (_, body) = json_body(owner.get("/api/dashboard/stats").await).await;
    assert_eq!(body["data"]["total_products"], 10);
}

#[tokio::test]
async fn test_create_product_validation() {
    let owner = owner_client(spawn_admin().await).await;

    let mut blank_name = new_product();
    blank_name["name"] = json!("   ");
    let (status, body) = json_body(owner.post("/api/products", &blank_name).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("name"));

    for price in ["0", "-5.00", "9.999", "79228162514264337593543950335"] {
        let mut bad_price = new_product();
        bad_price["price"] = json!(price);
        let (status, body) = json_body(owner.post("/api/products", &bad_price).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "price {price}");
        assert!(error_message(&body).contains("price"));
    }

    let mut negative_stock = new_product();
    negative_stock["stock"] = json!(-1);
    let resp = owner.post("/api/products", &negative_stock).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let mut missing_category = new_product();
    missing_category["category_id"] = json!(42);
    let (status, body) = json_body(owner.post("/api/products", &missing_category).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "category_id 42 does not exist");

    let mut taken_handle = new_product();
    taken_handle["handle"] = json!("clay-detox-mask");
    let resp = owner.post("/api/products", &taken_handle).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = owner
        .client
        .post(owner.url("/api/products"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("request failed");
    let (status, body) = json_body(resp).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    error_message(&body);

    let (_, body) = json_body(owner.get("/api/products").await).await;
    assert_eq!(body["data"]["total"], 8);
}

#[tokio::test]
async fn test_update_product() {
    let owner = owner_client(spawn_admin().await).await;

    let (status, body) = json_body(
        owner
            .put(
                "/api/products/1",
                &json!({ "name": "Gentle Gel Cleanser", "price": "26.50", "compare_at_price": null }),
            )
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Gentle Gel Cleanser");
    assert_eq!(body["data"]["price"], "26.50");
    // Renaming keeps the handle so storefront links survive
    assert_eq!(body["data"]["handle"], "gentle-foaming-cleanser");

    // A failed update leaves the product untouched
    let resp = owner
        .put("/api/products/1", &json!({ "name": "Renamed", "price": "0" }))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let (_, body) = json_body(owner.get("/api/products/1").await).await;
    assert_eq!(body["data"]["name"], "Gentle Gel Cleanser");

    let resp = owner
        .put("/api/products/1", &json!({ "handle": "vitamin-c-brightening-serum" }))
        .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = owner.put("/api/products/999", &json!({ "stock": 1 })).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_adjust_stock() {
    let owner = owner_client(spawn_admin().await).await;

    let (status, body) = json_body(
        owner
            .post("/api/products/3/stock", &json!({ "delta": 5 }))
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stock"], 12);

    let (status, body) = json_body(
        owner
            .post("/api/products/3/stock", &json!({ "delta": -20 }))
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).starts_with("Insufficient stock"));

    let (_, body) = json_body(owner.get("/api/products/3").await).await;
    assert_eq!(body["data"]["stock"], 12);
}

#[tokio::test]
async fn test_delete_and_bulk_delete() {
    let owner = owner_client(spawn_admin().await).await;

    let (status, body) = json_body(owner.delete("/api/products/8").await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["handle"], "clay-detox-mask");

    let resp = owner.delete("/api/products/8").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let (status, body) = json_body(
        owner
            .post("/api/products/bulk-delete", &json!({ "ids": [6, 7, 8, 999] }))
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"], 2);

    let resp = owner
        .post("/api/products/bulk-delete", &json!({ "ids": [] }))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (_, body) = json_body(owner.get("/api/products").await).await;
    assert_eq!(body["data"]["total"], 5);
}

// ============================================================================
// Categories
// ============================================================================

#[tokio::test]
async fn test_categories_lifecycle() {
    let owner = owner_client(spawn_admin().await).await;

    let (status, body) = json_body(owner.get("/api/categories").await).await;
    assert_eq!(status, StatusCode::OK);
    let categories = body["data"].as_array().expect("categories");
    assert_eq!(categories.len(), 5);
    assert_eq!(categories[0]["name"], "Cleansers");
    assert_eq!(categories[0]["product_count"], 1);

    let (status, body) = json_body(
        owner
            .post(
                "/api/categories",
                &json!({ "name": "Toners", "description": "Balancing mists" }),
            )
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["handle"], "toners");
    let toners_id = body["data"]["id"].as_i64().expect("category id");

    let (status, body) = json_body(
        owner
            .put(
                &format!("/api/categories/{toners_id}"),
                &json!({ "name": "Toners & Mists" }),
            )
            .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Toners & Mists");

    let resp = owner
        .post("/api/categories", &json!({ "name": "More", "handle": "serums" }))
        .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = owner.delete(&format!("/api/categories/{toners_id}")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = owner.delete(&format!("/api/categories/{toners_id}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_in_use_cannot_be_deleted() {
    let owner = owner_client(spawn_admin().await).await;

    let (status, body) = json_body(owner.delete("/api/categories/2").await).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_message(&body), "Category 2 is used by 3 product(s)");

    let (_, body) = json_body(owner.get("/api/categories").await).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(5));
}

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
async fn test_dashboard_stats() {
    let owner = owner_client(spawn_admin().await).await;
    let (status, body) = json_body(owner.get("/api/dashboard/stats").await).await;

    assert_eq!(status, StatusCode::OK);
    let stats = &body["data"];
    assert_eq!(stats["total_products"], 8);
    assert_eq!(stats["active_products"], 6);
    assert_eq!(stats["draft_products"], 1);
    assert_eq!(stats["archived_products"], 1);
    assert_eq!(stats["total_categories"], 5);
    assert!(
        stats["inventory_value_display"]
            .as_str()
            .is_some_and(|v| v.starts_with('$'))
    );
}
