//! In-process stand-ins for Shopify and Sanity.
//!
//! Just enough of each API for the storefront to exercise its clients: the
//! Shopify mock answers the three Storefront GraphQL operations by
//! `operationName`, the Sanity mock answers GROQ queries by document type.
//! Draft reads return titles suffixed with ` (draft)`.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use axum::{
    Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use secrecy::SecretString;
use serde_json::{Value, json};

use dewdrop_storefront::config::{SanityConfig, ShopifyStorefrontConfig, StorefrontConfig};

use crate::spawn;

pub const SHOPIFY_TOKEN: &str = "shpat_test_storefront_token";
pub const SANITY_TOKEN: &str = "sk_test_sanity_read_token";
pub const PREVIEW_SECRET: &str = "p7Vq2Lm9Xc4Rt8Bn1Kw6Hy3Js5Fd0Ga";
pub const SANITY_API_VERSION: &str = "2025-02-19";

/// Product handle that makes the Shopify mock answer 429.
pub const RATE_LIMITED_HANDLE: &str = "rate-limited";

/// Products the Shopify mock knows, in catalog order.
pub const PRODUCT_HANDLES: &[&str] = &[
    "gentle-foaming-cleanser",
    "vitamin-c-brightening-serum",
    "niacinamide-pore-serum",
];

// =============================================================================
// Shopify
// =============================================================================

fn title_for(handle: &str) -> String {
    handle
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn money(amount: &str) -> Value {
    json!({ "amount": amount, "currencyCode": "USD" })
}

fn raw_product(position: usize, handle: &str) -> Value {
    let (price, compare_at) = match handle {
        "vitamin-c-brightening-serum" => ("48.0", Some("56.0")),
        "niacinamide-pore-serum" => ("32.0", None),
        _ => ("24.0", None),
    };
    let compare_at_range = compare_at.map(|amount| {
        json!({ "minVariantPrice": money(amount), "maxVariantPrice": money(amount) })
    });

    json!({
        "id": format!("gid://shopify/Product/{}", position + 1),
        "handle": handle,
        "title": title_for(handle),
        "description": "Made for sensitive skin.",
        "descriptionHtml": "<p>Made for sensitive skin.</p>",
        "vendor": "Dewdrop",
        "productType": "Skincare",
        "tags": ["vegan", "fragrance-free"],
        "availableForSale": handle != "niacinamide-pore-serum",
        "priceRange": { "minVariantPrice": money(price), "maxVariantPrice": money(price) },
        "compareAtPriceRange": compare_at_range,
        "featuredImage": {
            "url": format!("https://cdn.shopify.com/s/files/{handle}.jpg"),
            "altText": null,
            "width": 1200,
            "height": 1200
        },
        "images": { "nodes": [] },
        "variants": { "nodes": [{
            "id": format!("gid://shopify/ProductVariant/{}", position + 1),
            "title": "30ml",
            "sku": format!("DD-{}", position + 1),
            "availableForSale": true,
            "quantityAvailable": 12,
            "price": money(price),
            "compareAtPrice": compare_at.map(money),
            "selectedOptions": [{ "name": "Size", "value": "30ml" }]
        }]},
        "seo": { "title": null, "description": null }
    })
}

fn raw_connection(handles: &[&str], first: usize, after: Option<&str>) -> Value {
    let start = after
        .and_then(|cursor| cursor.strip_prefix("cursor-"))
        .and_then(|n| n.parse::<usize>().ok())
        .unwrap_or(0);
    let end = (start + first).min(handles.len());
    let nodes: Vec<Value> = handles
        .get(start..end)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(offset, handle)| raw_product(start + offset, handle))
        .collect();

    json!({
        "nodes": nodes,
        "pageInfo": {
            "hasNextPage": end < handles.len(),
            "endCursor": (end > start).then(|| format!("cursor-{end}")),
        }
    })
}

fn shopify_data(body: &Value) -> Result<Value, Response> {
    let variables = &body["variables"];
    let first = variables["first"]
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(10);
    let after = variables["after"].as_str();

    match body["operationName"].as_str() {
        Some("GetProducts") => {
            let handles: Vec<&str> = match variables["query"].as_str() {
                Some(search) => PRODUCT_HANDLES
                    .iter()
                    .copied()
                    .filter(|handle| handle.contains(search))
                    .collect(),
                None => PRODUCT_HANDLES.to_vec(),
            };
            Ok(json!({ "products": raw_connection(&handles, first, after) }))
        }
        Some("GetProductByHandle") => match variables["handle"].as_str() {
            Some(RATE_LIMITED_HANDLE) => Err((
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, "7")],
                "Throttled",
            )
                .into_response()),
            Some(handle) => {
                let product = PRODUCT_HANDLES
                    .iter()
                    .position(|known| *known == handle)
                    .map(|position| raw_product(position, handle));
                Ok(json!({ "product": product }))
            }
            None => Ok(json!({ "product": null })),
        },
        Some("GetCollectionProducts") => match variables["handle"].as_str() {
            Some("serums") => Ok(json!({ "collection": {
                "id": "gid://shopify/Collection/2",
                "handle": "serums",
                "title": "Serums",
                "description": "Targeted treatments",
                "image": null,
                "products": raw_connection(
                    &["vitamin-c-brightening-serum", "niacinamide-pore-serum"],
                    first,
                    after,
                ),
            }})),
            _ => Ok(json!({ "collection": null })),
        },
        other => Ok(json!({ "errors": [{ "message": format!("Unknown operation {other:?}") }] })),
    }
}

async fn shopify_graphql(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let token = headers
        .get("shopify-storefront-private-token")
        .and_then(|v| v.to_str().ok());
    if token != Some(SHOPIFY_TOKEN) {
        return (StatusCode::UNAUTHORIZED, "Invalid storefront token").into_response();
    }

    match shopify_data(&body) {
        Ok(data) if data.get("errors").is_some() => Json(data).into_response(),
        Ok(data) => Json(json!({ "data": data })).into_response(),
        Err(response) => response,
    }
}

/// Spawn the Shopify mock; the GraphQL endpoint is `http://{addr}/graphql.json`.
pub async fn spawn_shopify() -> SocketAddr {
    spawn(Router::new().route("/graphql.json", post(shopify_graphql))).await
}

// =============================================================================
// Sanity
// =============================================================================

fn title(base: &str, drafts: bool) -> String {
    if drafts {
        format!("{base} (draft)")
    } else {
        base.to_string()
    }
}

fn category(slug: &str, drafts: bool) -> Value {
    match slug {
        "serums" => json!({
            "id": "cat-serums",
            "title": title("Serums", drafts),
            "slug": "serums",
            "description": "Targeted treatments",
            "imageRef": "image-Tb9Ew8CXIwaY6R1k-800x800-jpg",
            "imageAlt": "Serum bottles",
            "shopifyCollectionHandle": "serums"
        }),
        "cleansers" => json!({
            "id": "cat-cleansers",
            "title": title("Cleansers", drafts),
            "slug": "cleansers",
            "description": null,
            "shopifyCollectionHandle": null
        }),
        _ => Value::Null,
    }
}

fn sanity_result(query: &str, params: &HashMap<String, String>, drafts: bool) -> Value {
    if query.contains(r#"_type == "category" && slug.current == $slug"#) {
        let slug: String = params
            .get("$slug")
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();
        category(&slug, drafts)
    } else if query.contains(r#"_type == "category""#) {
        json!([category("cleansers", drafts), category("serums", drafts)])
    } else if query.contains(r#"_type == "skinConcern""#) {
        json!([
            { "id": "sc-acne", "title": title("Acne", drafts), "slug": "acne", "description": null, "icon": "droplet" },
            { "id": "sc-dryness", "title": "Dryness", "slug": "dryness", "description": "Tight, flaky skin", "icon": null }
        ])
    } else if query.contains(r#"_type == "homepage""#) {
        json!({
            "heroTitle": title("Glow, gently", drafts),
            "heroSubtitle": "Clinical skincare without the sting",
            "heroImageRef": "image-H3r0Img-1600x900-png",
            "heroImageAlt": "Morning routine",
            "heroCtaLabel": "Shop serums",
            "heroCtaLink": "/categories/serums",
            "featuredProductHandles": ["vitamin-c-brightening-serum", "discontinued-toner"],
            "sections": [
                { "key": "s1", "kind": "textBlock", "heading": "Our promise", "body": "Fragrance free.", "link": null }
            ]
        })
    } else if query.contains(r#"_type == "banner""#) {
        json!([
            { "id": "b-live", "title": "Free shipping over $50", "message": null, "link": "/products",
              "active": true, "startDate": "2020-01-01T00:00:00Z", "endDate": null },
            { "id": "b-winter", "title": "Winter barrier kit", "message": "While stocks last", "link": "/collections/serums",
              "active": true, "startDate": "2020-11-01T00:00:00Z", "endDate": "2099-01-05T00:00:00Z" },
            { "id": "b-expired", "title": "Spring sale", "message": null, "link": null,
              "active": true, "startDate": "2020-03-01T00:00:00Z", "endDate": "2020-04-01T00:00:00Z" }
        ])
    } else if query.contains(r#"_type == "globalContent""#) {
        json!({
            "siteName": "Dewdrop",
            "announcement": null,
            "footerText": "Made in small batches.",
            "socialLinks": [{ "platform": "instagram", "url": "https://instagram.com/dewdrop" }],
            "contactEmail": "hello@dewdrop.shop"
        })
    } else {
        Value::Null
    }
}

async fn sanity_query(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let drafts = params.get("perspective").map(String::as_str) == Some("drafts");
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if drafts && bearer != Some(SANITY_TOKEN) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "description": "Unauthorized", "type": "httpError" } })),
        )
            .into_response();
    }

    let Some(query) = params.get("query") else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "description": "Missing query", "type": "queryParseError" } })),
        )
            .into_response();
    };

    Json(json!({ "result": sanity_result(query, &params, drafts) })).into_response()
}

/// Spawn the Sanity mock; set it as `SanityConfig::api_host`.
pub async fn spawn_sanity() -> SocketAddr {
    let path = format!("/v{SANITY_API_VERSION}/data/query/production");
    spawn(Router::new().route(&path, get(sanity_query))).await
}

// =============================================================================
// Storefront
// =============================================================================

/// Spawn both mocks and a storefront wired to them.
pub async fn spawn_storefront(cors_allowed_origins: Vec<String>) -> SocketAddr {
    let shopify = spawn_shopify().await;
    let sanity = spawn_sanity().await;

    let config = StorefrontConfig {
        host: IpAddr::from([127, 0, 0, 1]),
        port: 0,
        base_url: "http://127.0.0.1".to_string(),
        cors_allowed_origins,
        shopify: ShopifyStorefrontConfig {
            store: "dewdrop-test.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            storefront_token: SecretString::from(SHOPIFY_TOKEN),
            api_url: Some(format!("http://{shopify}/graphql.json")),
        },
        sanity: SanityConfig {
            project_id: "dd7test".to_string(),
            dataset: "production".to_string(),
            api_version: SANITY_API_VERSION.to_string(),
            api_token: Some(SecretString::from(SANITY_TOKEN)),
            use_cdn: false,
            preview_secret: SecretString::from(PREVIEW_SECRET),
            api_host: Some(format!("http://{sanity}")),
        },
        sentry_dsn: None,
        sentry_environment: None,
    };

    spawn(dewdrop_storefront::build_router(
        dewdrop_storefront::AppState::new(config),
    ))
    .await
}
