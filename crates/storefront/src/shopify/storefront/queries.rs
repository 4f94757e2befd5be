//! GraphQL documents and raw response shapes for the Storefront API.
//!
//! Response structs mirror the camelCase JSON Shopify returns and are
//! converted into `shopify::types` before leaving the client.

use serde::{Deserialize, Serialize};

macro_rules! product_fields {
    () => {
        r"
fragment ProductFields on Product {
  id
  handle
  title
  description
  descriptionHtml
  vendor
  productType
  tags
  availableForSale
  priceRange {
    minVariantPrice { amount currencyCode }
    maxVariantPrice { amount currencyCode }
  }
  compareAtPriceRange {
    minVariantPrice { amount currencyCode }
    maxVariantPrice { amount currencyCode }
  }
  featuredImage { url altText width height }
  images(first: $imageCount) {
    nodes { url altText width height }
  }
  variants(first: $variantCount) {
    nodes {
      id
      title
      sku
      availableForSale
      quantityAvailable
      price { amount currencyCode }
      compareAtPrice { amount currencyCode }
      selectedOptions { name value }
    }
  }
  seo { title description }
}
"
    };
}

pub const GET_PRODUCTS: &str = concat!(
    r"
query GetProducts($first: Int!, $after: String, $query: String, $imageCount: Int!, $variantCount: Int!) {
  products(first: $first, after: $after, query: $query) {
    nodes { ...ProductFields }
    pageInfo { hasNextPage endCursor }
  }
}
",
    product_fields!()
);

pub const GET_PRODUCT_BY_HANDLE: &str = concat!(
    r"
query GetProductByHandle($handle: String!, $imageCount: Int!, $variantCount: Int!) {
  product(handle: $handle) { ...ProductFields }
}
",
    product_fields!()
);

pub const GET_COLLECTION_PRODUCTS: &str = concat!(
    r"
query GetCollectionProducts($handle: String!, $first: Int!, $after: String, $imageCount: Int!, $variantCount: Int!) {
  collection(handle: $handle) {
    id
    handle
    title
    description
    image { url altText width height }
    products(first: $first, after: $after) {
      nodes { ...ProductFields }
      pageInfo { hasNextPage endCursor }
    }
  }
}
",
    product_fields!()
);

// =============================================================================
// Variables
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsVariables {
    pub first: i64,
    pub after: Option<String>,
    pub query: Option<String>,
    pub image_count: i64,
    pub variant_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductByHandleVariables {
    pub handle: String,
    pub image_count: i64,
    pub variant_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionProductsVariables {
    pub handle: String,
    pub first: i64,
    pub after: Option<String>,
    pub image_count: i64,
    pub variant_count: i64,
}

// =============================================================================
// Response data
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: RawProductConnection,
}

#[derive(Debug, Deserialize)]
pub struct ProductByHandleData {
    pub product: Option<RawProduct>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionProductsData {
    pub collection: Option<RawCollection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMoney {
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPriceRange {
    pub min_variant_price: RawMoney,
    pub max_variant_price: RawMoney,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RawNodes<T> {
    pub nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct RawSelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariant {
    pub id: String,
    pub title: String,
    pub sku: Option<String>,
    pub available_for_sale: bool,
    pub quantity_available: Option<i64>,
    pub price: RawMoney,
    pub compare_at_price: Option<RawMoney>,
    #[serde(default)]
    pub selected_options: Vec<RawSelectedOption>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSeo {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_html: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub available_for_sale: bool,
    pub price_range: RawPriceRange,
    pub compare_at_price_range: Option<RawPriceRange>,
    pub featured_image: Option<RawImage>,
    pub images: Option<RawNodes<RawImage>>,
    pub variants: Option<RawNodes<RawVariant>>,
    #[serde(default)]
    pub seo: Option<RawSeo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProductConnection {
    pub nodes: Vec<RawProduct>,
    pub page_info: RawPageInfo,
}

#[derive(Debug, Deserialize)]
pub struct RawCollection {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image: Option<RawImage>,
    pub products: RawProductConnection,
}
