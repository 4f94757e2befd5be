//! Domain types for Shopify Storefront API data.
//!
//! These are what the `/api/*` endpoints serialize. They are decoupled from
//! the raw GraphQL response shapes in `storefront::queries`.

use serde::{Deserialize, Serialize};

use dewdrop_core::Price;

// =============================================================================
// Money Types
// =============================================================================

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
    /// Display string such as `$24.00`; falls back to `amount currency`
    /// for currencies the store does not format.
    pub formatted: String,
}

impl Money {
    #[must_use]
    pub fn new(amount: String, currency_code: String) -> Self {
        let formatted = Price::parse(&amount, &currency_code)
            .map_or_else(|_| format!("{amount} {currency_code}"), |p| p.format());
        Self {
            amount,
            currency_code,
            formatted,
        }
    }

    /// Parse into a decimal price, if the currency is supported.
    #[must_use]
    pub fn to_price(&self) -> Option<Price> {
        Price::parse(&self.amount, &self.currency_code).ok()
    }
}

/// Price range for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min_variant_price: Money,
    pub max_variant_price: Money,
}

// =============================================================================
// Product Types
// =============================================================================

/// Product or collection image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

/// A selected option on a variant (e.g., Size: 30ml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    pub title: String,
    pub sku: Option<String>,
    pub available_for_sale: bool,
    pub quantity_available: Option<i64>,
    pub price: Money,
    pub compare_at_price: Option<Money>,
    pub selected_options: Vec<SelectedOption>,
}

/// A Shopify product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub handle: String,
    pub title: String,
    /// Plain-text description.
    pub description: String,
    /// `description` shortened for product cards.
    pub excerpt: String,
    pub description_html: String,
    pub vendor: String,
    pub product_type: String,
    pub tags: Vec<String>,
    pub available_for_sale: bool,
    pub price_range: PriceRange,
    pub compare_at_price_range: Option<PriceRange>,
    /// Whole-percent saving of the cheapest variant against its compare-at price.
    pub discount_percent: Option<u32>,
    pub featured_image: Option<Image>,
    pub images: Vec<Image>,
    pub variants: Vec<ProductVariant>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

/// Cursor-based pagination info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// A page of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConnection {
    pub products: Vec<Product>,
    pub page_info: PageInfo,
}

/// A Shopify collection with its first page of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub description: String,
    pub image: Option<Image>,
    pub products: ProductConnection,
}
