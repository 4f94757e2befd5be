//! Catalog product types.
//!
//! `Product` is the stored record. `NewProduct` and `ProductUpdate` are
//! request bodies: every field is optional at the serde level so that a
//! missing required field surfaces as a 400 from validation rather than a
//! deserialization rejection.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use dewdrop_core::{CategoryId, Handle, ProductId};

/// Publication state of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Draft,
    Active,
    Archived,
}

impl ProductStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

/// A product in the admin catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub handle: Handle,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub compare_at_price: Option<Decimal>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub skin_concerns: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub stock: i32,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Case-insensitive match on name, description or handle. `needle` must
    /// already be lowercased.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.handle.as_str().contains(needle)
    }

    #[must_use]
    pub fn has_skin_concern(&self, concern: &str) -> bool {
        self.skin_concerns
            .iter()
            .any(|c| c.eq_ignore_ascii_case(concern))
    }
}

/// Request body for creating a product.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProduct {
    pub name: Option<String>,
    /// Derived from `name` when omitted.
    pub handle: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub compare_at_price: Option<Decimal>,
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub skin_concerns: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub stock: Option<i32>,
    pub status: Option<ProductStatus>,
    pub featured: Option<bool>,
    pub image_url: Option<String>,
}

/// Request body for a partial product update.
///
/// Nullable fields use `Option<Option<T>>`: absent leaves the value alone,
/// `null` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub handle: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "nullable")]
    pub compare_at_price: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub category_id: Option<Option<CategoryId>>,
    pub skin_concerns: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
    pub stock: Option<i32>,
    pub status: Option<ProductStatus>,
    pub featured: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub image_url: Option<Option<String>>,
}

/// Present-but-null becomes `Some(None)`; `#[serde(default)]` covers absent.
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Request body for `POST /api/products/{id}/stock`.
#[derive(Debug, Clone, Deserialize)]
pub struct StockAdjustment {
    /// Positive to receive stock, negative to remove it.
    pub delta: i32,
}

/// Request body for `POST /api/products/bulk-delete`.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkDelete {
    pub ids: Vec<ProductId>,
}

// =============================================================================
// Listing
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Price,
    #[default]
    Newest,
    Stock,
}

impl SortKey {
    /// Newest-first reads naturally as descending; everything else ascending.
    #[must_use]
    pub const fn default_order(self) -> SortOrder {
        match self {
            Self::Newest => SortOrder::Desc,
            Self::Name | Self::Price | Self::Stock => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Query parameters for `GET /api/products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category_id: Option<CategoryId>,
    pub status: Option<ProductStatus>,
    pub skin_concern: Option<String>,
    pub in_stock: Option<bool>,
    pub sort: Option<SortKey>,
    pub order: Option<SortOrder>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl ProductFilter {
    pub const DEFAULT_PER_PAGE: usize = 20;
    pub const MAX_PER_PAGE: usize = 100;

    /// 1-based page number.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    #[must_use]
    pub fn per_page(&self) -> usize {
        self.per_page
            .unwrap_or(Self::DEFAULT_PER_PAGE)
            .clamp(1, Self::MAX_PER_PAGE)
    }

    /// Whether a product passes every set filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        search.is_none_or(|needle| product.matches_search(&needle))
            && self
                .category_id
                .is_none_or(|id| product.category_id == Some(id))
            && self.status.is_none_or(|status| product.status == status)
            && self
                .skin_concern
                .as_deref()
                .is_none_or(|concern| product.has_skin_concern(concern))
            && self
                .in_stock
                .is_none_or(|wanted| product.in_stock() == wanted)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let update: ProductUpdate =
            serde_json::from_str(r#"{"compare_at_price": null, "name": "Dew Toner"}"#).unwrap();
        assert_eq!(update.compare_at_price, Some(None));
        assert_eq!(update.category_id, None);
        assert_eq!(update.name.as_deref(), Some("Dew Toner"));

        let update: ProductUpdate =
            serde_json::from_str(r#"{"compare_at_price": "30.00"}"#).unwrap();
        assert_eq!(update.compare_at_price, Some(Some(Decimal::new(3000, 2))));
    }

    #[test]
    fn test_new_product_allows_missing_required_fields() {
        let body: NewProduct = serde_json::from_str("{}").unwrap();
        assert!(body.name.is_none());
        assert!(body.price.is_none());
    }

    #[test]
    fn test_pagination_bounds() {
        let mut filter = ProductFilter::default();
        assert_eq!((filter.page(), filter.per_page()), (1, 20));
        filter.page = Some(0);
        filter.per_page = Some(1000);
        assert_eq!((filter.page(), filter.per_page()), (1, 100));
    }

    #[test]
    fn test_sort_default_order() {
        assert_eq!(SortKey::default().default_order(), SortOrder::Desc);
        assert_eq!(SortKey::Price.default_order(), SortOrder::Asc);
    }
}
