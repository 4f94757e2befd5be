//! Dashboard statistics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stock at or below this level counts as low (but not out of) stock.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: usize,
    pub active_products: usize,
    pub draft_products: usize,
    pub archived_products: usize,
    pub featured_products: usize,
    pub low_stock_products: usize,
    pub out_of_stock_products: usize,
    /// Sum of price times stock over non-archived products.
    pub inventory_value: Decimal,
    /// `inventory_value` in store currency, e.g. `$1240.00`.
    pub inventory_value_display: String,
    pub total_categories: usize,
}
