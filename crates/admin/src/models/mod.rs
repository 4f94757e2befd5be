//! Domain models for admin.

pub mod admin_user;
pub mod category;
pub mod product;
pub mod session;
pub mod stats;

pub use admin_user::{AdminUser, AdminUserView, NewAdminUser};
pub use category::{Category, CategorySummary, CategoryUpdate, NewCategory};
pub use product::{
    BulkDelete, NewProduct, Product, ProductFilter, ProductStatus, ProductUpdate, SortKey,
    SortOrder, StockAdjustment,
};
pub use session::{CurrentAdmin, SessionInfo, keys as session_keys};
pub use stats::{DashboardStats, LOW_STOCK_THRESHOLD};
