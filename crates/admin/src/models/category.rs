//! Catalog category types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dewdrop_core::{CategoryId, Handle};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub handle: Handle,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A category with the number of products filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    #[serde(flatten)]
    pub category: Category,
    pub product_count: usize,
}

/// Request body for creating a category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCategory {
    pub name: Option<String>,
    pub handle: Option<String>,
    pub description: Option<String>,
}

/// Request body for updating a category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub handle: Option<String>,
    pub description: Option<String>,
}
