//! JSON catalog files, used to seed the admin at startup and for export.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CatalogError, validate};

/// On-disk catalog: `{ "categories": [...], "products": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub categories: Vec<crate::models::Category>,
    #[serde(default)]
    pub products: Vec<crate::models::Product>,
}

impl CatalogFile {
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] or [`CatalogError::Json`].
    pub fn read(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if the document is malformed.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] or [`CatalogError::Json`].
    pub fn write(&self, path: &Path) -> Result<(), CatalogError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Check the invariants the in-memory catalog relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut category_ids = HashSet::new();
        let mut category_handles = HashSet::new();
        for category in &self.categories {
            validate::name(Some(&category.name), "category name")?;
            if !category_ids.insert(category.id) {
                return Err(CatalogError::Validation(format!(
                    "duplicate category id {}",
                    category.id
                )));
            }
            if !category_handles.insert(&category.handle) {
                return Err(CatalogError::DuplicateHandle(category.handle.to_string()));
            }
        }

        let mut product_ids = HashSet::new();
        let mut product_handles = HashSet::new();
        for product in &self.products {
            validate::name(Some(&product.name), "product name")?;
            validate::required_price(Some(product.price), "price")?;
            validate::optional_price(product.compare_at_price, "compare_at_price")?;
            validate::stock(product.stock)?;
            if !product_ids.insert(product.id) {
                return Err(CatalogError::Validation(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
            if !product_handles.insert(&product.handle) {
                return Err(CatalogError::DuplicateHandle(product.handle.to_string()));
            }
            if let Some(category_id) = product.category_id
                && !category_ids.contains(&category_id)
            {
                return Err(CatalogError::Validation(format!(
                    "product {} references missing category {category_id}",
                    product.id
                )));
            }
        }

        Ok(())
    }
}
