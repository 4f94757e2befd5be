//! In-memory product catalog.
//!
//! Products and categories live behind a single `tokio::sync::RwLock`.
//! Reads are linear scans; the catalog is small (tens to low hundreds of
//! products). State is seeded with mock data or loaded from a JSON file at
//! startup and is not persisted.

mod file;
mod seed;
mod validate;

pub use file::CatalogFile;
pub use seed::seed_catalog;

use std::cmp::Ordering;

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use dewdrop_core::api::Paginated;
use dewdrop_core::format::format_price;
use dewdrop_core::{CategoryId, CurrencyCode, Handle, ProductId};

use crate::models::{
    Category, CategorySummary, CategoryUpdate, DashboardStats, LOW_STOCK_THRESHOLD, NewCategory,
    NewProduct, Product, ProductFilter, ProductStatus, ProductUpdate, SortKey, SortOrder,
};

/// Errors returned by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Input failed field validation.
    #[error("{0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Handle already in use: {0}")]
    DuplicateHandle(String),

    #[error("Category {id} is used by {count} product(s)")]
    CategoryInUse { id: CategoryId, count: usize },

    #[error("Insufficient stock: {available} available, cannot remove {requested}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("No {0} ids left")]
    IdsExhausted(&'static str),

    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    fn product_not_found(id: ProductId) -> Self {
        Self::NotFound {
            kind: "Product",
            id: id.to_string(),
        }
    }

    fn category_not_found(id: CategoryId) -> Self {
        Self::NotFound {
            kind: "Category",
            id: id.to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct CatalogData {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl CatalogData {
    fn product_mut(&mut self, id: ProductId) -> Result<&mut Product, CatalogError> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::product_not_found(id))
    }

    fn category_exists(&self, id: CategoryId) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }

    fn product_handle_taken(&self, handle: &Handle, except: Option<ProductId>) -> bool {
        self.products
            .iter()
            .any(|p| &p.handle == handle && Some(p.id) != except)
    }

    fn category_handle_taken(&self, handle: &Handle, except: Option<CategoryId>) -> bool {
        self.categories
            .iter()
            .any(|c| &c.handle == handle && Some(c.id) != except)
    }

    fn next_product_id(&self) -> Result<ProductId, CatalogError> {
        self.products
            .iter()
            .map(|p| p.id)
            .max()
            .map_or(Some(ProductId::new(1)), |id| id.next())
            .ok_or(CatalogError::IdsExhausted("product"))
    }

    fn next_category_id(&self) -> Result<CategoryId, CatalogError> {
        self.categories
            .iter()
            .map(|c| c.id)
            .max()
            .map_or(Some(CategoryId::new(1)), |id| id.next())
            .ok_or(CatalogError::IdsExhausted("category"))
    }

    fn check_category(&self, id: Option<CategoryId>) -> Result<(), CatalogError> {
        match id {
            Some(id) if !self.category_exists(id) => Err(CatalogError::Validation(format!(
                "category_id {id} does not exist"
            ))),
            _ => Ok(()),
        }
    }

    fn product_count(&self, category_id: CategoryId) -> usize {
        self.products
            .iter()
            .filter(|p| p.category_id == Some(category_id))
            .count()
    }
}

/// The admin product catalog.
#[derive(Debug, Default)]
pub struct Catalog {
    data: RwLock<CatalogData>,
}

impl Catalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from file contents after checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found: duplicate ids or handles,
    /// dangling category references, or invalid field values.
    pub fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        file.validate()?;
        Ok(Self {
            data: RwLock::new(CatalogData {
                products: file.products,
                categories: file.categories,
            }),
        })
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Filter, sort and paginate products.
    pub async fn list_products(&self, filter: &ProductFilter) -> Paginated<Product> {
        let data = self.data.read().await;

        let mut matches: Vec<&Product> =
            data.products.iter().filter(|p| filter.matches(p)).collect();

        let key = filter.sort.unwrap_or_default();
        let order = filter.order.unwrap_or_else(|| key.default_order());
        matches.sort_by(|a, b| {
            let ordering = compare_products(a, b, key);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let page = filter.page();
        let per_page = filter.per_page();
        let total = matches.len();
        let items = matches
            .into_iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .cloned()
            .collect();

        Paginated::new(items, total, page, per_page)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no product has this id.
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.data
            .read()
            .await
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::product_not_found(id))
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no product has this handle.
    pub async fn get_product_by_handle(&self, handle: &Handle) -> Result<Product, CatalogError> {
        self.data
            .read()
            .await
            .products
            .iter()
            .find(|p| &p.handle == handle)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound {
                kind: "Product",
                id: handle.to_string(),
            })
    }

    /// Validate and insert a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] for bad fields and
    /// [`CatalogError::DuplicateHandle`] for an explicit handle already in use.
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: NewProduct) -> Result<Product, CatalogError> {
        let name = validate::name(input.name.as_deref(), "name")?;
        let price = validate::required_price(input.price, "price")?;
        let compare_at_price = validate::optional_price(input.compare_at_price, "compare_at_price")?;
        let stock = validate::stock(input.stock.unwrap_or(0))?;
        let image_url = validate::image_url(input.image_url)?;

        let mut data = self.data.write().await;
        data.check_category(input.category_id)?;

        let handle = match input.handle.as_deref() {
            Some(explicit) => {
                let handle = validate::handle(explicit)?;
                if data.product_handle_taken(&handle, None) {
                    return Err(CatalogError::DuplicateHandle(handle.into_inner()));
                }
                handle
            }
            None => {
                let base = validate::handle_from_name(&name)?;
                unique_handle(&base, |h| data.product_handle_taken(h, None))
            }
        };

        let now = Utc::now();
        let product = Product {
            id: data.next_product_id()?,
            name,
            handle,
            description: input.description.unwrap_or_default().trim().to_string(),
            price,
            compare_at_price,
            category_id: input.category_id,
            skin_concerns: validate::tags(input.skin_concerns),
            ingredients: validate::tags(input.ingredients),
            stock,
            status: input.status.unwrap_or_default(),
            featured: input.featured.unwrap_or(false),
            image_url,
            created_at: now,
            updated_at: now,
        };

        data.products.push(product.clone());
        info!(product_id = %product.id, handle = %product.handle, "Product created");
        Ok(product)
    }

    /// Apply a partial update.
    ///
    /// The handle is kept when only the name changes so storefront URLs stay
    /// stable.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`], [`CatalogError::Validation`] or
    /// [`CatalogError::DuplicateHandle`].
    #[instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, CatalogError> {
        let mut data = self.data.write().await;

        if let Some(Some(category_id)) = update.category_id {
            data.check_category(Some(category_id))?;
        }

        let handle = match update.handle.as_deref() {
            Some(raw) => {
                let handle = validate::handle(raw)?;
                if data.product_handle_taken(&handle, Some(id)) {
                    return Err(CatalogError::DuplicateHandle(handle.into_inner()));
                }
                Some(handle)
            }
            None => None,
        };

        let product = data.product_mut(id)?;
        let mut next = product.clone();

        if let Some(name) = update.name {
            next.name = validate::name(Some(&name), "name")?;
        }
        if let Some(handle) = handle {
            next.handle = handle;
        }
        if let Some(description) = update.description {
            next.description = description.trim().to_string();
        }
        if let Some(price) = update.price {
            next.price = validate::required_price(Some(price), "price")?;
        }
        if let Some(compare_at_price) = update.compare_at_price {
            next.compare_at_price = validate::optional_price(compare_at_price, "compare_at_price")?;
        }
        if let Some(category_id) = update.category_id {
            next.category_id = category_id;
        }
        if let Some(concerns) = update.skin_concerns {
            next.skin_concerns = validate::tags(concerns);
        }
        if let Some(ingredients) = update.ingredients {
            next.ingredients = validate::tags(ingredients);
        }
        if let Some(stock) = update.stock {
            next.stock = validate::stock(stock)?;
        }
        if let Some(status) = update.status {
            next.status = status;
        }
        if let Some(featured) = update.featured {
            next.featured = featured;
        }
        if let Some(image_url) = update.image_url {
            next.image_url = validate::image_url(image_url)?;
        }

        next.updated_at = Utc::now();
        *product = next.clone();

        info!(product_id = %id, "Product updated");
        Ok(next)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no product has this id.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let mut data = self.data.write().await;
        let index = data
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CatalogError::product_not_found(id))?;
        let removed = data.products.remove(index);
        info!(product_id = %id, "Product deleted");
        Ok(removed)
    }

    /// Delete every listed product that exists. Returns how many were removed.
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn delete_products(&self, ids: &[ProductId]) -> usize {
        let mut data = self.data.write().await;
        let before = data.products.len();
        data.products.retain(|p| !ids.contains(&p.id));
        let removed = before - data.products.len();
        info!(removed, "Products bulk deleted");
        removed
    }

    /// Add `delta` to a product's stock.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InsufficientStock`] if the result would be
    /// negative, or [`CatalogError::NotFound`].
    #[instrument(skip(self))]
    pub async fn adjust_stock(&self, id: ProductId, delta: i32) -> Result<Product, CatalogError> {
        let mut data = self.data.write().await;
        let product = data.product_mut(id)?;

        let new_stock = product
            .stock
            .checked_add(delta)
            .filter(|s| *s >= 0)
            .ok_or(CatalogError::InsufficientStock {
                available: product.stock,
                requested: delta.saturating_neg(),
            })?;

        product.stock = new_stock;
        product.updated_at = Utc::now();
        info!(product_id = %id, delta, stock = new_stock, "Stock adjusted");
        Ok(product.clone())
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Categories sorted by name, with product counts.
    pub async fn list_categories(&self) -> Vec<CategorySummary> {
        let data = self.data.read().await;
        let mut summaries: Vec<CategorySummary> = data
            .categories
            .iter()
            .map(|c| CategorySummary {
                category: c.clone(),
                product_count: data.product_count(c.id),
            })
            .collect();
        summaries.sort_by_key(|s| s.category.name.to_lowercase());
        summaries
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] or [`CatalogError::DuplicateHandle`].
    #[instrument(skip(self, input))]
    pub async fn create_category(&self, input: NewCategory) -> Result<Category, CatalogError> {
        let name = validate::name(input.name.as_deref(), "name")?;
        let mut data = self.data.write().await;

        let handle = match input.handle.as_deref() {
            Some(raw) => {
                let handle = validate::handle(raw)?;
                if data.category_handle_taken(&handle, None) {
                    return Err(CatalogError::DuplicateHandle(handle.into_inner()));
                }
                handle
            }
            None => {
                let base = validate::handle_from_name(&name)?;
                unique_handle(&base, |h| data.category_handle_taken(h, None))
            }
        };

        let now = Utc::now();
        let category = Category {
            id: data.next_category_id()?,
            name,
            handle,
            description: validate::optional_text(input.description),
            created_at: now,
            updated_at: now,
        };
        data.categories.push(category.clone());
        info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`], [`CatalogError::Validation`] or
    /// [`CatalogError::DuplicateHandle`].
    #[instrument(skip(self, update))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        update: CategoryUpdate,
    ) -> Result<Category, CatalogError> {
        let mut data = self.data.write().await;

        let handle = match update.handle.as_deref() {
            Some(raw) => {
                let handle = validate::handle(raw)?;
                if data.category_handle_taken(&handle, Some(id)) {
                    return Err(CatalogError::DuplicateHandle(handle.into_inner()));
                }
                Some(handle)
            }
            None => None,
        };

        let category = data
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| CatalogError::category_not_found(id))?;

        if let Some(name) = update.name {
            category.name = validate::name(Some(&name), "name")?;
        }
        if let Some(handle) = handle {
            category.handle = handle;
        }
        if update.description.is_some() {
            category.description = validate::optional_text(update.description);
        }
        category.updated_at = Utc::now();

        Ok(category.clone())
    }

    /// Delete a category that no product references.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CategoryInUse`] if products still point at it.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<Category, CatalogError> {
        let mut data = self.data.write().await;

        let index = data
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CatalogError::category_not_found(id))?;

        let count = data.product_count(id);
        if count > 0 {
            return Err(CatalogError::CategoryInUse { id, count });
        }

        let removed = data.categories.remove(index);
        info!(category_id = %id, "Category deleted");
        Ok(removed)
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    pub async fn stats(&self) -> DashboardStats {
        let data = self.data.read().await;
        let mut stats = DashboardStats {
            total_products: data.products.len(),
            total_categories: data.categories.len(),
            ..DashboardStats::default()
        };

        for product in &data.products {
            match product.status {
                ProductStatus::Active => stats.active_products += 1,
                ProductStatus::Draft => stats.draft_products += 1,
                ProductStatus::Archived => stats.archived_products += 1,
            }
            if product.featured {
                stats.featured_products += 1;
            }
            if product.stock == 0 {
                stats.out_of_stock_products += 1;
            } else if product.stock <= LOW_STOCK_THRESHOLD {
                stats.low_stock_products += 1;
            }
            if product.status != ProductStatus::Archived {
                let value = product.price.saturating_mul(Decimal::from(product.stock));
                stats.inventory_value = stats.inventory_value.saturating_add(value);
            }
        }
        stats.inventory_value_display = format_price(stats.inventory_value, CurrencyCode::USD);

        stats
    }
}

fn compare_products(a: &Product, b: &Product, key: SortKey) -> Ordering {
    let primary = match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Price => a.price.cmp(&b.price),
        SortKey::Newest => a.created_at.cmp(&b.created_at),
        SortKey::Stock => a.stock.cmp(&b.stock),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

/// First of `base`, `base-2`, `base-3`, ... not rejected by `taken`.
fn unique_handle(base: &Handle, taken: impl Fn(&Handle) -> bool) -> Handle {
    if !taken(base) {
        return base.clone();
    }
    (2..)
        .map(|n| base.with_suffix(n))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.clone())
}
