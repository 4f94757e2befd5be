//! Mock catalog used when no catalog file is configured.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use dewdrop_core::{CategoryId, ProductId};

use crate::models::{Category, Product, ProductStatus};

use super::{CatalogError, CatalogFile, validate};

/// 2026-01-05T09:00:00Z; seeded records are spaced a day apart from here.
const SEED_EPOCH: i64 = 1_767_603_600;

const CATEGORIES: &[(&str, &str, &str)] = &[
    ("Cleansers", "cleansers", "Gentle daily cleansers"),
    ("Serums", "serums", "Targeted treatments"),
    ("Moisturizers", "moisturizers", "Creams and lotions"),
    ("Sunscreen", "sunscreen", "Daily mineral protection"),
    ("Masks", "masks", "Weekly treatments"),
];

struct SeedProduct {
    name: &'static str,
    handle: &'static str,
    description: &'static str,
    price_cents: i64,
    compare_at_cents: Option<i64>,
    category: i32,
    skin_concerns: &'static [&'static str],
    ingredients: &'static [&'static str],
    stock: i32,
    status: ProductStatus,
    featured: bool,
}

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Gentle Foaming Cleanser",
        handle: "gentle-foaming-cleanser",
        description: "A low-foam gel cleanser that leaves the skin barrier intact.",
        price_cents: 2400,
        compare_at_cents: None,
        category: 1,
        skin_concerns: &["sensitivity", "dryness"],
        ingredients: &["glycerin", "ceramides", "green tea extract"],
        stock: 48,
        status: ProductStatus::Active,
        featured: false,
    },
    SeedProduct {
        name: "Vitamin C Brightening Serum",
        handle: "vitamin-c-brightening-serum",
        description: "15% ascorbic acid serum for uneven tone.",
        price_cents: 4800,
        compare_at_cents: Some(5600),
        category: 2,
        skin_concerns: &["dullness", "hyperpigmentation"],
        ingredients: &["ascorbic acid", "ferulic acid", "vitamin e"],
        stock: 32,
        status: ProductStatus::Active,
        featured: true,
    },
    SeedProduct {
        name: "Hyaluronic Acid Hydrating Serum",
        handle: "hyaluronic-acid-hydrating-serum",
        description: "Multi-weight hyaluronic acid for lasting hydration.",
        price_cents: 3600,
        compare_at_cents: None,
        category: 2,
        skin_concerns: &["dryness", "fine lines"],
        ingredients: &["hyaluronic acid", "panthenol"],
        stock: 7,
        status: ProductStatus::Active,
        featured: true,
    },
    SeedProduct {
        name: "Niacinamide Pore Serum",
        handle: "niacinamide-pore-serum",
        description: "Balances oil and refines the look of pores.",
        price_cents: 3200,
        compare_at_cents: None,
        category: 2,
        skin_concerns: &["acne", "oiliness"],
        ingredients: &["niacinamide", "zinc pca"],
        stock: 0,
        status: ProductStatus::Active,
        featured: false,
    },
    SeedProduct {
        name: "Ceramide Barrier Cream",
        handle: "ceramide-barrier-cream",
        description: "Rich cream that restores a compromised barrier overnight.",
        price_cents: 4200,
        compare_at_cents: None,
        category: 3,
        skin_concerns: &["dryness", "sensitivity"],
        ingredients: &["ceramides", "squalane", "cholesterol"],
        stock: 25,
        status: ProductStatus::Active,
        featured: true,
    },
    SeedProduct {
        name: "Mineral Sunscreen SPF 50",
        handle: "mineral-sunscreen-spf-50",
        description: "Sheer zinc oxide sunscreen with no white cast.",
        price_cents: 3400,
        compare_at_cents: Some(3800),
        category: 4,
        skin_concerns: &["sun protection", "sensitivity"],
        ingredients: &["zinc oxide"],
        stock: 60,
        status: ProductStatus::Active,
        featured: false,
    },
    SeedProduct {
        name: "Overnight Repair Mask",
        handle: "overnight-repair-mask",
        description: "Leave-on retinal mask for smoother texture by morning.",
        price_cents: 3900,
        compare_at_cents: None,
        category: 5,
        skin_concerns: &["fine lines", "dullness"],
        ingredients: &["retinal", "peptides"],
        stock: 15,
        status: ProductStatus::Draft,
        featured: false,
    },
    SeedProduct {
        name: "Clay Detox Mask",
        handle: "clay-detox-mask",
        description: "Kaolin and bentonite clay to absorb excess oil.",
        price_cents: 2800,
        compare_at_cents: None,
        category: 5,
        skin_concerns: &["oiliness", "acne"],
        ingredients: &["kaolin", "bentonite"],
        stock: 3,
        status: ProductStatus::Archived,
        featured: false,
    },
];

fn seeded_at(offset_days: usize) -> DateTime<Utc> {
    let base = DateTime::from_timestamp(SEED_EPOCH, 0).unwrap_or_default();
    base + Duration::days(i64::try_from(offset_days).unwrap_or_default())
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Skincare categories and products for demos and tests.
///
/// # Errors
///
/// Returns [`CatalogError::Validation`] if a seeded handle is malformed.
pub fn seed_catalog() -> Result<CatalogFile, CatalogError> {
    let categories = CATEGORIES
        .iter()
        .zip(1..)
        .map(|(&(name, handle, description), id)| {
            let created_at = seeded_at(0);
            Ok(Category {
                id: CategoryId::new(id),
                name: name.to_string(),
                handle: validate::handle(handle)?,
                description: Some(description.to_string()),
                created_at,
                updated_at: created_at,
            })
        })
        .collect::<Result<Vec<_>, CatalogError>>()?;

    let products = PRODUCTS
        .iter()
        .enumerate()
        .map(|(index, seed)| {
            let created_at = seeded_at(index);
            Ok(Product {
                id: ProductId::new(i32::try_from(index).unwrap_or_default() + 1),
                name: seed.name.to_string(),
                handle: validate::handle(seed.handle)?,
                description: seed.description.to_string(),
                price: Decimal::new(seed.price_cents, 2),
                compare_at_price: seed.compare_at_cents.map(|c| Decimal::new(c, 2)),
                category_id: Some(CategoryId::new(seed.category)),
                skin_concerns: to_strings(seed.skin_concerns),
                ingredients: to_strings(seed.ingredients),
                stock: seed.stock,
                status: seed.status,
                featured: seed.featured,
                image_url: None,
                created_at,
                updated_at: created_at,
            })
        })
        .collect::<Result<Vec<_>, CatalogError>>()?;

    Ok(CatalogFile {
        categories,
        products,
    })
}
