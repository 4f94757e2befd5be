//! Raw GraphQL response shapes into domain types.

use dewdrop_core::format::truncate;

use crate::shopify::types::{
    Collection, Image, Money, PageInfo, PriceRange, Product, ProductConnection, ProductVariant,
    SelectedOption,
};

use super::queries::{
    RawCollection, RawImage, RawMoney, RawPriceRange, RawProduct, RawProductConnection, RawVariant,
};

/// Character budget for `Product::excerpt`.
pub const EXCERPT_LENGTH: usize = 140;

fn convert_money(raw: RawMoney) -> Money {
    Money::new(raw.amount, raw.currency_code)
}

fn convert_price_range(raw: RawPriceRange) -> PriceRange {
    PriceRange {
        min_variant_price: convert_money(raw.min_variant_price),
        max_variant_price: convert_money(raw.max_variant_price),
    }
}

fn convert_image(raw: RawImage) -> Image {
    Image {
        url: raw.url,
        alt_text: raw.alt_text,
        width: raw.width,
        height: raw.height,
    }
}

fn convert_variant(raw: RawVariant) -> ProductVariant {
    ProductVariant {
        id: raw.id,
        title: raw.title,
        sku: raw.sku.filter(|s| !s.is_empty()),
        available_for_sale: raw.available_for_sale,
        quantity_available: raw.quantity_available,
        price: convert_money(raw.price),
        compare_at_price: raw.compare_at_price.map(convert_money),
        selected_options: raw
            .selected_options
            .into_iter()
            .map(|o| SelectedOption {
                name: o.name,
                value: o.value,
            })
            .collect(),
    }
}

/// Shopify reports a zero compare-at range for products with no sale.
fn discount_percent(price: &PriceRange, compare_at: Option<&PriceRange>) -> Option<u32> {
    let price = price.min_variant_price.to_price()?;
    let compare_at = compare_at?.min_variant_price.to_price()?;
    price.discount_percent(&compare_at)
}

pub fn convert_product(raw: RawProduct) -> Product {
    let price_range = convert_price_range(raw.price_range);
    let compare_at_price_range = raw.compare_at_price_range.map(convert_price_range);
    let discount_percent = discount_percent(&price_range, compare_at_price_range.as_ref());
    let seo = raw.seo.unwrap_or_default();

    Product {
        id: raw.id,
        handle: raw.handle,
        title: raw.title,
        excerpt: truncate(&raw.description, EXCERPT_LENGTH),
        description: raw.description,
        description_html: raw.description_html,
        vendor: raw.vendor,
        product_type: raw.product_type,
        tags: raw.tags,
        available_for_sale: raw.available_for_sale,
        price_range,
        compare_at_price_range,
        discount_percent,
        featured_image: raw.featured_image.map(convert_image),
        images: raw
            .images
            .map(|i| i.nodes.into_iter().map(convert_image).collect())
            .unwrap_or_default(),
        variants: raw
            .variants
            .map(|v| v.nodes.into_iter().map(convert_variant).collect())
            .unwrap_or_default(),
        seo_title: seo.title.filter(|s| !s.is_empty()),
        seo_description: seo.description.filter(|s| !s.is_empty()),
    }
}

pub fn convert_product_connection(raw: RawProductConnection) -> ProductConnection {
    ProductConnection {
        products: raw.nodes.into_iter().map(convert_product).collect(),
        page_info: PageInfo {
            has_next_page: raw.page_info.has_next_page,
            end_cursor: raw.page_info.end_cursor,
        },
    }
}

pub fn convert_collection(raw: RawCollection) -> Collection {
    Collection {
        id: raw.id,
        handle: raw.handle,
        title: raw.title,
        description: raw.description,
        image: raw.image.map(convert_image),
        products: convert_product_connection(raw.products),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn raw_product(price: &str, compare_at: &str) -> RawProduct {
        raw_product_described(price, compare_at, "A light serum.")
    }

    fn raw_product_described(price: &str, compare_at: &str, description: &str) -> RawProduct {
        serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Product/1",
            "handle": "rose-hydrating-serum",
            "title": "Rose Hydrating Serum",
            "description": description,
            "descriptionHtml": "<p>A light serum.</p>",
            "vendor": "Dewdrop",
            "productType": "Serum",
            "tags": ["hydration"],
            "availableForSale": true,
            "priceRange": {
                "minVariantPrice": {"amount": price, "currencyCode": "USD"},
                "maxVariantPrice": {"amount": price, "currencyCode": "USD"}
            },
            "compareAtPriceRange": {
                "minVariantPrice": {"amount": compare_at, "currencyCode": "USD"},
                "maxVariantPrice": {"amount": compare_at, "currencyCode": "USD"}
            },
            "featuredImage": null,
            "images": {"nodes": [{"url": "https://cdn.shopify.com/a.jpg", "altText": null, "width": 800, "height": 800}]},
            "variants": {"nodes": [{
                "id": "gid://shopify/ProductVariant/1",
                "title": "30ml",
                "sku": "",
                "availableForSale": true,
                "quantityAvailable": 12,
                "price": {"amount": price, "currencyCode": "USD"},
                "compareAtPrice": null,
                "selectedOptions": [{"name": "Size", "value": "30ml"}]
            }]},
            "seo": {"title": "", "description": null}
        }))
        .unwrap()
    }

    #[test]
    fn test_convert_product_with_discount() {
        let product = convert_product(raw_product("30.0", "40.0"));
        assert_eq!(product.discount_percent, Some(25));
        assert_eq!(product.price_range.min_variant_price.formatted, "$30.00");
        assert_eq!(product.images.len(), 1);
        assert_eq!(product.variants[0].sku, None);
        assert_eq!(product.seo_title, None);
    }

    #[test]
    fn test_excerpt_shortens_long_descriptions() {
        let product = convert_product(raw_product("30.0", "0.0"));
        assert_eq!(product.excerpt, "A light serum.");

        let long = "Rose water and hyaluronic acid draw moisture into the skin. ".repeat(4);
        let product = convert_product(raw_product_described("30.0", "0.0", &long));
        assert!(product.excerpt.ends_with('…'));
        assert!(product.excerpt.chars().count() <= EXCERPT_LENGTH);
        assert_eq!(product.description, long);
    }

    #[test]
    fn test_zero_compare_at_is_no_discount() {
        let product = convert_product(raw_product("30.0", "0.0"));
        assert_eq!(product.discount_percent, None);
    }
}
