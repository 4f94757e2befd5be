//! Field validation shared by create, update and file loading.

use rust_decimal::Decimal;

use dewdrop_core::Handle;

use super::CatalogError;

pub const MAX_NAME_LENGTH: usize = 200;

/// Upper bound for any price field: 1,000,000.00.
pub const MAX_PRICE: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 2);

pub fn name(raw: Option<&str>, field: &str) -> Result<String, CatalogError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(CatalogError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CatalogError::Validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

pub fn required_price(price: Option<Decimal>, field: &str) -> Result<Decimal, CatalogError> {
    let price = price.ok_or_else(|| CatalogError::Validation(format!("{field} is required")))?;
    positive_price(price, field)
}

pub fn optional_price(price: Option<Decimal>, field: &str) -> Result<Option<Decimal>, CatalogError> {
    price.map(|p| positive_price(p, field)).transpose()
}

fn positive_price(price: Decimal, field: &str) -> Result<Decimal, CatalogError> {
    if price <= Decimal::ZERO {
        return Err(CatalogError::Validation(format!(
            "{field} must be greater than zero"
        )));
    }
    if price > MAX_PRICE {
        return Err(CatalogError::Validation(format!(
            "{field} must be at most {MAX_PRICE}"
        )));
    }
    if price.normalize().scale() > 2 {
        return Err(CatalogError::Validation(format!(
            "{field} must have at most 2 decimal places"
        )));
    }
    Ok(price)
}

pub fn stock(stock: i32) -> Result<i32, CatalogError> {
    if stock < 0 {
        return Err(CatalogError::Validation(
            "stock cannot be negative".to_string(),
        ));
    }
    Ok(stock)
}

pub fn handle(raw: &str) -> Result<Handle, CatalogError> {
    Handle::parse(raw.trim()).map_err(|e| CatalogError::Validation(format!("Invalid handle: {e}")))
}

pub fn handle_from_name(name: &str) -> Result<Handle, CatalogError> {
    Handle::from_title(name)
        .map_err(|e| CatalogError::Validation(format!("Cannot derive a handle from name: {e}")))
}

/// Trim, drop blanks and remove case-insensitive duplicates, keeping order.
pub fn tags(raw: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Blank clears the image; anything else must be an absolute http(s) URL.
pub fn image_url(raw: Option<String>) -> Result<Option<String>, CatalogError> {
    let Some(raw) = raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match url::Url::parse(&raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Some(raw)),
        _ => Err(CatalogError::Validation(
            "image_url must be an absolute http or https URL".to_string(),
        )),
    }
}

pub fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
