//! Display formatting helpers shared by the storefront and the dashboard.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::types::{CurrencyCode, Price};

/// Format an amount in a currency, e.g. `$24.00`.
#[must_use]
pub fn format_price(amount: Decimal, currency_code: CurrencyCode) -> String {
    Price::new(amount, currency_code).format()
}

/// Format a timestamp as a short human date, e.g. `Jan 5, 2026`.
#[must_use]
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// Shorten text to at most `max_chars` characters, ending in `…` when cut.
///
/// Cuts on a char boundary and prefers the last word break so words are not
/// split in half.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    if max_chars == 0 {
        return String::new();
    }

    let keep = max_chars - 1;
    let cut: String = text.chars().take(keep).collect();
    let ends_on_break = text.chars().nth(keep).is_some_and(char::is_whitespace);
    let cut = match cut.rfind(char::is_whitespace) {
        Some(idx) if idx > 0 && !ends_on_break => cut.get(..idx).unwrap_or(&cut),
        _ => cut.as_str(),
    };
    format!("{}…", cut.trim_end())
}
