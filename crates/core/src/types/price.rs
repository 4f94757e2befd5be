//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse a Shopify `MoneyV2` pair (`"24.0"`, `"USD"`).
    ///
    /// # Errors
    ///
    /// Returns [`PriceError`] if the amount is not a decimal or the currency
    /// is not one we sell in.
    pub fn parse(amount: &str, currency_code: &str) -> Result<Self, PriceError> {
        let amount = Decimal::from_str(amount.trim())
            .map_err(|_| PriceError::InvalidAmount(amount.to_owned()))?;
        let currency_code = currency_code.parse()?;
        Ok(Self::new(amount, currency_code))
    }

    /// Render for display, e.g. `$24.00` or `€9.50`.
    #[must_use]
    pub fn format(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{sign}{}{:.2}", self.currency_code.symbol(), rounded.abs())
    }

    /// Whole-percent saving of this price against a compare-at price.
    ///
    /// `None` unless `compare_at` is in the same currency and strictly
    /// greater than this price.
    #[must_use]
    pub fn discount_percent(&self, compare_at: &Self) -> Option<u32> {
        if compare_at.currency_code != self.currency_code
            || compare_at.amount <= self.amount
            || compare_at.amount <= Decimal::ZERO
        {
            return None;
        }

        let saved = (compare_at.amount - self.amount) / compare_at.amount * Decimal::ONE_HUNDRED;
        saved
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// ISO 4217 currency codes the store sells in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::CAD => "CA$",
            Self::AUD => "A$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(PriceError::UnsupportedCurrency(s.to_owned())),
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// `2400` -> `24.00`.
    fn cents(minor: i64, currency_code: CurrencyCode) -> Price {
        Price::new(Decimal::new(minor, 2), currency_code)
    }

    #[test]
    fn test_parse_shopify_money() {
        let price = Price::parse("24.0", "USD").unwrap();
        assert_eq!(price.amount, Decimal::new(24, 0));
        assert_eq!(price.currency_code, CurrencyCode::USD);

        assert!(matches!(
            Price::parse("twenty", "USD"),
            Err(PriceError::InvalidAmount(_))
        ));
        assert!(matches!(
            Price::parse("1.00", "JPY"),
            Err(PriceError::UnsupportedCurrency(_))
        ));
    }

    #[test]
    fn test_format() {
        assert_eq!(cents(2400, CurrencyCode::USD).format(), "$24.00");
        assert_eq!(cents(950, CurrencyCode::EUR).format(), "€9.50");
        assert_eq!(cents(1999, CurrencyCode::GBP).to_string(), "£19.99");
        assert_eq!(
            Price::new(Decimal::new(12345, 3), CurrencyCode::USD).format(),
            "$12.35"
        );
        assert_eq!(cents(-500, CurrencyCode::CAD).format(), "-CA$5.00");
    }


    #[test]
    fn test_discount_percent() {
        let price = cents(3000, CurrencyCode::USD);
        let compare_at = cents(4000, CurrencyCode::USD);
        assert_eq!(price.discount_percent(&compare_at), Some(25));

        // Not a discount
        assert_eq!(compare_at.discount_percent(&price), None);
        assert_eq!(price.discount_percent(&price), None);

        // Currency mismatch
        let euros = cents(4000, CurrencyCode::EUR);
        assert_eq!(price.discount_percent(&euros), None);
    }

    #[test]
    fn test_discount_percent_rounds() {
        let price = cents(2000, CurrencyCode::USD);
        let compare_at = cents(3000, CurrencyCode::USD);
        // 33.33...%
        assert_eq!(price.discount_percent(&compare_at), Some(33));
    }

    #[test]
    fn test_serde_keeps_decimal_precision() {
        let price = cents(2450, CurrencyCode::USD);
        let json = serde_json::to_value(price).unwrap();
        assert_eq!(json["amount"], "24.50");
        assert_eq!(json["currency_code"], "USD");
    }
}
