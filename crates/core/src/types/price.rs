//! Coffee price representation.
//!
//! A café's coffee price is stored and displayed as a currency-prefixed
//! string with exactly two decimals (e.g. "£2.75"). This type owns the
//! formatting and parsing on both sides of that representation so the
//! round-trip (format, then parse back) is lossless for any price with at
//! most two decimal digits.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency symbol used for all coffee prices.
pub const CURRENCY_SYMBOL: &str = "£";

/// Errors that can occur when parsing a [`CoffeePrice`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("price must be a number")]
    Invalid,
    /// The price is below zero.
    #[error("price must be at least 0")]
    Negative,
}

/// A coffee price, normalized to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoffeePrice(Decimal);

impl CoffeePrice {
    /// Parse a plain numeric amount (e.g. "2.75"), as submitted by a form.
    ///
    /// The amount is rounded to two decimal places.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Invalid` if the input is not a number, or
    /// `PriceError::Negative` if it is below zero.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount: Decimal = s.trim().parse().map_err(|_| PriceError::Invalid)?;
        if amount.is_sign_negative() {
            return Err(PriceError::Negative);
        }
        let mut amount = amount.round_dp(2);
        amount.rescale(2);
        Ok(Self(amount))
    }

    /// Parse the stored display representation (e.g. "£2.75").
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Invalid` if the remainder after stripping the
    /// currency symbol is not a number.
    pub fn from_display(s: &str) -> Result<Self, PriceError> {
        Self::parse(s.trim().trim_start_matches(CURRENCY_SYMBOL))
    }

    /// The plain numeric amount without the currency symbol (e.g. "2.75").
    ///
    /// This is the value loaded back into the price form field on edit.
    #[must_use]
    pub fn amount(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for CoffeePrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY_SYMBOL}{}", self.0)
    }
}

// SQLx support (with sqlite feature). Prices are stored as their display
// representation, currency symbol included.
#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for CoffeePrice {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for CoffeePrice {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Ok(Self::from_display(&s)?)
    }
}

#[cfg(feature = "sqlite")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for CoffeePrice {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'q, sqlx::Sqlite>>::encode(self.to_string(), buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats_two_decimals() {
        assert_eq!(CoffeePrice::parse("2.75").unwrap().to_string(), "£2.75");
        assert_eq!(CoffeePrice::parse("3").unwrap().to_string(), "£3.00");
        assert_eq!(CoffeePrice::parse("2.5").unwrap().to_string(), "£2.50");
        assert_eq!(CoffeePrice::parse("0").unwrap().to_string(), "£0.00");
    }

    #[test]
    fn test_parse_rounds_excess_precision() {
        assert_eq!(CoffeePrice::parse("2.756").unwrap().to_string(), "£2.76");
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert!(matches!(
            CoffeePrice::parse("-1.50"),
            Err(PriceError::Negative)
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            CoffeePrice::parse("two quid"),
            Err(PriceError::Invalid)
        ));
        assert!(matches!(CoffeePrice::parse(""), Err(PriceError::Invalid)));
    }

    #[test]
    fn test_display_roundtrip_is_lossless() {
        for raw in ["0.00", "0.01", "2.75", "10.00", "999.99"] {
            let price = CoffeePrice::parse(raw).unwrap();
            let display = price.to_string();
            let back = CoffeePrice::from_display(&display).unwrap();
            assert_eq!(back, price);
            assert_eq!(back.amount(), raw);
        }
    }

    #[test]
    fn test_from_display_strips_symbol() {
        let price = CoffeePrice::from_display("£2.75").unwrap();
        assert_eq!(price.amount(), "2.75");
    }
}
