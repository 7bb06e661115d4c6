//! Non-negative prices using decimal arithmetic.
//!
//! The range matches the `NUMERIC(12,2)` column prices are stored in, so a
//! value that constructs is one the database keeps unchanged.
//!
//! Prices travel over the wire as plain JSON numbers (`19.99`), matching what
//! storefront clients expect, but are held as [`Decimal`] so arithmetic never
//! drifts.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    #[error("price cannot exceed {max} (got {0})", max = Price::MAX.0)]
    TooLarge(Decimal),
    #[error("price must have at most 2 decimal places (got {0})")]
    TooPrecise(Decimal),
}

/// Decimal places a price may carry.
const MAX_SCALE: u32 = 2;

/// A non-negative amount in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero, the price of a freshly created sample product.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest storable price, `9999999999.99`.
    pub const MAX: Self = Self(Decimal::from_parts(3_567_587_327, 232, 0, false, 2));

    /// Create a price, rejecting negative amounts and amounts that do not fit
    /// `NUMERIC(12,2)`.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount < 0`, `PriceError::TooLarge`
    /// above [`Price::MAX`] and `PriceError::TooPrecise` for more than two
    /// decimal places.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        if amount > Self::MAX.0 {
            return Err(PriceError::TooLarge(amount));
        }
        if amount.normalize().scale() > MAX_SCALE {
            return Err(PriceError::TooPrecise(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from an integer number of cents.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` for negative cent values and
    /// `PriceError::TooLarge` above [`Price::MAX`].
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 2)),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_rejects_values_the_column_cannot_hold() {
        assert!(matches!(
            Price::new(Decimal::new(19_999, 3)),
            Err(PriceError::TooPrecise(_))
        ));
        assert!(matches!(
            Price::new(Decimal::new(123_456_789_012_345, 1)),
            Err(PriceError::TooLarge(_))
        ));
        assert_eq!(Price::MAX.to_string(), "9999999999.99");
        assert!(Price::new(Price::MAX.amount()).is_ok());
        // Trailing zeros are not extra precision.
        assert!(Price::new(Decimal::new(19_990, 3)).is_ok());
    }

    #[test]
    fn test_deserialize_rejects_third_decimal_place() {
        assert!(serde_json::from_str::<Price>("19.999").is_err());
        assert!(serde_json::from_str::<Price>("12345678901234.5").is_err());
    }

    #[test]
    fn test_serializes_as_number() {
        let price = Price::from_cents(1999).unwrap();
        assert_eq!(serde_json::to_value(price).unwrap(), serde_json::json!(19.99));
    }

    #[test]
    fn test_deserialize_rejects_negative_numbers() {
        assert!(serde_json::from_str::<Price>("-5").is_err());
        let price: Price = serde_json::from_str("89.99").unwrap();
        assert_eq!(price.to_string(), "89.99");
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(Price::from_cents(500).unwrap().to_string(), "5.00");
        assert_eq!(Price::ZERO.to_string(), "0.00");
    }
}
