//! Product price.
//!
//! Prices are plain floating-point amounts in the store's single currency.
//! There is no currency code and no rounding; the value round-trips exactly
//! as the client sent it.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is NaN or infinite.
    #[error("price must be a finite number")]
    NotFinite,
}

/// A product price.
///
/// Negative amounts are accepted (the catalog never checked them), but NaN
/// and infinities are rejected because they cannot be stored or serialized
/// as JSON numbers.
///
/// ```
/// use tinycart_core::Price;
///
/// let price = Price::new(9.99).unwrap();
/// assert!((price.as_f64() - 9.99).abs() < f64::EPSILON);
/// assert!(Price::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotFinite`] for NaN or infinite amounts.
    pub fn new(amount: f64) -> Result<Self, PriceError> {
        if amount.is_finite() {
            Ok(Self(amount))
        } else {
            Err(PriceError::NotFinite)
        }
    }

    /// Get the underlying amount.
    #[must_use]
    pub const fn as_f64(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = PriceError;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for Price {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <f64 as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <f64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for Price {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <f64 as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Ok(Self::new(amount)?)
    }
}

#[cfg(feature = "sqlite")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Sqlite as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <f64 as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(Price::new(f64::INFINITY), Err(PriceError::NotFinite));
        assert_eq!(Price::new(f64::NEG_INFINITY), Err(PriceError::NotFinite));
        assert!(Price::new(f64::NAN).is_err());
    }

    #[test]
    fn test_negative_and_zero_are_accepted() {
        assert!(Price::new(0.0).is_ok());
        assert!(Price::new(-1.5).is_ok());
    }

    #[test]
    fn test_serde_is_a_bare_number() {
        let price = Price::new(9.99).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "9.99");

        let parsed: Price = serde_json::from_str("12").unwrap();
        assert!((parsed.as_f64() - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display_uses_two_decimals() {
        assert_eq!(Price::new(3.5).unwrap().to_string(), "3.50");
    }
}
