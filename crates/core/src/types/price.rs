//! Cake prices in currency minor units.
//!
//! Prices are whole numbers of the smallest currency unit (cents), so no
//! decimal arithmetic is involved. The store keeps them in a `BIGINT`
//! column, which bounds the accepted range to `0..=i64::MAX`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount does not fit the storage column.
    #[error("price must be at most {max}")]
    TooLarge {
        /// Maximum accepted amount.
        max: i64,
    },
}

/// A non-negative price in minor currency units.
///
/// ```
/// use confectionery_core::Price;
///
/// let price = Price::from_minor_units(1250).unwrap();
/// assert_eq!(price.minor_units(), 1250);
/// assert!(Price::from_minor_units(u64::MAX).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Price(i64);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(0);

    /// Create a price from an amount in minor units.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::TooLarge`] if the amount exceeds `i64::MAX`.
    pub fn from_minor_units(amount: u64) -> Result<Self, PriceError> {
        i64::try_from(amount)
            .map(Self)
            .map_err(|_| PriceError::TooLarge { max: i64::MAX })
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor_units(&self) -> u64 {
        self.0.unsigned_abs()
    }

    /// Returns `true` for a zero price.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for Price {
    type Error = PriceError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::from_minor_units(value)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.minor_units()
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i64 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <i64 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        if amount < 0 {
            return Err(format!("negative price in database: {amount}").into());
        }
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i64 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_a_valid_price() {
        let price = Price::from_minor_units(0).unwrap();
        assert!(price.is_zero());
        assert_eq!(price, Price::ZERO);
    }

    #[test]
    fn test_upper_bound() {
        assert!(Price::from_minor_units(i64::MAX.unsigned_abs()).is_ok());
        assert!(matches!(
            Price::from_minor_units(i64::MAX.unsigned_abs() + 1),
            Err(PriceError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_serde_as_plain_number() {
        let price = Price::from_minor_units(2599).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "2599");

        let parsed: Price = serde_json::from_str("2599").unwrap();
        assert_eq!(parsed, price);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-5").is_err());
    }
}
