//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally passing a cake ID where a customer ID is expected.

/// Errors that can occur when parsing an ID from a path segment.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input is not an unsigned decimal integer.
    #[error("id must be an unsigned integer")]
    NotANumber,
    /// The input is zero or does not fit the key column.
    #[error("id must be between 1 and {max}")]
    OutOfRange {
        /// Largest accepted ID.
        max: i32,
    },
}

/// Parse a path segment into a positive key value.
///
/// Accepts unsigned decimal integers in `1..=i32::MAX`, the range of a
/// `SERIAL` column.
///
/// # Errors
///
/// Returns [`IdError::NotANumber`] for anything that is not an unsigned
/// integer, and [`IdError::OutOfRange`] for zero or values past `i32::MAX`.
pub fn parse_key(s: &str) -> Result<i32, IdError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IdError::NotANumber);
    }
    s.parse::<i32>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or(IdError::OutOfRange { max: i32::MAX })
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_i32()`
/// - `FromStr` that accepts path segments via [`parse_key`]
/// - `From<i32>` and `Into<i32>` implementations
/// - `sqlx` `Type`, `Encode`, and `Decode` implementations (with `postgres` feature)
///
/// # Example
///
/// ```rust
/// # use confectionery_core::define_id;
/// define_id!(ShelfId);
/// define_id!(TrayId);
///
/// let shelf = ShelfId::new(1);
/// let tray: TrayId = "42".parse().unwrap();
///
/// // These are different types, so this won't compile:
/// // let _: ShelfId = tray;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                $crate::types::id::parse_key(s).map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <i32 as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <i32 as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let id = <i32 as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(Self(id))
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <i32 as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

// Define standard entity IDs
define_id!(CustomerId);
define_id!(CakeId);
define_id!(OrderId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        let id: CakeId = "42".parse().unwrap();
        assert_eq!(id.as_i32(), 42);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!("abc".parse::<CakeId>(), Err(IdError::NotANumber));
        assert_eq!("".parse::<CakeId>(), Err(IdError::NotANumber));
        assert_eq!("1.5".parse::<OrderId>(), Err(IdError::NotANumber));
    }

    #[test]
    fn test_parse_rejects_signed() {
        assert_eq!("-1".parse::<CustomerId>(), Err(IdError::NotANumber));
        assert_eq!("+1".parse::<CustomerId>(), Err(IdError::NotANumber));
        assert_eq!(" 1".parse::<CustomerId>(), Err(IdError::NotANumber));
    }

    #[test]
    fn test_parse_rejects_zero_and_overflow() {
        assert!(matches!(
            "0".parse::<CustomerId>(),
            Err(IdError::OutOfRange { .. })
        ));
        assert!(matches!(
            "2147483648".parse::<CustomerId>(),
            Err(IdError::OutOfRange { .. })
        ));
        assert!(matches!(
            "99999999999999999999".parse::<CustomerId>(),
            Err(IdError::OutOfRange { .. })
        ));
        assert!("2147483647".parse::<CustomerId>().is_ok());
    }

    #[test]
    fn test_serde_transparent() {
        let id = OrderId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let parsed: OrderId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_display() {
        assert_eq!(CustomerId::new(3).to_string(), "3");
    }
}
