//! Strongly-typed identifiers for records owned by the accounting API.
//!
//! The remote service keys its rows with integers, so every id here is a
//! transparent `i64` newtype. Ids are never minted client-side.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a ledger account.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

/// Identifier of a third party (customer, supplier, employee).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThirdPartyId(i64);

/// Identifier of a voucher created by the API.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoucherId(i64);

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        /// Parses the value of a `<select>` option. Empty text is an error;
        /// callers map "no selection" to `None` before parsing.
        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id($name, e))?;
                Ok(Self(raw))
            }
        }
    };
}

impl_int_newtype!(AccountId, "AccountId");
impl_int_newtype!(ThirdPartyId, "ThirdPartyId");
impl_int_newtype!(VoucherId, "VoucherId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_select_values() {
        assert_eq!("42".parse::<AccountId>().unwrap(), AccountId::new(42));
        assert_eq!(" 7 ".parse::<ThirdPartyId>().unwrap().get(), 7);
    }

    #[test]
    fn empty_select_value_is_invalid() {
        let err = "".parse::<AccountId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId { kind: "AccountId", .. }));
        assert!(err.to_string().starts_with("invalid AccountId"));
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&VoucherId::new(15)).unwrap();
        assert_eq!(json, "15");
        let back: VoucherId = serde_json::from_str("15").unwrap();
        assert_eq!(back, VoucherId::new(15));
    }
}
