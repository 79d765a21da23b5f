//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, non-empty
//! page windows) so that once a value reaches the repository layer it can be
//! treated as trusted.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Requested page window holds no rows.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    /// Requested window starts past the addressable range of the store.
    #[error("page offset is out of range")]
    PageOutOfRange,
    /// Stored instant cannot be represented as a UTC date-time.
    #[error("timestamp is out of range")]
    TimestampOutOfRange,
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ClientId, "Unique identifier for a client.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_id_rejects_non_positive_values() {
        assert_eq!(ClientId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ClientId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ClientId::new(7).unwrap().get(), 7);
    }

    #[test]
    fn client_id_conversions() {
        let id = ClientId::try_from(12).unwrap();
        assert_eq!(i32::from(id), 12);
        assert_eq!(id.to_string(), "12");
        assert!(ClientId::new(1).unwrap() < ClientId::new(2).unwrap());
    }
}
