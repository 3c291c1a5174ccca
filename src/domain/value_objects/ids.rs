//! Strongly-typed identifiers for backend records
//!
//! The character backend hands out integer primary keys, so every id here is a
//! thin wrapper around `i64` that serializes transparently.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(CharacterId);
define_id!(HeritageId);
define_id!(BenefitId);
define_id!(DetrimentId);
define_id!(ViceId);
define_id!(AbilityId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        let id = HeritageId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");

        let parsed: CharacterId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, CharacterId::new(42));
        assert_eq!(parsed.to_string(), "42");
    }
}
