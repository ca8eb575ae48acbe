//! Newtypes for the identifiers used as join and grouping keys.
//!
//! Ids are opaque strings produced upstream; the only rule enforced here is
//! that an explicitly parsed id is non-empty. Deserialization is permissive
//! (artifacts are trusted to carry whatever the producer wrote).

use crate::errors::CoreError;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! def_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.is_empty() { Err(CoreError::EmptyId) } else { Ok(Self(s.to_string())) }
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self { Self(s.to_string()) }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self { Self(s) }
        }
    };
}

def_id!(
    /// Canonical control catalog id (e.g. `CCC-IAM-01`). Join key between
    /// coverage and effectiveness reports.
    CccId
);

def_id!(
    /// System name owning a group of risks (e.g. `Payments`).
    SystemId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_empty() {
        assert_eq!("".parse::<CccId>(), Err(CoreError::EmptyId));
        assert_eq!("CCC-1".parse::<CccId>().unwrap().as_str(), "CCC-1");
    }

    #[test]
    fn ids_order_lexically() {
        let mut v: Vec<CccId> = vec!["CCC-10".into(), "CCC-2".into(), "CCC-1".into()];
        v.sort();
        let got: Vec<&str> = v.iter().map(|c| c.as_str()).collect();
        assert_eq!(got, vec!["CCC-1", "CCC-10", "CCC-2"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_is_transparent() {
        let id: SystemId = serde_json::from_str("\"Payments\"").unwrap();
        assert_eq!(id.as_str(), "Payments");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"Payments\"");
    }
}
