//! Strongly-typed ID wrappers for ledger records
//!
//! Transactions, categories, budgets and goals each get their own newtype so
//! a budget id can never be passed where a category id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Check whether a user-typed reference points at this ID.
            ///
            /// Accepts the full UUID, the short display form ("bud-1a2b3c4d"),
            /// or a bare hex prefix of at least 4 characters.
            pub fn matches_ref(&self, reference: &str) -> bool {
                let reference = reference.trim();
                let reference = reference.strip_prefix($display_prefix).unwrap_or(reference);
                if reference.len() < 4 {
                    return false;
                }
                self.0.to_string().starts_with(&reference.to_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Try to parse the full UUID
                if let Ok(uuid) = Uuid::parse_str(s) {
                    return Ok(Self(uuid));
                }
                // Try stripping common prefixes
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(CategoryId, "cat-");
define_id!(BudgetId, "bud-");
define_id!(GoalId, "goal-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_prefix() {
        let id = BudgetId::new();
        let display = id.to_string();
        assert!(display.starts_with("bud-"));
        assert_eq!(display.len(), 12);

        let goal = GoalId::new();
        assert_eq!(goal.to_string().len(), 13);
    }

    #[test]
    fn test_from_str_accepts_full_uuid() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: CategoryId = uuid_str.parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);
    }

    #[test]
    fn test_from_str_strips_prefix() {
        let id: TransactionId = "txn-550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(
            id.as_uuid().to_string(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn test_matches_ref() {
        let id = BudgetId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert!(id.matches_ref("bud-550e8400"));
        assert!(id.matches_ref("550E"));
        assert!(id.matches_ref("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!id.matches_ref("bud-55"));
        assert!(!id.matches_ref("bud-12345678"));
    }

    #[test]
    fn test_id_serialization() {
        let id = GoalId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: GoalId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
