// IAM role metadata and the sources that provide it
mod cache;

pub use cache::RoleCache;

use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One IAM role with its resolved tags. Tag order is preserved from the
/// source so listings stay deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    pub arn: String,
    #[serde(default)]
    pub tags: IndexMap<String, String>,
}

impl Role {
    pub fn all_tags(&self) -> &IndexMap<String, String> {
        &self.tags
    }
}

/// A collection of roles for one SSO instance.
pub trait RoleSource {
    /// Brings the collection up to date. Failures are propagated; callers
    /// must not print stale data after a failed refresh.
    fn refresh(&mut self) -> Result<()>;

    /// Roles in source order.
    fn roles(&self) -> &[Role];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_tags_keep_insertion_order() {
        let mut tags = IndexMap::new();
        tags.insert("Role".to_string(), "admin".to_string());
        tags.insert("AccountAlias".to_string(), "prod".to_string());
        tags.insert("Email".to_string(), "ops@example.com".to_string());

        let role = Role {
            arn: "arn:aws:iam::123456789012:role/Admin".to_string(),
            tags,
        };

        let keys: Vec<&str> = role.all_tags().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Role", "AccountAlias", "Email"]);
    }

    #[test]
    fn test_role_deserializes_without_tags() {
        let role: Role = serde_json::from_str(r#"{"arn":"arn:aws:iam::1:role/A"}"#).unwrap();
        assert!(role.tags.is_empty());
    }
}
