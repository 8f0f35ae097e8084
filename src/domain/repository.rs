//! Registered remote repositories

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether `namespace` matches `[a-z0-9-]+`
pub fn is_valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty()
        && namespace
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// A remote repository registered under a namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRegistration {
    /// Unique short name scoping every package installed from this repository
    pub namespace: String,
    pub remote_url: String,
    pub owner: String,
    pub repo_name: String,
    pub default_branch: String,
    pub added_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_pattern() {
        for ok in ["acme", "acme-tool", "a1", "-", "0"] {
            assert!(is_valid_namespace(ok), "{ok} should be valid");
        }
        for bad in ["", "Acme", "acme_tool", "acme tool", "acme:x", "ünï"] {
            assert!(!is_valid_namespace(bad), "{bad} should be invalid");
        }
    }
}
