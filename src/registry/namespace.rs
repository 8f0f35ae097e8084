//! Default namespace derivation

/// Characters kept from each of owner and repository name
const PREFIX_LEN: usize = 4;

/// Lowercase `part`, map anything outside `[a-z0-9-]` to `-`, keep the first four characters
fn prefix(part: &str) -> String {
    part.chars()
        .map(|c| c.to_ascii_lowercase())
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .take(PREFIX_LEN)
        .collect()
}

/// Namespace used when `repo add` is not given one, e.g. `acme/tools` → `acme-tool`
pub fn derive_namespace(owner: &str, repo_name: &str) -> String {
    format!("{}-{}", prefix(owner), prefix(repo_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::is_valid_namespace;

    #[test]
    fn test_derive_namespace() {
        assert_eq!(derive_namespace("acme", "tools"), "acme-tool");
        assert_eq!(derive_namespace("Anthropics", "Skills"), "anth-skil");
        assert_eq!(derive_namespace("ab", "c"), "ab-c");
    }

    #[test]
    fn test_derive_namespace_sanitizes() {
        let ns = derive_namespace("my.org", "x_y");
        assert_eq!(ns, "my-o-x-y");
        assert!(is_valid_namespace(&ns));
    }

    #[test]
    fn test_different_owners_differ() {
        assert_ne!(
            derive_namespace("acme", "tools"),
            derive_namespace("beta", "tools")
        );
        // Shared prefixes collide and are caught by the registry
        assert_eq!(
            derive_namespace("acme", "tools"),
            derive_namespace("acmecorp", "toolbox")
        );
    }
}
