//! Repository cloning

use std::path::Path;

use git2::Repository;
use git2::build::RepoBuilder;

use super::auth::fetch_options;
use super::url::{is_local, normalize_file_url, normalize_ssh_url};
use crate::error::{Result, git as git_error};

/// Clone a git repository to a target directory
///
/// Supports HTTPS, SSH and file:// URLs. `shallow` requests depth 1; libgit2
/// cannot shallow-clone over the local transport, so local URLs always get
/// full history.
pub fn clone(url: &str, target: &Path, shallow: bool) -> Result<Repository> {
    let depth = (shallow && !is_local(url)).then_some(1);

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options(depth));

    let url_to_clone = normalize_ssh_url(url);
    let url_to_clone = normalize_file_url(&url_to_clone);
    tracing::debug!(url = %url_to_clone, target = %target.display(), ?depth, "cloning");

    builder
        .clone(url_to_clone.as_ref(), target)
        .map_err(|e| git_error::failed(&format!("clone {url}"), &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuiverError;
    use crate::test_fixtures::create_temp_dir;

    #[test]
    fn test_clone_missing_local_repository_fails_verbatim() {
        let temp = create_temp_dir();
        let missing = temp.path().join("missing");
        let url = format!("file://{}", missing.display());

        let Err(err) = clone(&url, &temp.path().join("mirror"), true) else {
            panic!("cloning a missing repository should fail");
        };
        match err {
            QuiverError::VersionControl { operation, message } => {
                assert!(operation.starts_with("clone "));
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
