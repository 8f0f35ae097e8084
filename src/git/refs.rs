//! Commit and branch resolution

use git2::Repository;

use crate::error::{Result, git as git_error};

const ORIGIN_PREFIX: &str = "refs/remotes/origin/";

/// Branches probed when the remote HEAD symbolic ref is absent
const FALLBACK_BRANCHES: [&str; 2] = ["main", "master"];

/// Commit checked out at HEAD
pub fn head_commit(repo: &Repository) -> Result<String> {
    let commit = repo
        .head()
        .and_then(|head| head.peel_to_commit())
        .map_err(|e| git_error::failed("rev-parse HEAD", &e))?;
    Ok(commit.id().to_string())
}

/// Commit of `origin/<branch>` as of the last fetch
pub fn remote_branch_commit(repo: &Repository, branch: &str) -> Result<String> {
    let refname = format!("{ORIGIN_PREFIX}{branch}");
    let commit = repo
        .find_reference(&refname)
        .and_then(|reference| reference.peel_to_commit())
        .map_err(|e| git_error::failed(&format!("rev-parse {refname}"), &e))?;
    Ok(commit.id().to_string())
}

/// Name of the checked-out branch, or `None` when HEAD is detached
pub fn head_branch(repo: &Repository) -> Result<Option<String>> {
    let head = repo
        .head()
        .map_err(|e| git_error::failed("rev-parse --abbrev-ref HEAD", &e))?;
    if head.is_branch() {
        Ok(head.shorthand().map(str::to_string))
    } else {
        Ok(None)
    }
}

/// Default branch of the `origin` remote
///
/// Probes the `origin/HEAD` symbolic ref first, then `origin/main` and
/// `origin/master`, and finally the locally checked-out branch, which a
/// fresh clone always has on the remote's default.
pub fn default_branch(repo: &Repository) -> Result<String> {
    if let Ok(reference) = repo.find_reference(&format!("{ORIGIN_PREFIX}HEAD")) {
        if let Some(branch) = reference
            .symbolic_target()
            .and_then(|target| target.strip_prefix(ORIGIN_PREFIX))
        {
            return Ok(branch.to_string());
        }
    }

    for candidate in FALLBACK_BRANCHES {
        if repo
            .find_reference(&format!("{ORIGIN_PREFIX}{candidate}"))
            .is_ok()
        {
            return Ok(candidate.to_string());
        }
    }

    head_branch(repo)?.ok_or_else(|| {
        git_error::operation_failed(
            "default-branch",
            "could not determine the remote's default branch",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::Upstream;

    #[test]
    fn test_head_commit() {
        let upstream = Upstream::new("acme", "tools");
        upstream.write("README.md", "hi\n");
        let sha = upstream.commit("initial");

        let repo = Repository::open(upstream.path()).unwrap();
        assert_eq!(head_commit(&repo).unwrap(), sha);
        assert_eq!(sha.len(), 40);
    }

    #[test]
    fn test_head_commit_on_empty_repository_fails() {
        let upstream = Upstream::new("acme", "empty");
        let repo = Repository::open(upstream.path()).unwrap();
        assert!(head_commit(&repo).is_err());
    }

    #[test]
    fn test_head_branch_detached() {
        let upstream = Upstream::new("acme", "tools");
        upstream.write("README.md", "hi\n");
        let sha = upstream.commit("initial");

        let repo = Repository::open(upstream.path()).unwrap();
        assert!(head_branch(&repo).unwrap().is_some());

        repo.set_head_detached(git2::Oid::from_str(&sha).unwrap())
            .unwrap();
        assert_eq!(head_branch(&repo).unwrap(), None);
    }

    #[test]
    fn test_remote_branch_commit_unknown_branch() {
        let upstream = Upstream::new("acme", "tools");
        upstream.write("README.md", "hi\n");
        upstream.commit("initial");

        let repo = Repository::open(upstream.path()).unwrap();
        let err = remote_branch_commit(&repo, "nope").unwrap_err();
        assert!(err.to_string().contains("refs/remotes/origin/nope"));
    }
}
