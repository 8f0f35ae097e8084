//! Version-control gateway
//!
//! A thin layer over libgit2 that only reasons about commits and refs:
//! - Shallow cloning of mirrors
//! - Fetching and fast-forward pulling
//! - Resolving local, remote and default-branch commits
//! - Name-only diffs between two commits
//!
//! Every failure surfaces as [`QuiverError::VersionControl`] carrying libgit2's
//! message verbatim. Nothing here retries; retrying is the caller's decision.
//!
//! [`QuiverError::VersionControl`]: crate::error::QuiverError::VersionControl

pub mod auth;
pub mod clone;
pub mod diff;
pub mod refs;
pub mod sync;
pub mod url;

use std::path::Path;

use git2::Repository;
use serde::Serialize;

use crate::error::{Result, git as git_error};

pub use url::parse_remote_url;

/// Result of a fast-forward pull
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PullOutcome {
    UpToDate { commit: String },
    FastForwarded { from: String, to: String },
}

/// Operations the package manager needs from version control
///
/// The production implementation is [`GitGateway`]; tests substitute scripted fakes.
pub trait VersionControl {
    /// Clone `url` into `dest`; `shallow` limits history to the tip commit
    fn clone_repo(&self, url: &str, dest: &Path, shallow: bool) -> Result<()>;

    /// Fetch remote-tracking refs without touching the working tree
    fn fetch(&self, path: &Path) -> Result<()>;

    /// Fetch and fast-forward the checked-out branch; diverged history is an error
    fn pull(&self, path: &Path) -> Result<PullOutcome>;

    /// Commit checked out in the working tree
    fn current_commit(&self, path: &Path) -> Result<String>;

    /// Commit of `branch` on the `origin` remote as of the last fetch
    fn remote_commit(&self, path: &Path, branch: &str) -> Result<String>;

    /// The remote's default branch
    fn default_branch(&self, path: &Path) -> Result<String>;

    /// Paths touched between two commits, relative to the repository root
    fn changed_files(&self, path: &Path, from: &str, to: &str) -> Result<Vec<String>>;
}

/// libgit2-backed gateway
#[derive(Debug, Clone, Copy, Default)]
pub struct GitGateway;

impl VersionControl for GitGateway {
    fn clone_repo(&self, url: &str, dest: &Path, shallow: bool) -> Result<()> {
        clone::clone(url, dest, shallow).map(|_| ())
    }

    fn fetch(&self, path: &Path) -> Result<()> {
        sync::fetch(&open(path)?)
    }

    fn pull(&self, path: &Path) -> Result<PullOutcome> {
        sync::pull_fast_forward(&open(path)?)
    }

    fn current_commit(&self, path: &Path) -> Result<String> {
        refs::head_commit(&open(path)?)
    }

    fn remote_commit(&self, path: &Path, branch: &str) -> Result<String> {
        refs::remote_branch_commit(&open(path)?, branch)
    }

    fn default_branch(&self, path: &Path) -> Result<String> {
        refs::default_branch(&open(path)?)
    }

    fn changed_files(&self, path: &Path, from: &str, to: &str) -> Result<Vec<String>> {
        diff::changed_files(&open(path)?, from, to)
    }
}

/// Open an existing repository
pub fn open(path: &Path) -> Result<Repository> {
    Repository::open(path).map_err(|e| git_error::failed(&format!("open {}", path.display()), &e))
}
