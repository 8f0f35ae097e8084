//! Test fixtures and utilities for reducing test setup duplication.
//!
//! This module provides helpers to create temp directories, upstream git
//! repositories and isolated quiver data roots with a single call.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{Upstream, create_temp_dir, create_paths};
//!
//! #[test]
//! fn my_test() {
//!     let upstream = Upstream::new("acme", "tools");
//!     upstream.write("bundles/greeter/BUNDLE.md", "# Greeter");
//!     let sha = upstream.commit("initial");
//!
//!     let (temp, paths) = create_paths();
//! }
//! ```

#![allow(clippy::expect_used)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use git2::{IndexAddOption, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

use crate::config::Paths;
use crate::error::{Result, git as git_error};
use crate::git::{PullOutcome, VersionControl};

/// Absolute base for temp directories, even when `TMPDIR` is relative
fn temp_dir_base() -> PathBuf {
    let dir = std::env::temp_dir();
    if dir.is_absolute() {
        dir
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&dir))
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(temp_dir_base()).expect("Failed to create temp directory")
}

/// Create an isolated data root and artifacts directory.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_paths() -> (TempDir, Paths) {
    let temp = create_temp_dir();
    let paths = Paths::new(temp.path().join("home"), temp.path().join("artifacts"));
    (temp, paths)
}

/// An upstream repository living at `<temp>/<owner>/<repo>` on branch `main`.
///
/// Cloned through its `file://` URL, so registration derives the owner and
/// repository name exactly as it would for a hosted remote.
pub struct Upstream {
    _temp: TempDir,
    path: PathBuf,
}

impl Upstream {
    /// # Panics
    ///
    /// Panics if the repository cannot be initialised.
    #[must_use]
    pub fn new(owner: &str, repo: &str) -> Self {
        let temp = create_temp_dir();
        let path = temp.path().join(owner).join(repo);
        std::fs::create_dir_all(&path).expect("Failed to create upstream directory");

        let mut options = RepositoryInitOptions::new();
        options.initial_head("main");
        Repository::init_opts(&path, &options).expect("Failed to init upstream repository");

        Self { _temp: temp, path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }

    #[must_use]
    pub fn branch(&self) -> String {
        "main".to_string()
    }

    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write(&self, relative: &str, content: &str) {
        let full_path = self.path.join(relative);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&full_path, content).expect("Failed to write upstream file");
    }

    /// # Panics
    ///
    /// Panics if the file cannot be removed.
    pub fn remove(&self, relative: &str) {
        std::fs::remove_file(self.path.join(relative)).expect("Failed to remove upstream file");
    }

    /// Stage everything and commit, returning the new commit SHA.
    ///
    /// # Panics
    ///
    /// Panics if any git step fails.
    pub fn commit(&self, message: &str) -> String {
        let repo = Repository::open(&self.path).expect("Failed to open upstream");
        let mut index = repo.index().expect("Failed to open index");
        index
            .add_all(["*"], IndexAddOption::DEFAULT, None)
            .expect("Failed to stage files");
        index
            .update_all(["*"], None)
            .expect("Failed to stage removals");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = repo.find_tree(tree_id).expect("Failed to find tree");

        let sig = Signature::now("Test", "test@test.com").expect("Failed to create signature");
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to commit")
            .to_string()
    }
}

/// Create test files below a base directory.
///
/// # Panics
///
/// Panics if any file cannot be created.
pub fn create_test_files(base: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = base.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&full_path, content).expect("Failed to write test file");
    }
}

/// A scripted [`VersionControl`] that never touches the network
///
/// `clone_repo` only creates the destination directory; tests populate the
/// "mirror" with [`create_test_files`]. A `None` commit makes the matching
/// query fail.
#[derive(Debug, Default)]
pub struct FakeGateway {
    pub fail_clone: bool,
    pub current: RefCell<Option<String>>,
    pub remote: RefCell<Option<String>>,
    pub changed: RefCell<Vec<String>>,
    /// Every path passed to `fetch` or `pull`, in call order
    pub synced: RefCell<Vec<PathBuf>>,
    /// Non-empty directory created here when `current_commit` runs, so a
    /// later write replacing this path fails
    pub occupy_on_resolve: RefCell<Option<PathBuf>>,
}

impl FakeGateway {
    #[must_use]
    pub fn at_commit(sha: &str) -> Self {
        Self {
            current: RefCell::new(Some(sha.to_string())),
            remote: RefCell::new(Some(sha.to_string())),
            ..Self::default()
        }
    }

    /// Move the scripted upstream to `sha`, touching `changed`
    pub fn advance(&self, sha: &str, changed: &[&str]) {
        *self.remote.borrow_mut() = Some(sha.to_string());
        *self.changed.borrow_mut() = changed.iter().map(|s| (*s).to_string()).collect();
    }
}

impl VersionControl for FakeGateway {
    fn clone_repo(&self, url: &str, dest: &Path, _shallow: bool) -> Result<()> {
        if self.fail_clone {
            return Err(git_error::operation_failed(
                &format!("clone {url}"),
                "scripted failure",
            ));
        }
        std::fs::create_dir_all(dest)?;
        Ok(())
    }

    fn fetch(&self, path: &Path) -> Result<()> {
        self.synced.borrow_mut().push(path.to_path_buf());
        Ok(())
    }

    fn pull(&self, path: &Path) -> Result<PullOutcome> {
        self.synced.borrow_mut().push(path.to_path_buf());
        let remote = self.remote.borrow().clone();
        let current = self.current.borrow().clone();
        match (current, remote) {
            (Some(from), Some(to)) if from != to => {
                *self.current.borrow_mut() = Some(to.clone());
                Ok(PullOutcome::FastForwarded { from, to })
            }
            (_, Some(commit)) => Ok(PullOutcome::UpToDate { commit }),
            (_, None) => Err(git_error::operation_failed("pull", "scripted failure")),
        }
    }

    fn current_commit(&self, _path: &Path) -> Result<String> {
        if let Some(path) = self.occupy_on_resolve.borrow_mut().take() {
            std::fs::create_dir_all(path.join("occupied"))?;
        }
        self.current
            .borrow()
            .clone()
            .ok_or_else(|| git_error::operation_failed("resolve HEAD", "scripted failure"))
    }

    fn remote_commit(&self, _path: &Path, branch: &str) -> Result<String> {
        self.remote.borrow().clone().ok_or_else(|| {
            git_error::operation_failed(&format!("resolve origin/{branch}"), "scripted failure")
        })
    }

    fn default_branch(&self, _path: &Path) -> Result<String> {
        Ok("main".to_string())
    }

    fn changed_files(&self, _path: &Path, _from: &str, _to: &str) -> Result<Vec<String>> {
        Ok(self.changed.borrow().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_temp_dir() {
        let temp = create_temp_dir();
        assert!(temp.path().exists());
    }

    #[test]
    fn test_upstream_commits_on_main() {
        let upstream = Upstream::new("acme", "tools");
        upstream.write("snippets/a.md", "a");
        let first = upstream.commit("first");
        upstream.write("snippets/b.md", "b");
        let second = upstream.commit("second");

        assert_ne!(first, second);
        let repo = Repository::open(upstream.path()).unwrap();
        let head = repo.head().unwrap();
        assert_eq!(head.shorthand(), Some("main"));
        assert_eq!(head.peel_to_commit().unwrap().parent_count(), 1);
        assert!(upstream.url().ends_with("/acme/tools"));
    }
}
