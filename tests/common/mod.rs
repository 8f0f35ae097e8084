//! Common test utilities for quiver integration tests

#![allow(dead_code)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use git2::{IndexAddOption, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

/// Isolated data root and artifacts directory for one test
pub struct TestEnv {
    pub temp: TempDir,
    pub home: PathBuf,
    pub artifacts: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let home = temp.path().join("home");
        let artifacts = temp.path().join("artifacts");
        Self {
            temp,
            home,
            artifacts,
        }
    }

    /// The real quiver binary pointed at this environment
    pub fn cmd(&self) -> Command {
        let mut cmd = quiver_cmd();
        cmd.env("QUIVER_HOME", &self.home)
            .env("QUIVER_ARTIFACTS_DIR", &self.artifacts)
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run a command with `--json` and parse its stdout
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .cmd()
            .arg("--json")
            .args(args)
            .output()
            .expect("Failed to run quiver");
        assert!(
            output.status.success(),
            "quiver {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
    }

    pub fn artifact(&self, relative: &str) -> PathBuf {
        self.artifacts.join(relative)
    }

    pub fn mirror(&self, namespace: &str) -> PathBuf {
        self.home.join("repos").join(namespace)
    }

    /// Register `upstream` and return the namespace it got
    pub fn register(&self, upstream: &Upstream) -> String {
        let value = self.json(&["repo", "add", &upstream.url()]);
        value["namespace"]
            .as_str()
            .expect("namespace in output")
            .to_string()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn quiver_cmd() -> Command {
    Command::cargo_bin("quiver").unwrap()
}

/// A local git repository standing in for a remote, laid out as `<owner>/<repo>`
pub struct Upstream {
    _temp: TempDir,
    path: PathBuf,
}

impl Upstream {
    pub fn new(owner: &str, repo: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join(owner).join(repo);
        std::fs::create_dir_all(&path).expect("Failed to create upstream directory");

        let mut options = RepositoryInitOptions::new();
        options.initial_head("main");
        Repository::init_opts(&path, &options).expect("Failed to init upstream repository");

        Self { _temp: temp, path }
    }

    /// Repository with one bundle, two snippets, a profile and a trigger
    pub fn with_sample_content() -> Self {
        let upstream = Self::new("acme", "tools");
        upstream.write(
            "bundles/greeter/BUNDLE.md",
            "---\ndescription: Greets people\n---\n# Greeter\n",
        );
        upstream.write("bundles/greeter/templates/hello.txt", "Hello!\n");
        upstream.write(
            "snippets/review.md",
            "---\ndescription: Review checklist\n---\nCheck the tests.\n",
        );
        upstream.write("snippets/refactor.md", "Keep functions small.\n");
        upstream.write("profiles/reviewer.md", "You review code.\n");
        upstream.write("triggers/pre-commit.sh", "#!/bin/sh\necho ok\n");
        upstream.write("README.md", "# acme tools\n");
        upstream.commit("initial");
        upstream
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }

    pub fn write(&self, relative: &str, content: &str) {
        let full_path = self.path.join(relative);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Stage everything and commit, returning the new commit id
    pub fn commit(&self, message: &str) -> String {
        let repo = Repository::open(&self.path).expect("Failed to open upstream");
        let mut index = repo.index().expect("Failed to get index");
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .expect("Failed to stage files");
        index.write().expect("Failed to write index");

        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = repo.find_tree(tree_id).expect("Failed to find tree");
        let sig = Signature::now("Test", "test@example.com").expect("Failed to create signature");

        let parent = repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to commit")
            .to_string()
    }
}
