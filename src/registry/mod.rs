//! Repository registry
//!
//! Maps a namespace to a remote URL and a local mirror under `<home>/repos/`.
//! Registration order matters: the URL is validated, the namespace derived and
//! checked, the mirror cloned, the default branch probed, and only then is the
//! registration persisted. A failed clone never leaves a registration behind.

mod namespace;

use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::config::utils::RecordContainer;
use crate::config::{Paths, RegistryFile};
use crate::domain::{RepositoryRegistration, is_valid_namespace};
use crate::error::{Result, fs as fs_error, repo};
use crate::git::{PullOutcome, VersionControl, parse_remote_url};

pub use namespace::derive_namespace;

/// Outcome of syncing one mirror in a batch
#[derive(Debug)]
pub struct SyncReport {
    pub namespace: String,
    pub outcome: Result<PullOutcome>,
}

/// Registered repositories and their mirrors
#[derive(Debug)]
pub struct RepoRegistry<G: VersionControl> {
    paths: Paths,
    gateway: G,
}

impl<G: VersionControl> RepoRegistry<G> {
    pub fn new(paths: Paths, gateway: G) -> Self {
        Self { paths, gateway }
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    fn load(&self) -> Result<RegistryFile> {
        RegistryFile::load(&self.paths.registry_file())
    }

    /// Register `url`, cloning it under `namespace` or a derived one
    pub fn add(&self, url: &str, namespace: Option<&str>) -> Result<RepositoryRegistration> {
        let remote = parse_remote_url(url)?;

        let namespace = match namespace {
            Some(ns) => ns.to_string(),
            None => derive_namespace(&remote.owner, &remote.repo_name),
        };
        if !is_valid_namespace(&namespace) {
            return Err(repo::invalid_namespace(namespace));
        }

        let mut registry = self.load()?;
        if registry.contains(&namespace) {
            return Err(repo::namespace_exists(namespace));
        }

        let mirror = self.paths.mirror_dir(&namespace);
        if mirror.exists() {
            tracing::warn!(path = %mirror.display(), "removing stale mirror without a registration");
            remove_mirror(&mirror)?;
        }

        tracing::info!(url = %remote.url, namespace = %namespace, "cloning repository");
        self.gateway.clone_repo(&remote.url, &mirror, true)?;

        let default_branch = match self.gateway.default_branch(&mirror) {
            Ok(branch) => branch,
            Err(e) => {
                discard_mirror(&mirror);
                return Err(e);
            }
        };

        let registration = RepositoryRegistration {
            namespace,
            remote_url: remote.url,
            owner: remote.owner,
            repo_name: remote.repo_name,
            default_branch,
            added_at: Utc::now(),
        };

        registry.insert(registration.clone())?;
        if let Err(e) = registry.save(&self.paths.registry_file()) {
            discard_mirror(&mirror);
            return Err(e);
        }

        Ok(registration)
    }

    /// Unregister a namespace and delete its mirror; installed packages stay
    pub fn remove(&self, namespace: &str) -> Result<RepositoryRegistration> {
        let mut registry = self.load()?;
        let registration = registry
            .remove(namespace)
            .ok_or_else(|| repo::not_found(namespace))?;
        registry.save(&self.paths.registry_file())?;

        remove_mirror(&self.paths.mirror_dir(namespace))?;
        Ok(registration)
    }

    pub fn get(&self, namespace: &str) -> Result<RepositoryRegistration> {
        self.load()?
            .find(namespace)
            .cloned()
            .ok_or_else(|| repo::not_found(namespace))
    }

    /// All registrations in registration order
    pub fn list(&self) -> Result<Vec<RepositoryRegistration>> {
        Ok(self.load()?.repos)
    }

    /// Mirror directory of a registered namespace, which must exist on disk
    pub fn mirror(&self, namespace: &str) -> Result<PathBuf> {
        let mirror = self.paths.mirror_dir(namespace);
        if !mirror.is_dir() {
            return Err(repo::mirror_missing(
                namespace,
                mirror.display().to_string(),
            ));
        }
        Ok(mirror)
    }

    /// Fast-forward one mirror
    pub fn update(&self, namespace: &str) -> Result<PullOutcome> {
        self.get(namespace)?;
        let mirror = self.mirror(namespace)?;
        let outcome = self.gateway.pull(&mirror)?;
        tracing::debug!(namespace, ?outcome, "mirror synced");
        Ok(outcome)
    }

    /// Fast-forward several mirrors one after another
    ///
    /// `namespaces` of `None` means every registration. A failing mirror is
    /// reported in its [`SyncReport`] and does not stop the batch.
    /// `on_start` is called before each mirror is synced.
    pub fn update_all(
        &self,
        namespaces: Option<&[String]>,
        mut on_start: impl FnMut(&str),
    ) -> Result<Vec<SyncReport>> {
        let namespaces: Vec<String> = match namespaces {
            Some(names) => names.to_vec(),
            None => self.list()?.into_iter().map(|r| r.namespace).collect(),
        };

        Ok(namespaces
            .into_iter()
            .map(|namespace| {
                on_start(&namespace);
                let outcome = self.update(&namespace);
                if let Err(e) = &outcome {
                    tracing::warn!(namespace = %namespace, error = %e, "mirror sync failed");
                }
                SyncReport { namespace, outcome }
            })
            .collect())
    }
}

fn remove_mirror(path: &Path) -> Result<()> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(fs_error::write_failed(
            path.display().to_string(),
            e.to_string(),
        )),
    }
}

/// Remove a freshly cloned mirror after a later step failed
fn discard_mirror(path: &Path) {
    if let Err(e) = remove_mirror(path) {
        tracing::warn!(path = %path.display(), error = %e, "failed to remove mirror");
    }
}
