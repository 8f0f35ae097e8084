//! Update detection and application
//!
//! Detection fetches each involved mirror once, compares the recorded commit
//! with the remote head of the registration's default branch, and narrows the
//! raw diff to paths under the package's `source_path`. Applying an update
//! pulls the mirror and reinstalls the package from its original spec.

use std::collections::HashSet;

use serde::Serialize;

use super::PackageManager;
use crate::config::utils::RecordContainer;
use crate::domain::{CommitId, InstalledPackage};
use crate::error::{Result, package};
use crate::git::VersionControl;
use crate::source::InstallSpec;

/// Drift of one installed package against its upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateCheck {
    pub name: String,
    pub namespace: String,
    pub current: CommitId,
    pub latest: String,
    pub has_update: bool,
    /// Changed paths under the package's source path, relative to the mirror root
    pub changed_files: Vec<String>,
}

/// Whether `path` lies at or below `source_path`, on segment boundaries
fn is_under(path: &str, source_path: &str) -> bool {
    path == source_path
        || path
            .strip_prefix(source_path)
            .is_some_and(|rest| rest.starts_with('/'))
}

impl<G: VersionControl> PackageManager<'_, G> {
    /// Check installed packages for upstream changes
    ///
    /// `names` of `None` checks every package whose repository is still
    /// registered. Any fetch or resolution failure aborts the check.
    pub fn check_updates(&self, names: Option<&[String]>) -> Result<Vec<UpdateCheck>> {
        let ledger = self.load_ledger()?;

        let packages: Vec<&InstalledPackage> = match names {
            Some(names) => names
                .iter()
                .map(|n| ledger.find(n).ok_or_else(|| package::not_found(n)))
                .collect::<Result<_>>()?,
            None => {
                let registered: HashSet<String> = self
                    .registry
                    .list()?
                    .into_iter()
                    .map(|r| r.namespace)
                    .collect();
                ledger
                    .packages
                    .iter()
                    .filter(|p| {
                        let keep = registered.contains(&p.namespace);
                        if !keep {
                            tracing::warn!(
                                package = %p.namespaced_name,
                                namespace = %p.namespace,
                                "repository no longer registered; skipping"
                            );
                        }
                        keep
                    })
                    .collect()
            }
        };

        let mut fetched = HashSet::new();
        let mut checks = Vec::with_capacity(packages.len());

        for pkg in packages {
            let registration = self.registry.get(&pkg.namespace)?;
            let mirror = self.registry.mirror(&pkg.namespace)?;

            if fetched.insert(pkg.namespace.clone()) {
                tracing::debug!(namespace = %pkg.namespace, "fetching mirror");
                self.gateway().fetch(&mirror)?;
            }

            let latest = self
                .gateway()
                .remote_commit(&mirror, &registration.default_branch)?;

            let (has_update, changed_files) = match pkg.version.commit().as_known() {
                Some(current) if current == latest => (false, Vec::new()),
                Some(current) => {
                    let changed = self
                        .gateway()
                        .changed_files(&mirror, current, &latest)?
                        .into_iter()
                        .filter(|p| is_under(p, &pkg.source_path))
                        .collect();
                    (true, changed)
                }
                // Nothing to diff against
                None => (true, Vec::new()),
            };

            checks.push(UpdateCheck {
                name: pkg.namespaced_name.clone(),
                namespace: pkg.namespace.clone(),
                current: pkg.version.commit().clone(),
                latest,
                has_update,
                changed_files,
            });
        }

        Ok(checks)
    }

    /// Pull the package's mirror and reinstall it from the same spec
    pub fn apply_update(&self, namespaced_name: &str) -> Result<InstalledPackage> {
        let pkg = self.info(namespaced_name)?;
        self.registry.update(&pkg.namespace)?;

        self.uninstall(namespaced_name)?;

        let spec = InstallSpec {
            namespace: pkg.namespace.clone(),
            path: pkg.source_path.clone(),
            version: pkg.requested_version.clone(),
        };
        self.install_spec(&spec, Some(pkg.installed_at))
    }
}
