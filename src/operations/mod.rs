//! Package lifecycle operations
//!
//! [`PackageManager`] orchestrates install, uninstall and update on top of:
//! - the repository registry (namespace → mirror)
//! - the install spec parser
//! - the version-control gateway
//! - the ledger (`installed.json`)
//!
//! Installs are atomic: files are tracked in a [`Transaction`] and the ledger is
//! written last, so a failure anywhere leaves neither files nor a record.
//!
//! [`Transaction`]: crate::transaction::Transaction

mod install;
mod uninstall;
mod update;

use crate::config::utils::RecordContainer;
use crate::config::{Ledger, Paths};
use crate::domain::{ArtifactKind, InstalledPackage};
use crate::error::{Result, package};
use crate::git::VersionControl;
use crate::registry::RepoRegistry;

pub use update::UpdateCheck;

/// Filters for [`PackageManager::list`]
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub kind: Option<ArtifactKind>,
    pub namespace: Option<String>,
}

impl ListFilter {
    fn matches(&self, pkg: &InstalledPackage) -> bool {
        self.kind.is_none_or(|k| k == pkg.kind)
            && self.namespace.as_deref().is_none_or(|ns| ns == pkg.namespace)
    }
}

/// Install, uninstall and update packages from registered repositories
pub struct PackageManager<'a, G: VersionControl> {
    registry: &'a RepoRegistry<G>,
}

impl<'a, G: VersionControl> PackageManager<'a, G> {
    pub fn new(registry: &'a RepoRegistry<G>) -> Self {
        Self { registry }
    }

    fn paths(&self) -> &Paths {
        self.registry.paths()
    }

    fn gateway(&self) -> &G {
        self.registry.gateway()
    }

    fn load_ledger(&self) -> Result<Ledger> {
        Ledger::load(&self.paths().ledger_file())
    }

    /// Installed packages in installation order
    pub fn list(&self, filter: &ListFilter) -> Result<Vec<InstalledPackage>> {
        Ok(self
            .load_ledger()?
            .packages
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect())
    }

    /// Look up one installed package by its namespaced name
    pub fn info(&self, namespaced_name: &str) -> Result<InstalledPackage> {
        self.load_ledger()?
            .find(namespaced_name)
            .cloned()
            .ok_or_else(|| package::not_found(namespaced_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuiverError;
    use crate::test_fixtures::{FakeGateway, create_paths, create_test_files};

    #[test]
    fn test_list_filters_and_info() {
        let (_temp, paths) = create_paths();
        let registry = RepoRegistry::new(paths.clone(), FakeGateway::at_commit("c1"));
        registry.add("gh:acme/tools", None).unwrap();
        registry.add("gh:beta/tools", None).unwrap();
        for ns in ["acme-tool", "beta-tool"] {
            create_test_files(
                &paths.mirror_dir(ns),
                &[
                    ("snippets/review.md", "review"),
                    ("triggers/lint.sh", "#!/bin/sh\n"),
                ],
            );
        }

        let manager = PackageManager::new(&registry);
        manager.install("acme-tool:snippets/review.md").unwrap();
        manager.install("acme-tool:triggers/lint.sh").unwrap();
        manager.install("beta-tool:snippets/review.md").unwrap();

        let all = manager.list(&ListFilter::default()).unwrap();
        let names: Vec<_> = all.iter().map(|p| p.namespaced_name.as_str()).collect();
        assert_eq!(
            names,
            ["acme-tool--review", "acme-tool--lint", "beta-tool--review"]
        );

        let snippets = manager
            .list(&ListFilter {
                kind: Some(ArtifactKind::Snippet),
                namespace: None,
            })
            .unwrap();
        assert_eq!(snippets.len(), 2);

        let acme_triggers = manager
            .list(&ListFilter {
                kind: Some(ArtifactKind::Trigger),
                namespace: Some("acme-tool".to_string()),
            })
            .unwrap();
        assert_eq!(acme_triggers.len(), 1);
        assert_eq!(acme_triggers[0].original_name, "lint");

        let info = manager.info("beta-tool--review").unwrap();
        assert_eq!(info.namespace, "beta-tool");
        let err = manager.info("beta-tool--lint").unwrap_err();
        assert!(matches!(err, QuiverError::PackageNotFound { .. }));
    }
}
