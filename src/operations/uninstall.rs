//! Uninstall: remove a package's files and its ledger record

use std::fs;
use std::io;
use std::path::Path;

use super::PackageManager;
use crate::config::utils::RecordContainer;
use crate::domain::InstalledPackage;
use crate::error::{Result, package};
use crate::git::VersionControl;

impl<G: VersionControl> PackageManager<'_, G> {
    /// Remove an installed package
    ///
    /// File removal is best effort: a file that cannot be deleted is logged and
    /// skipped, and the record is removed regardless.
    pub fn uninstall(&self, namespaced_name: &str) -> Result<InstalledPackage> {
        let mut ledger = self.load_ledger()?;
        let record = ledger
            .find(namespaced_name)
            .cloned()
            .ok_or_else(|| package::not_found(namespaced_name))?;

        for file in &record.files {
            remove_file(&file.destination);
        }
        if let Some(root) = record.bundle_root(self.paths().artifacts_dir()) {
            remove_dir(&root);
        }

        ledger.remove(namespaced_name);
        ledger.save(&self.paths().ledger_file())?;

        tracing::info!(package = %namespaced_name, files = record.files.len(), "uninstalled");
        Ok(record)
    }
}

fn remove_file(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "file already gone");
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove file");
        }
    }
}

fn remove_dir(path: &Path) {
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove directory");
        }
    }
}
