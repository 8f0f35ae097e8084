//! Installed package ledger (installed.json)
//!
//! The ledger is the sole source of truth for what is installed. Every change is
//! a full read-modify-write of the whole document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::document::{self, FORMAT_VERSION, Versioned};
use super::utils::RecordContainer;
use crate::domain::InstalledPackage;
use crate::error::{Result, package};

/// The persisted collection of installed packages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub version: u32,

    /// Installed packages in installation order
    #[serde(default)]
    pub packages: Vec<InstalledPackage>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            packages: Vec::new(),
        }
    }
}

impl Versioned for Ledger {
    fn version(&self) -> u32 {
        self.version
    }
}

impl RecordContainer<InstalledPackage> for Ledger {
    fn records(&self) -> &[InstalledPackage] {
        &self.packages
    }

    fn key(record: &InstalledPackage) -> &str {
        &record.namespaced_name
    }
}

impl Ledger {
    pub fn load(path: &Path) -> Result<Self> {
        document::read(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        document::write(path, self)
    }

    /// Find the package owning a destination path
    ///
    /// A path is owned when it is one of a package's files, contains one of
    /// them, or lies inside a package's file or bundle directory.
    pub fn owner_of(&self, destination: &Path) -> Option<&InstalledPackage> {
        self.packages.iter().find(|pkg| {
            pkg.files.iter().any(|f| {
                f.destination.starts_with(destination) || destination.starts_with(&f.destination)
            })
        })
    }

    /// Append a package, refusing duplicate namespaced names
    pub fn insert(&mut self, pkg: InstalledPackage) -> Result<()> {
        if self.contains(&pkg.namespaced_name) {
            return Err(package::already_installed(pkg.namespaced_name));
        }
        self.packages.push(pkg);
        Ok(())
    }

    pub fn remove(&mut self, namespaced_name: &str) -> Option<InstalledPackage> {
        let index = self
            .packages
            .iter()
            .position(|p| p.namespaced_name == namespaced_name)?;
        Some(self.packages.remove(index))
    }
}
