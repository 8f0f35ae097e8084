//! Repository registry document (repos.json)

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::document::{self, FORMAT_VERSION, Versioned};
use super::utils::RecordContainer;
use crate::domain::RepositoryRegistration;
use crate::error::{Result, repo};

/// The persisted collection of registered repositories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryFile {
    pub version: u32,

    #[serde(default)]
    pub repos: Vec<RepositoryRegistration>,
}

impl Default for RegistryFile {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            repos: Vec::new(),
        }
    }
}

impl Versioned for RegistryFile {
    fn version(&self) -> u32 {
        self.version
    }
}

impl RecordContainer<RepositoryRegistration> for RegistryFile {
    fn records(&self) -> &[RepositoryRegistration] {
        &self.repos
    }

    fn key(record: &RepositoryRegistration) -> &str {
        &record.namespace
    }
}

impl RegistryFile {
    pub fn load(path: &Path) -> Result<Self> {
        document::read(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        document::write(path, self)
    }

    /// Append a registration, refusing a namespace that is already taken
    pub fn insert(&mut self, registration: RepositoryRegistration) -> Result<()> {
        if self.contains(&registration.namespace) {
            return Err(repo::namespace_exists(registration.namespace));
        }
        self.repos.push(registration);
        Ok(())
    }

    pub fn remove(&mut self, namespace: &str) -> Option<RepositoryRegistration> {
        let index = self.repos.iter().position(|r| r.namespace == namespace)?;
        Some(self.repos.remove(index))
    }
}
