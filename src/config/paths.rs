//! Data root and artifacts directory resolution
//!
//! ```text
//! <home>/                       (QUIVER_HOME, default <data dir>/quiver)
//! ├── repos.json                registry document
//! ├── installed.json            ledger document
//! └── repos/<namespace>/        one mirror per namespace
//!
//! <artifacts>/                  (QUIVER_ARTIFACTS_DIR, default ~/.quiver/artifacts)
//! └── <kind dir>/<namespace--name>[.ext]
//! ```

use std::path::{Path, PathBuf};

use crate::error::{QuiverError, Result};

/// Default directory name under the platform data directory
const HOME_DIR: &str = "quiver";

const REGISTRY_FILE: &str = "repos.json";
const LEDGER_FILE: &str = "installed.json";
const MIRRORS_DIR: &str = "repos";

/// Resolved locations of every file quiver owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub home: PathBuf,
    pub artifacts_dir: PathBuf,
}

impl Paths {
    pub fn new(home: impl Into<PathBuf>, artifacts_dir: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            artifacts_dir: artifacts_dir.into(),
        }
    }

    /// Resolve paths, falling back to platform defaults for anything not given
    ///
    /// The CLI fills the overrides from `--home`/`QUIVER_HOME` and
    /// `--artifacts-dir`/`QUIVER_ARTIFACTS_DIR`.
    pub fn resolve(home: Option<PathBuf>, artifacts_dir: Option<PathBuf>) -> Result<Self> {
        let home = match home {
            Some(path) => path,
            None => dirs::data_dir()
                .ok_or_else(|| QuiverError::ConfigInvalid {
                    message: "Could not determine data directory; set QUIVER_HOME".to_string(),
                })?
                .join(HOME_DIR),
        };

        let artifacts_dir = match artifacts_dir {
            Some(path) => path,
            None => dirs::home_dir()
                .ok_or_else(|| QuiverError::ConfigInvalid {
                    message: "Could not determine home directory; set QUIVER_ARTIFACTS_DIR"
                        .to_string(),
                })?
                .join(".quiver")
                .join("artifacts"),
        };

        Ok(Self::new(home, artifacts_dir))
    }

    pub fn registry_file(&self) -> PathBuf {
        self.home.join(REGISTRY_FILE)
    }

    pub fn ledger_file(&self) -> PathBuf {
        self.home.join(LEDGER_FILE)
    }

    pub fn mirrors_dir(&self) -> PathBuf {
        self.home.join(MIRRORS_DIR)
    }

    /// Local mirror of the repository registered under `namespace`
    pub fn mirror_dir(&self, namespace: &str) -> PathBuf {
        self.mirrors_dir().join(namespace)
    }

    pub fn artifacts_dir(&self) -> &Path {
        &self.artifacts_dir
    }
}
