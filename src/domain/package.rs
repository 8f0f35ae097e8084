//! Installed package records

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::kind::ArtifactKind;

/// Separator between namespace and original name
pub const NAMESPACE_SEPARATOR: &str = "--";

/// Ledger spelling of a commit that could not be resolved at install time
const UNKNOWN_COMMIT: &str = "unknown";

/// Build the ledger key of a package: `namespace--name`
pub fn namespaced_name(namespace: &str, original_name: &str) -> String {
    format!("{namespace}{NAMESPACE_SEPARATOR}{original_name}")
}

/// Commit a package was installed from
///
/// Commit resolution during install is best effort; `Unknown` records that it
/// failed rather than smuggling a sentinel string through the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CommitId {
    Known(String),
    Unknown,
}

impl CommitId {
    pub fn as_known(&self) -> Option<&str> {
        match self {
            CommitId::Known(sha) => Some(sha),
            CommitId::Unknown => None,
        }
    }

    /// Abbreviated form for display
    pub fn short(&self) -> &str {
        match self {
            CommitId::Known(sha) => sha.get(..7).unwrap_or(sha),
            CommitId::Unknown => UNKNOWN_COMMIT,
        }
    }
}

impl From<String> for CommitId {
    fn from(value: String) -> Self {
        if value.is_empty() || value == UNKNOWN_COMMIT {
            CommitId::Unknown
        } else {
            CommitId::Known(value)
        }
    }
}

impl From<CommitId> for String {
    fn from(value: CommitId) -> Self {
        match value {
            CommitId::Known(sha) => sha,
            CommitId::Unknown => UNKNOWN_COMMIT.to_string(),
        }
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitId::Known(sha) => f.write_str(sha),
            CommitId::Unknown => f.write_str(UNKNOWN_COMMIT),
        }
    }
}

/// Upstream version a package was installed at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PackageVersion {
    Commit {
        sha: CommitId,
        /// Branch the commit was taken from
        #[serde(rename = "ref")]
        git_ref: String,
    },
}

impl PackageVersion {
    pub fn commit(&self) -> &CommitId {
        match self {
            PackageVersion::Commit { sha, .. } => sha,
        }
    }

    pub fn git_ref(&self) -> &str {
        match self {
            PackageVersion::Commit { git_ref, .. } => git_ref,
        }
    }
}

/// A file owned by an installed package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageFile {
    /// Path relative to the mirror root, e.g. `bundles/greeter/BUNDLE.md`
    pub source: String,

    /// Absolute destination path
    pub destination: PathBuf,

    /// BLAKE3 hash of the installed content, empty if it could not be computed
    #[serde(default)]
    pub hash: String,
}

/// An installed package as recorded in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledPackage {
    pub namespaced_name: String,
    pub original_name: String,
    pub kind: ArtifactKind,

    /// Namespace of the repository the package came from
    pub namespace: String,

    /// Path inside the mirror, e.g. `bundles/greeter` or `triggers/pre-commit.sh`
    pub source_path: String,

    pub version: PackageVersion,

    /// Version suffix given at install time; recorded, never resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_version: Option<String>,

    pub files: Vec<PackageFile>,
    pub installed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InstalledPackage {
    /// Install spec that reproduces this package
    pub fn spec(&self) -> String {
        format!("{}:{}", self.namespace, self.source_path)
    }

    /// Root destination of a bundle directory, if this package is a bundle
    pub fn bundle_root(&self, artifacts_dir: &std::path::Path) -> Option<PathBuf> {
        self.kind
            .is_directory()
            .then(|| self.kind.destination(artifacts_dir, &self.namespaced_name, ""))
    }
}
