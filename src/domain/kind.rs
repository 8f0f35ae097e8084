//! Artifact kinds and their on-disk conventions
//!
//! Every kind owns one conventional top-level directory, both inside a mirror
//! and under the artifacts base directory. The table below is the only place
//! that knows how a kind looks on disk.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One of the four fixed artifact categories
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// A directory carrying a marker file, installed as a whole tree
    Bundle,
    /// A single markdown prompt snippet
    Snippet,
    /// A single markdown assistant profile
    Profile,
    /// A single executable hook script
    Trigger,
}

/// How a kind's source looks inside a mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceShape {
    /// A directory containing `marker` (compared case-insensitively)
    Directory { marker: &'static str },
    /// A single file ending in `.extension`
    File { extension: &'static str },
}

struct KindTable {
    dir: &'static str,
    shape: SourceShape,
    executable: bool,
}

const BUNDLE: KindTable = KindTable {
    dir: "bundles",
    shape: SourceShape::Directory {
        marker: "BUNDLE.md",
    },
    executable: false,
};

const SNIPPET: KindTable = KindTable {
    dir: "snippets",
    shape: SourceShape::File { extension: "md" },
    executable: false,
};

const PROFILE: KindTable = KindTable {
    dir: "profiles",
    shape: SourceShape::File { extension: "md" },
    executable: false,
};

const TRIGGER: KindTable = KindTable {
    dir: "triggers",
    shape: SourceShape::File { extension: "sh" },
    executable: true,
};

impl ArtifactKind {
    /// All kinds, in listing order
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Bundle,
        ArtifactKind::Snippet,
        ArtifactKind::Profile,
        ArtifactKind::Trigger,
    ];

    fn table(self) -> &'static KindTable {
        match self {
            ArtifactKind::Bundle => &BUNDLE,
            ArtifactKind::Snippet => &SNIPPET,
            ArtifactKind::Profile => &PROFILE,
            ArtifactKind::Trigger => &TRIGGER,
        }
    }

    /// Conventional directory name, e.g. `bundles`
    pub fn dir_name(self) -> &'static str {
        self.table().dir
    }

    pub fn shape(self) -> SourceShape {
        self.table().shape
    }

    /// Whether installed files must be marked executable
    pub fn is_executable(self) -> bool {
        self.table().executable
    }

    pub fn is_directory(self) -> bool {
        matches!(self.shape(), SourceShape::Directory { .. })
    }

    /// Look up the kind owning a conventional directory name
    pub fn from_dir_name(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.dir_name() == segment)
    }

    /// Probe whether a mirror entry has this kind's on-disk shape
    pub fn matches_entry(self, path: &Path) -> bool {
        match self.shape() {
            SourceShape::Directory { marker } => {
                path.is_dir() && find_marker(path, marker).is_some()
            }
            SourceShape::File { extension } => {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
            }
        }
    }

    /// Destination of an installed package under the artifacts base directory
    ///
    /// `extension` includes its leading dot, or is empty.
    pub fn destination(self, base: &Path, namespaced_name: &str, extension: &str) -> PathBuf {
        let kind_dir = base.join(self.dir_name());
        if self.is_directory() {
            kind_dir.join(namespaced_name)
        } else {
            kind_dir.join(format!("{namespaced_name}{extension}"))
        }
    }
}

/// Find the marker file inside a bundle directory, ignoring case
pub fn find_marker(dir: &Path, marker: &str) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    entries
        .flatten()
        .find(|entry| {
            entry.path().is_file()
                && entry
                    .file_name()
                    .to_string_lossy()
                    .eq_ignore_ascii_case(marker)
        })
        .map(|entry| entry.path())
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Bundle => "bundle",
            ArtifactKind::Snippet => "snippet",
            ArtifactKind::Profile => "profile",
            ArtifactKind::Trigger => "trigger",
        };
        f.write_str(name)
    }
}
