//! Transaction support for atomic installs
//!
//! A transaction records every file and directory an install creates. Unless
//! it is committed, dropping it removes them again, so an install either lands
//! completely or leaves the artifacts directory as it found it.
//!
//! ## Usage
//!
//! ```ignore
//! let mut transaction = Transaction::new("acme--greeter");
//! transaction.create_dir_all(&dest_dir)?;
//! fs::copy(&src, &dest)?;
//! transaction.track_file_created(&dest);
//!
//! // Only after the ledger has been written:
//! transaction.commit();
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A rollback log for one install
#[derive(Debug)]
pub struct Transaction {
    /// Package the transaction belongs to, for log context
    label: String,

    /// Files created, in creation order
    created_files: Vec<PathBuf>,

    /// Directories created, in creation order
    created_dirs: Vec<PathBuf>,

    /// Set once committed or rolled back
    finished: bool,
}

impl Transaction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            created_files: Vec::new(),
            created_dirs: Vec::new(),
            finished: false,
        }
    }

    /// Track a file that was created during this transaction
    pub fn track_file_created(&mut self, path: impl Into<PathBuf>) {
        self.created_files.push(path.into());
    }

    /// Track a directory that was created during this transaction
    pub fn track_dir_created(&mut self, path: impl Into<PathBuf>) {
        self.created_dirs.push(path.into());
    }

    /// Create `dir` and any missing ancestors, tracking each one created
    pub fn create_dir_all(&mut self, dir: &Path) -> io::Result<()> {
        let missing: Vec<PathBuf> = dir
            .ancestors()
            .take_while(|p| !p.as_os_str().is_empty() && !p.exists())
            .map(Path::to_path_buf)
            .collect();

        fs::create_dir_all(dir)?;

        // ancestors() yields deepest first; record shallowest first
        for path in missing.into_iter().rev() {
            self.track_dir_created(path);
        }
        Ok(())
    }

    pub fn created_files(&self) -> &[PathBuf] {
        &self.created_files
    }

    /// Commit the transaction (prevent rollback)
    pub fn commit(mut self) {
        self.finished = true;
    }

    /// Remove everything this transaction created
    ///
    /// Removal failures are logged and skipped; directories are only removed
    /// once empty, deepest first.
    pub fn rollback(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        tracing::debug!(
            label = %self.label,
            files = self.created_files.len(),
            dirs = self.created_dirs.len(),
            "rolling back"
        );

        for path in self.created_files.iter().rev() {
            if let Err(e) = fs::remove_file(path) {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "failed to remove file during rollback");
                }
            }
        }

        let mut dirs: Vec<&PathBuf> = self.created_dirs.iter().collect();
        dirs.sort_by_key(|p| std::cmp::Reverse(p.components().count()));
        for path in dirs {
            let is_empty = fs::read_dir(path)
                .map(|mut entries| entries.next().is_none())
                .unwrap_or(false);
            if is_empty {
                if let Err(e) = fs::remove_dir(path) {
                    tracing::warn!(path = %path.display(), error = %e, "failed to remove directory during rollback");
                }
            }
        }
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        // Automatic rollback on drop if not committed
        self.rollback();
    }
}
