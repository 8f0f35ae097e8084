//! Versioned JSON document persistence
//!
//! Documents are written to a temporary sibling file and renamed over the
//! target, so a crash mid-write never leaves a torn document behind. This does
//! not serialize concurrent writers.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::error::{QuiverError, Result, fs as fs_error};

/// Current on-disk format version of every document
pub const FORMAT_VERSION: u32 = 1;

/// A document carrying a format version tag
pub trait Versioned {
    fn version(&self) -> u32;
}

/// Read a document, returning the default document if the file does not exist
pub fn read<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default + Versioned,
{
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "document missing, starting empty");
            return Ok(T::default());
        }
        Err(e) => return Err(fs_error::read_failed(path.display().to_string(), e.to_string())),
    };

    let document: T =
        serde_json::from_str(&content).map_err(|e| QuiverError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    if document.version() > FORMAT_VERSION {
        return Err(QuiverError::UnsupportedFormatVersion {
            path: path.display().to_string(),
            version: document.version(),
        });
    }

    Ok(document)
}

/// Serialize a document to its on-disk text form
pub fn to_json<T: Serialize>(document: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(document)?;
    json.push('\n');
    Ok(json)
}

/// Write a document by rename-over, creating its parent directory if needed
pub fn write<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    let json = to_json(document)?;
    let write_err = |e: &dyn std::fmt::Display| {
        fs_error::write_failed(path.display().to_string(), e.to_string())
    };

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| write_err(&e))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| write_err(&e))?;
    tmp.write_all(json.as_bytes()).map_err(|e| write_err(&e))?;
    tmp.as_file().sync_all().map_err(|e| write_err(&e))?;
    tmp.persist(path).map_err(|e| write_err(&e.error))?;

    tracing::debug!(path = %path.display(), bytes = json.len(), "document written");
    Ok(())
}
