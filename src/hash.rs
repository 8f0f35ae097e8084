//! BLAKE3 content hashes for installed files

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;

use crate::error::{Result, fs as fs_error};

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

/// Calculate BLAKE3 hash of a file
pub fn hash_file(path: &Path) -> Result<String> {
    let read_err = |e: std::io::Error| fs_error::read_failed(path.display().to_string(), e.to_string());

    let mut reader = BufReader::new(File::open(path).map_err(read_err)?);
    let mut hasher = Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(read_err)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

/// Hash recorded in the ledger: the file hash, or empty if it cannot be computed
pub fn ledger_hash(path: &Path) -> String {
    hash_file(path).unwrap_or_else(|e| {
        tracing::debug!(path = %path.display(), error = %e, "could not hash installed file");
        String::new()
    })
}
