//! Installed package errors

use super::QuiverError;

/// Creates a package not installed error
pub fn not_found(name: impl Into<String>) -> QuiverError {
    QuiverError::PackageNotFound { name: name.into() }
}

/// Creates an already installed error
pub fn already_installed(name: impl Into<String>) -> QuiverError {
    QuiverError::AlreadyInstalled { name: name.into() }
}

/// Creates an install failure error
pub fn install_failed(name: impl Into<String>, reason: impl Into<String>) -> QuiverError {
    QuiverError::InstallFailed {
        name: name.into(),
        reason: reason.into(),
    }
}
