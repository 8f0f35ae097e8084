//! Version control errors

use super::QuiverError;

/// Wraps a libgit2 error, keeping its class and message verbatim
pub fn failed(operation: &str, err: &git2::Error) -> QuiverError {
    QuiverError::VersionControl {
        operation: operation.to_string(),
        message: format!("{} ({:?}/{:?})", err.message(), err.class(), err.code()),
    }
}

/// Creates a version control error from a plain message
pub fn operation_failed(operation: &str, message: impl Into<String>) -> QuiverError {
    QuiverError::VersionControl {
        operation: operation.to_string(),
        message: message.into(),
    }
}
