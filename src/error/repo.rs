//! Repository registry errors

use super::QuiverError;

/// Creates a namespace already registered error
pub fn namespace_exists(namespace: impl Into<String>) -> QuiverError {
    QuiverError::NamespaceExists {
        namespace: namespace.into(),
    }
}

/// Creates an invalid namespace error
pub fn invalid_namespace(namespace: impl Into<String>) -> QuiverError {
    QuiverError::InvalidNamespace {
        namespace: namespace.into(),
    }
}

/// Creates an invalid repository URL error
pub fn invalid_url(url: impl Into<String>) -> QuiverError {
    QuiverError::InvalidRepositoryUrl { url: url.into() }
}

/// Creates a repository not found error
pub fn not_found(namespace: impl Into<String>) -> QuiverError {
    QuiverError::RepositoryNotFound {
        namespace: namespace.into(),
    }
}

/// Creates a missing mirror error
pub fn mirror_missing(namespace: impl Into<String>, path: impl Into<String>) -> QuiverError {
    QuiverError::MirrorMissing {
        namespace: namespace.into(),
        path: path.into(),
    }
}
