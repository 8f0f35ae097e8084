//! Error types and handling for quiver
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`spec`]: Install spec parsing errors
//! - [`repo`]: Repository registry errors
//! - [`package`]: Installed package errors
//! - [`git`]: Version control errors
//! - [`fs`]: File system errors

pub mod fs;
pub mod git;
pub mod package;
pub mod repo;
pub mod spec;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for quiver operations
#[derive(Error, Diagnostic, Debug)]
pub enum QuiverError {
    // Spec errors
    #[error("Invalid install spec '{input}': {reason}")]
    #[diagnostic(
        code(quiver::spec::invalid),
        help("Install specs look like namespace:path[@version], e.g. acme:bundles/web-fetch")
    )]
    InvalidSpec { input: String, reason: String },

    #[error("Unknown artifact kind '{segment}' in path '{path}'")]
    #[diagnostic(
        code(quiver::spec::unknown_kind),
        help("Paths must start with one of: bundles/, snippets/, profiles/, triggers/")
    )]
    UnknownArtifactKind { segment: String, path: String },

    // Repository errors
    #[error("Namespace '{namespace}' is already registered")]
    #[diagnostic(
        code(quiver::repo::namespace_exists),
        help("Pass --namespace to register the repository under a different name")
    )]
    NamespaceExists { namespace: String },

    #[error("Invalid namespace '{namespace}'")]
    #[diagnostic(
        code(quiver::repo::invalid_namespace),
        help("Namespaces may only contain lowercase letters, digits and '-'")
    )]
    InvalidNamespace { namespace: String },

    #[error("Invalid repository URL: {url}")]
    #[diagnostic(
        code(quiver::repo::invalid_url),
        help(
            "Valid formats: gh:owner/repo, https://host/owner/repo.git, git@host:owner/repo.git, file:///path/owner/repo"
        )
    )]
    InvalidRepositoryUrl { url: String },

    #[error("Repository '{namespace}' not found")]
    #[diagnostic(
        code(quiver::repo::not_found),
        help("Run 'quiver repo list' to see registered repositories")
    )]
    RepositoryNotFound { namespace: String },

    #[error("Mirror for repository '{namespace}' is missing at {path}")]
    #[diagnostic(
        code(quiver::repo::mirror_missing),
        help("Remove the repository and add it again to recreate the mirror")
    )]
    MirrorMissing { namespace: String, path: String },

    // Package errors
    #[error("Package '{name}' is not installed")]
    #[diagnostic(
        code(quiver::package::not_found),
        help("Run 'quiver list' to see installed packages")
    )]
    PackageNotFound { name: String },

    #[error("Package '{name}' is already installed")]
    #[diagnostic(
        code(quiver::package::already_installed),
        help("Use 'quiver update --apply {name}' to reinstall it from the latest mirror")
    )]
    AlreadyInstalled { name: String },

    #[error("Failed to install '{name}': {reason}")]
    #[diagnostic(code(quiver::package::install_failed))]
    InstallFailed { name: String, reason: String },

    // Version control errors
    #[error("Git {operation} failed: {message}")]
    #[diagnostic(code(quiver::git::failed))]
    VersionControl { operation: String, message: String },

    // Document errors
    #[error("Failed to parse {path}: {reason}")]
    #[diagnostic(code(quiver::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(quiver::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Unsupported format version {version} in {path}")]
    #[diagnostic(
        code(quiver::config::unsupported_version),
        help("This file was written by a newer quiver; upgrade quiver to read it")
    )]
    UnsupportedFormatVersion { path: String, version: u32 },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(quiver::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(quiver::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(quiver::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for QuiverError {
    fn from(err: std::io::Error) -> Self {
        QuiverError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for QuiverError {
    fn from(err: serde_json::Error) -> Self {
        QuiverError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<git2::Error> for QuiverError {
    fn from(err: git2::Error) -> Self {
        git::failed("operation", &err)
    }
}

impl From<inquire::InquireError> for QuiverError {
    fn from(err: inquire::InquireError) -> Self {
        QuiverError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, QuiverError>;
