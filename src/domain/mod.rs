//! Domain models for quiver
//!
//! This module contains pure domain objects: the closed set of artifact kinds,
//! installed package records and repository registrations.

pub mod kind;
pub mod package;
pub mod repository;

pub use kind::{ArtifactKind, SourceShape};
pub use package::{CommitId, InstalledPackage, PackageFile, PackageVersion, namespaced_name};
pub use repository::{RepositoryRegistration, is_valid_namespace};
