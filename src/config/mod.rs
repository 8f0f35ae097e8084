//! Configuration and durable documents for quiver
//!
//! This module contains:
//! - [`paths`] - Resolution of the data root and artifacts base directory
//! - [`registry`] - `repos.json`, the repository registry document
//! - [`ledger`] - `installed.json`, the installed package ledger
//!
//! Both documents are whole-file JSON read-modify-write stores. There is no
//! locking: two concurrent invocations race and the last writer wins.

pub mod document;
pub mod ledger;
pub mod paths;
pub mod registry;
pub mod utils;

pub use ledger::Ledger;
pub use paths::Paths;
pub use registry::RegistryFile;
