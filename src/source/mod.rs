//! Install spec parsing
//!
//! An install spec addresses one artifact inside a registered mirror:
//!
//! ```text
//! namespace ":" path ["@" version]
//! ```
//!
//! - `acme:bundles/web-fetch`
//! - `acme:triggers/pre-commit.sh@v1.2.0`
//!
//! The namespace matches `[a-z0-9-]+`; the path is everything after the first
//! `:` up to an optional trailing `@version`. An `@` followed by a `/` belongs
//! to the path, so only a final path-free suffix is taken as the version.

use std::fmt;
use std::str::FromStr;

use crate::domain::is_valid_namespace;
use crate::error::{QuiverError, Result, spec};

/// A parsed install request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSpec {
    pub namespace: String,
    pub path: String,
    /// Requested version; `None` means the mirror's current head
    pub version: Option<String>,
}

impl InstallSpec {
    pub fn parse(input: &str) -> Result<Self> {
        let (namespace, rest) = input
            .split_once(':')
            .ok_or_else(|| spec::invalid(input, "missing ':' between namespace and path"))?;

        if namespace.is_empty() {
            return Err(spec::invalid(input, "namespace is empty"));
        }
        if !is_valid_namespace(namespace) {
            return Err(spec::invalid(
                input,
                "namespace may only contain lowercase letters, digits and '-'",
            ));
        }

        let (path, version) = match rest.rsplit_once('@') {
            Some((path, version)) if !version.contains('/') => {
                if version.is_empty() {
                    return Err(spec::invalid(input, "version after '@' is empty"));
                }
                (path, Some(version.to_string()))
            }
            _ => (rest, None),
        };

        if path.is_empty() {
            return Err(spec::invalid(input, "path is empty"));
        }

        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
            version,
        })
    }
}

impl FromStr for InstallSpec {
    type Err = QuiverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for InstallSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)?;
        if let Some(version) = &self.version {
            write!(f, "@{version}")?;
        }
        Ok(())
    }
}
