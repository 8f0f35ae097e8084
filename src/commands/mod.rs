//! Command implementations for quiver CLI
//!
//! Each command is a thin wrapper: it resolves paths, builds the registry and
//! package manager over the libgit2 gateway, and renders the result as styled
//! text or, with `--json`, as the serialized record shapes.

pub mod browse;
pub mod completions;
pub mod install;
pub mod list;
pub mod repo;
pub mod uninstall;
pub mod update;
pub mod version;

use std::path::PathBuf;

use console::Style;
use inquire::Confirm;
use serde::Serialize;

use crate::config::Paths;
use crate::error::Result;
use crate::git::GitGateway;
use crate::registry::RepoRegistry;

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    pub paths: Paths,
    pub json: bool,
}

impl Context {
    pub fn new(home: Option<PathBuf>, artifacts_dir: Option<PathBuf>, json: bool) -> Result<Self> {
        let paths = Paths::resolve(home, artifacts_dir)?;
        tracing::debug!(
            home = %paths.home.display(),
            artifacts = %paths.artifacts_dir.display(),
            "resolved paths"
        );
        Ok(Self { paths, json })
    }

    pub fn registry(&self) -> RepoRegistry<GitGateway> {
        RepoRegistry::new(self.paths.clone(), GitGateway)
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Ask before a destructive step unless `yes` was given
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(Confirm::new(prompt)
        .with_default(false)
        .with_help_message("Pass -y to skip this prompt")
        .prompt()?)
}

fn label(text: &str) -> console::StyledObject<&str> {
    Style::new().bold().apply_to(text)
}

fn name(text: &str) -> console::StyledObject<&str> {
    Style::new().bold().yellow().apply_to(text)
}

fn dim(text: &str) -> console::StyledObject<&str> {
    Style::new().dim().apply_to(text)
}

fn success(text: &str) -> console::StyledObject<&str> {
    Style::new().green().apply_to(text)
}
