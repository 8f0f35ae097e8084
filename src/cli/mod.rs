//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - repo: Repository registry subcommands
//! - install / uninstall: Package lifecycle arguments
//! - update: Update check and apply arguments
//! - list: List and info arguments
//! - browse: Browse and search arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

pub mod browse;
pub mod completions;
pub mod install;
pub mod list;
pub mod repo;
pub mod uninstall;
pub mod update;

pub use browse::{BrowseArgs, SearchArgs};
pub use completions::CompletionsArgs;
pub use install::InstallArgs;
pub use list::{InfoArgs, ListArgs};
pub use repo::{RepoArgs, RepoSubcommand};
pub use uninstall::UninstallArgs;
pub use update::UpdateArgs;

/// quiver - artifact package manager
///
/// Install namespaced bundles, snippets, profiles and triggers from registered git repositories.
#[derive(Parser, Debug)]
#[command(
    name = "quiver",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Package manager for assistant artifacts kept in git repositories",
    long_about = "quiver registers remote git repositories under short namespaces, mirrors them \
                  locally, and installs bundles, snippets, profiles and triggers from them with \
                  atomic installs and commit-based update detection.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  quiver repo add gh:acme/tools               \x1b[90m# Register as namespace acme-tool\x1b[0m\n   \
                  quiver browse acme-tool                     \x1b[90m# See what it offers\x1b[0m\n   \
                  quiver install acme-tool:bundles/greeter    \x1b[90m# Install a bundle\x1b[0m\n   \
                  quiver update                               \x1b[90m# Check installed packages for changes\x1b[0m\n   \
                  quiver uninstall acme-tool--greeter         \x1b[90m# Remove it again\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Data directory holding the registry, ledger and mirrors
    #[arg(long, global = true, env = "QUIVER_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Base directory artifacts are installed into
    #[arg(long, global = true, env = "QUIVER_ARTIFACTS_DIR", value_name = "DIR")]
    pub artifacts_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage registered repositories
    Repo(RepoArgs),

    /// Install an artifact from a registered repository
    Install(InstallArgs),

    /// Remove an installed package
    Uninstall(UninstallArgs),

    /// Check installed packages for upstream changes, optionally applying them
    Update(UpdateArgs),

    /// List installed packages
    List(ListArgs),

    /// Show an installed package
    Info(InfoArgs),

    /// List artifacts available in registered repositories
    Browse(BrowseArgs),

    /// Search artifact names across all registered repositories
    Search(SearchArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
