//! quiver - artifact package manager
//!
//! Registers git repositories under short namespaces, mirrors them locally and
//! manages the install/update/uninstall lifecycle of namespaced bundles,
//! snippets, profiles and triggers copied out of those mirrors.

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod catalog;
mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod git;
mod hash;
mod operations;
mod progress;
mod registry;
mod source;
#[cfg(test)]
mod test_fixtures;
mod transaction;

use cli::{Cli, Commands};
use commands::Context;
use error::{QuiverError, Result};

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "warn,quiver=debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Version => return commands::version::run(),
        Commands::Completions(args) => return commands::completions::run(args),
        _ => {}
    }

    let ctx = Context::new(cli.home, cli.artifacts_dir, cli.json)?;
    match cli.command {
        Commands::Repo(args) => commands::repo::run(&ctx, args),
        Commands::Install(args) => commands::install::run(&ctx, args),
        Commands::Uninstall(args) => commands::uninstall::run(&ctx, args),
        Commands::Update(args) => commands::update::run(&ctx, args),
        Commands::List(args) => commands::list::run(&ctx, args),
        Commands::Info(args) => commands::list::info(&ctx, args),
        Commands::Browse(args) => commands::browse::run(&ctx, args),
        Commands::Search(args) => commands::browse::search(&ctx, args),
        Commands::Version | Commands::Completions(_) => Ok(()),
    }
}

fn report(err: &QuiverError) {
    eprintln!("Error: {err}");
    if let Some(help) = err.help() {
        eprintln!("  help: {help}");
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        report(&e);
        std::process::exit(1);
    }
}
