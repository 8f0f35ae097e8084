use clap::Parser;

/// Arguments for the update command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Check every installed package:\n    quiver update\n\n\
                  Check one package:\n    quiver update acme-tool--greeter\n\n\
                  Apply available updates:\n    quiver update --apply")]
pub struct UpdateArgs {
    /// Packages to check (default: all installed)
    pub names: Vec<String>,

    /// Reinstall packages that have upstream changes
    #[arg(long)]
    pub apply: bool,
}
