use clap::Parser;

/// Arguments for the uninstall command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Uninstall a package:\n    quiver uninstall acme-tool--greeter\n\n\
                  Uninstall without confirmation:\n    quiver uninstall acme-tool--greeter -y")]
pub struct UninstallArgs {
    /// Namespaced package name (namespace--name)
    pub name: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}
