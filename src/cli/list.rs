use clap::Parser;

use crate::domain::ArtifactKind;

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List all installed packages:\n    quiver list\n\n\
                  Only triggers:\n    quiver list --kind trigger\n\n\
                  Only packages from one repository:\n    quiver list --namespace acme-tool")]
pub struct ListArgs {
    /// Only show packages of this kind
    #[arg(long, short = 'k', value_enum)]
    pub kind: Option<ArtifactKind>,

    /// Only show packages from this namespace
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Namespaced package name (namespace--name)
    pub name: String,
}
