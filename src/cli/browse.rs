use clap::Parser;

use crate::domain::ArtifactKind;

/// Arguments for the browse command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Browse every registered repository:\n    quiver browse\n\n\
                  Browse one repository:\n    quiver browse acme-tool\n\n\
                  Only bundles:\n    quiver browse acme-tool --type bundle")]
pub struct BrowseArgs {
    /// Namespace to browse (default: all registered repositories)
    pub namespace: Option<String>,

    /// Only show artifacts of this kind
    #[arg(long = "type", short = 't', value_enum)]
    pub kind: Option<ArtifactKind>,
}

/// Arguments for the search command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Case-insensitive text to look for in artifact names
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};

    #[test]
    fn test_cli_parsing_browse() {
        let cli = Cli::try_parse_from(["quiver", "browse", "acme-tool", "--type", "bundle"]).unwrap();
        match cli.command {
            Commands::Browse(args) => {
                assert_eq!(args.namespace.as_deref(), Some("acme-tool"));
                assert_eq!(args.kind, Some(ArtifactKind::Bundle));
            }
            _ => panic!("Expected Browse command"),
        }
    }

    #[test]
    fn test_cli_parsing_search() {
        let cli = Cli::try_parse_from(["quiver", "search", "review"]).unwrap();
        match cli.command {
            Commands::Search(args) => assert_eq!(args.query, "review"),
            _ => panic!("Expected Search command"),
        }
    }
}
