use clap::{Args, Subcommand};

/// Arguments for the repo command
#[derive(Args, Debug)]
pub struct RepoArgs {
    #[command(subcommand)]
    pub command: RepoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoSubcommand {
    /// Register a repository and clone its mirror
    #[command(after_help = "EXAMPLES:\n  \
                      Register a GitHub repository:\n    quiver repo add gh:acme/tools\n\n\
                      Choose the namespace yourself:\n    quiver repo add https://git.example.com/acme/tools.git --namespace tools\n\n\
                      Register over SSH:\n    quiver repo add git@github.com:acme/tools.git")]
    Add {
        /// Repository URL (gh:owner/repo, https://, ssh://, git@host:owner/repo, file://)
        url: String,

        /// Namespace to register under (default: derived from owner and repository name)
        #[arg(long, short = 'n')]
        namespace: Option<String>,
    },

    /// List registered repositories
    List,

    /// Unregister a repository and delete its mirror (installed packages are kept)
    Remove {
        namespace: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Fast-forward mirrors from their remotes
    Update {
        /// Namespaces to update (default: all)
        namespaces: Vec<String>,
    },
}
