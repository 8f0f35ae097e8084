use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    quiver completions --shell bash > ~/.bash_completion.d/quiver\n\n\
                  Generate zsh completions:\n    quiver completions --shell zsh > ~/.zfunc/_quiver\n\n\
                  Generate fish completions:\n    quiver completions --shell fish > ~/.config/fish/completions/quiver.fish")]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(long, short = 's', value_enum)]
    pub shell: clap_complete::Shell,
}
