use clap::Parser;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install a bundle:\n    quiver install acme-tool:bundles/greeter\n\n\
                   Install a trigger script:\n    quiver install acme-tool:triggers/pre-commit.sh\n\n\
                   Browse first to find install paths:\n    quiver browse acme-tool")]
pub struct InstallArgs {
    /// Install spec: namespace:path[@version]
    pub spec: String,
}
