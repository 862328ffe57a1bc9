use clap::{Args, Parser, Subcommand, ValueEnum};

/// hostcli - Command-line client for a REST-managed host backend
///
/// Besides the built-in commands, every command declared in the command directory is
/// available as a (possibly nested) sub-command.
#[derive(Parser, Debug)]
#[clap(
    name = "hostcli",
    author,
    version,
    about,
    long_about = None,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct ClapCli {
    /// Override the backend REST URL from config
    ///
    #[clap(long, global = true)]
    pub(crate) rest_url: Option<String>,

    /// Override the authentication token from config
    ///
    #[clap(long, global = true)]
    pub(crate) token: Option<String>,

    /// Show detailed output
    ///
    #[clap(long, short = 'v', global = true, default_value_t = false)]
    pub(crate) verbose: bool,

    /// Disable colored output
    ///
    #[clap(long, global = true, default_value_t = false)]
    pub(crate) no_color: bool,

    /// Output format for records
    ///
    #[clap(long, short = 'f', global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,

    /// Built-in subcommand to execute; `None` when a remote command was chosen
    ///
    #[clap(subcommand)]
    pub(crate) command: Option<ClapCommands>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum ClapCommands {
    /// hostcli: configuration management commands
    ///
    Config(ConfigCommands),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ConfigCommands {
    #[clap(subcommand)]
    pub(crate) command: ConfigSubcommands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum ConfigSubcommands {
    /// Validate the configuration and the command definitions
    Validate,
}
