pub(crate) mod action;
pub(crate) mod config;
pub(crate) mod list;
pub(crate) mod remote;
pub(crate) mod show;

use clap::ArgMatches;
use hostcli::{
    command::{CommandListError, LoadCommandsOutput},
    config::AppConfig,
};
use tracing::debug;

use crate::{
    cli::{ClapCli, ClapCommands, ConfigSubcommands},
    registry::CommandRegistry,
    terminal_reporter::TerminalReporter,
};

/// Everything `config validate` reports besides the config file itself
pub(crate) type LoadedCommands = Result<LoadCommandsOutput, CommandListError>;

/// Primary command dispatcher that routes to the built-in or a remote command handler
pub(crate) async fn dispatch_command(
    cli: &ClapCli,
    matches: &ArgMatches,
    registry: &CommandRegistry,
    config: &AppConfig,
    original_config: AppConfig,
    loaded: &LoadedCommands,
) -> i32 {
    let reporter = TerminalReporter::new(config.use_colors());

    if let Some(command) = &cli.command {
        debug!("Dispatching built-in command: {:?}", command);
        return match command {
            ClapCommands::Config(config_cmd) => match config_cmd.command {
                ConfigSubcommands::Validate => {
                    config::handle_validate(&original_config, loaded, reporter)
                }
            },
        };
    }

    match registry.resolve(matches) {
        Some((command, sub_matches)) => {
            remote::handle_remote(command, sub_matches, config, cli.format).await
        }
        None => {
            reporter.report_error("Unknown command");
            1
        }
    }
}

/// Write a failed command's error to stderr and return the failure exit code
///
pub(crate) fn report_failure(error: &impl std::fmt::Display) -> i32 {
    eprint!("Failed with error:\n{error}\n");
    1
}
