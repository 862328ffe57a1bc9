mod cli;
mod commands;
mod config;
mod formatters;
mod registry;
mod tables;
mod terminal_reporter;

use std::process;

use clap::{CommandFactory, FromArgMatches};
use hostcli::{
    command::{CommandRepository, YamlCommandRepository},
    config::{ApplyToConfig, ConfigLoader, YamlLoader},
    fs::RealFileSystem,
};
use tracing::{Level, debug, warn};

use crate::{cli::ClapCli, commands::dispatch_command, registry::CommandRegistry};

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fs = RealFileSystem;

    // 1. Load config.yaml and the environment. CLI flags are applied after parsing, which
    //    needs the command definitions first.
    let original_config = YamlLoader::new(&fs).load_config()?;

    // 2. Load command definitions and mount them as sub-commands
    let loaded =
        YamlCommandRepository::new(fs, original_config.command_directory().clone()).load_commands();
    let specs = loaded
        .as_ref()
        .map(|output| output.commands().to_vec())
        .unwrap_or_default();
    let (registry, schema_errors) = CommandRegistry::new(specs);

    let matches = registry.augment(ClapCli::command()).get_matches();
    let args = ClapCli::from_arg_matches(&matches)?;

    // 3. Apply CLI args to config (overriding)
    let config = args.apply_to_config(original_config.clone());
    init_tracing(config.verbose());
    debug!("Final config: {:#?}", &config);

    match &loaded {
        Ok(output) => {
            for invalid in output.invalid() {
                warn!("Skipping invalid command definitions: {invalid}");
            }
        }
        Err(e) => warn!("No remote commands available: {e}"),
    }
    for e in schema_errors {
        warn!("Skipping command: {e}");
    }

    // 4. Dispatch and execute the requested command
    let exit_code = dispatch_command(
        &args,
        &matches,
        &registry,
        &config,
        original_config,
        &loaded,
    )
    .await;

    process::exit(exit_code)
}
