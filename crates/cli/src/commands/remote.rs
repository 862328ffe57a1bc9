//! Execution of commands loaded from the command directory

use clap::ArgMatches;
use hostcli::{
    config::AppConfig,
    error::CommandError,
    rest::{
        DispatchError, ReqwestTransport, RetryPolicy, RetryingTransport, StaticSession,
        TransportError,
    },
    service::{CommandOutcome, CommandService},
};
use tracing::debug;

use crate::{
    cli::OutputFormat,
    commands::{action, list, report_failure, show},
    registry::{RemoteCommand, parsed_arguments},
};

type Transport = RetryingTransport<ReqwestTransport<StaticSession>>;

fn transport(config: &AppConfig) -> Result<Transport, TransportError> {
    let session = StaticSession::from_config(config)?;
    let client = ReqwestTransport::new(session, config.request_timeout())?;

    Ok(RetryingTransport::new(
        client,
        RetryPolicy::from_config(config),
    ))
}

pub(crate) async fn handle_remote(
    command: &RemoteCommand,
    matches: &ArgMatches,
    config: &AppConfig,
    format: OutputFormat,
) -> i32 {
    let args = parsed_arguments(&command.schema, matches);
    debug!("Parsed arguments for `{}`: {:?}", command.spec.name(), args);

    let service = match transport(config) {
        Ok(transport) => CommandService::new(transport),
        Err(e) => return report_failure(&CommandError::from(DispatchError::from(e))),
    };

    match service.execute(&command.spec, args).await {
        Ok(CommandOutcome::List {
            message,
            projection,
        }) => list::handle_list(message.as_deref(), &projection, format, config.use_colors()),
        Ok(CommandOutcome::Record { message, record }) => {
            show::handle_show(message.as_deref(), &record, format, config.use_colors())
        }
        Ok(CommandOutcome::Message(message)) => action::handle_action(message.as_deref()),
        Err(e) => report_failure(&e),
    }
}
