//! The validate, dispatch and shape pipeline for one command invocation

use std::fmt::Display;

use chrono::{Local, TimeZone};
use tracing::debug;

use crate::{
    args::ParsedArguments,
    command::{CommandSpec, DisplayMode},
    error::CommandError,
    message::construct_message,
    project::{Projection, RecordProjection, ResultProjector},
    rest::{RequestDispatcher, RestTransport},
    validate::ParameterValidator,
};

/// What a command produced, by display mode
///
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// A table; `message` is printed verbatim before it
    List {
        message: Option<String>,
        projection: Projection,
    },

    /// One record plus the blocks shown before it; `message` is printed verbatim first
    Record {
        message: Option<String>,
        record: RecordProjection,
    },

    /// The interpolated success message of an action, newline-terminated
    Message(Option<String>),
}

/// Executes command specs against a [`RestTransport`]
///
pub struct CommandService<T, Tz = Local> {
    transport: T,
    tz: Tz,
}

impl<T: RestTransport> CommandService<T, Local> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            tz: Local,
        }
    }
}

impl<T, Tz> CommandService<T, Tz>
where
    T: RestTransport,
    Tz: TimeZone + Send + Sync,
    Tz::Offset: Display,
{
    pub fn with_timezone(transport: T, tz: Tz) -> Self {
        Self { transport, tz }
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one invocation of `spec` with the parsed `args`
    ///
    /// Exactly one request is sent, and only after validation succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] from whichever stage failed.
    pub async fn execute(
        &self,
        spec: &CommandSpec,
        mut args: ParsedArguments,
    ) -> Result<CommandOutcome, CommandError> {
        ParameterValidator::with_timezone(spec, self.tz.clone()).validate(&mut args)?;

        let envelope = RequestDispatcher::new(&self.transport)
            .dispatch(spec, &args)
            .await?;
        debug!(
            "`{}` returned {} record(s)",
            spec.name(),
            envelope.data.len()
        );

        let message = spec.message().map(ToString::to_string);

        match spec.mode() {
            DisplayMode::List => {
                let projection = ResultProjector::with_timezone(spec, self.tz.clone())
                    .project(&args, &envelope.data)?;
                Ok(CommandOutcome::List {
                    message,
                    projection,
                })
            }
            DisplayMode::ShowOne => {
                let record = ResultProjector::with_timezone(spec, self.tz.clone())
                    .project(&args, &envelope.data)?
                    .into_record()?;
                Ok(CommandOutcome::Record { message, record })
            }
            DisplayMode::Action => {
                let message = spec
                    .message()
                    .map(|template| construct_message(template, &envelope))
                    .transpose()?;
                Ok(CommandOutcome::Message(message))
            }
        }
    }
}
