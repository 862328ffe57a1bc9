use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::{
    args::{ArgValue, ParsedArguments},
    command::CommandSpec,
    field::{COLUMNS, FIELDS},
};

use super::{
    envelope::{RawEnvelope, ResponseEnvelope},
    port::{RestRequest, RestTransport, TransportError},
};

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Request response is not OK ({0})")]
    NotOk(String),

    /// The envelope carried a non-zero code; the message is its description
    #[error("{0}")]
    Application(String),

    #[error("Invalid response envelope: {0}")]
    InvalidEnvelope(String),
}

/// Collect the arguments worth transmitting, sorted by key
///
/// Only keys the command declares (plus the resolved column filter) are considered, and
/// of those only values that differ from their defaults. Returns `None` when nothing is
/// left.
#[must_use]
pub fn build_payload(spec: &CommandSpec, args: &ParsedArguments) -> Option<Map<String, Value>> {
    let payload: Map<String, Value> = args
        .iter()
        .filter(|(key, _)| {
            key.as_str() != COLUMNS
                && (spec.has_argument(key) || (key.as_str() == FIELDS && spec.accepts_column_filter()))
        })
        .filter(|(_, value)| value.is_effective())
        .map(|(key, value)| {
            let value = match value {
                ArgValue::Text(text) => Value::String(text.clone()),
                ArgValue::Switch(on) => Value::Bool(*on),
                ArgValue::List(values) => {
                    Value::Array(values.iter().cloned().map(Value::String).collect())
                }
            };
            (key.clone(), value)
        })
        .collect();

    (!payload.is_empty()).then_some(payload)
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(values) => values
            .iter()
            .map(query_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// Sends one command's request and checks its envelope
///
pub struct RequestDispatcher<'a, T: RestTransport> {
    transport: &'a T,
}

impl<'a, T: RestTransport> RequestDispatcher<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Build the request for `spec` from validated `args`
    ///
    #[must_use]
    pub fn request_for(spec: &CommandSpec, args: &ParsedArguments) -> RestRequest {
        let mut request = RestRequest::new(spec.operation(), &spec.path());

        if let Some(payload) = build_payload(spec, args) {
            if spec.use_body() {
                request.body = Some(Value::Object(payload));
            } else {
                request.query = Some(
                    payload
                        .iter()
                        .map(|(key, value)| (key.clone(), query_value(value)))
                        .collect(),
                );
            }
        }

        request
    }

    /// Perform the call and return the successful envelope
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NotOk`] for a non-2xx status,
    /// [`DispatchError::InvalidEnvelope`] for an undecodable body and
    /// [`DispatchError::Application`] when the envelope code is not zero.
    pub async fn dispatch(
        &self,
        spec: &CommandSpec,
        args: &ParsedArguments,
    ) -> Result<ResponseEnvelope, DispatchError> {
        let request = Self::request_for(spec, args);
        debug!(
            "Dispatching `{}`: {} {}",
            spec.name(),
            request.operation,
            request.path
        );

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(DispatchError::NotOk(response.reason));
        }

        let envelope: RawEnvelope = serde_json::from_str(&response.body)
            .map_err(|e| DispatchError::InvalidEnvelope(e.to_string()))?;

        if !envelope.is_success() {
            return Err(DispatchError::Application(envelope.description));
        }

        envelope
            .into_envelope()
            .map_err(DispatchError::InvalidEnvelope)
    }
}
