//! An in-memory `RestTransport` that records requests and replays canned responses.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use hostcli::rest::{RestRequest, RestResponse, RestTransport, TransportError};
use serde_json::{Value, json};

/// Build a successful envelope around `data`.
#[must_use]
pub fn envelope_ok(data: Value) -> Value {
    json!({"code": 0, "description": "", "data": data})
}

/// Build a failed envelope.
#[must_use]
pub fn envelope_error(code: i64, description: &str) -> Value {
    json!({"code": code, "description": description, "data": null})
}

/// Records every request and answers with queued responses, oldest first.
///
/// Clones share state, so a test can keep one handle and give another to the service.
/// When the queue runs dry it answers `200 OK` with an empty successful envelope.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<RestRequest>>>,
    responses: Arc<Mutex<VecDeque<RestResponse>>>,
}

impl RecordingTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a `200 OK` response carrying `envelope` as its body.
    #[must_use]
    pub fn with_envelope(self, envelope: Value) -> Self {
        self.with_response(200, "OK", &envelope.to_string())
    }

    /// Queue an arbitrary response.
    #[must_use]
    pub fn with_response(self, status: u16, reason: &str, body: &str) -> Self {
        self.responses.lock().unwrap().push_back(RestResponse {
            status,
            reason: reason.to_string(),
            body: body.to_string(),
        });
        self
    }

    /// Every request executed so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RestRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RestTransport for RecordingTransport {
    async fn execute(&self, request: RestRequest) -> Result<RestResponse, TransportError> {
        self.requests.lock().unwrap().push(request);

        let response = self.responses.lock().unwrap().pop_front();
        Ok(response.unwrap_or_else(|| RestResponse {
            status: 200,
            reason: "OK".to_string(),
            body: envelope_ok(json!({})).to_string(),
        }))
    }
}
