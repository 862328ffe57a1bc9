use std::time::Duration;

use reqwest::{Client, Method};
use tracing::debug;

use crate::command::Operation;

use super::{
    port::{RestRequest, RestResponse, RestTransport, TransportError},
    session::SessionProvider,
};

const USER_AGENT: &str = "hostcli";
const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

fn method_for(operation: Operation) -> Method {
    match operation {
        Operation::Get => Method::GET,
        Operation::Post => Method::POST,
        Operation::Put => Method::PUT,
        Operation::Patch => Method::PATCH,
        Operation::Delete => Method::DELETE,
    }
}

/// [`RestTransport`] adapter over a `reqwest` client
///
pub struct ReqwestTransport<S: SessionProvider> {
    client: Client,
    session: S,
}

impl<S: SessionProvider> ReqwestTransport<S> {
    /// Build the client with the given per-request timeout
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientInit`] if the TLS backend cannot be initialized.
    pub fn new(session: S, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::ClientInit(e.to_string()))?;

        Ok(Self { client, session })
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}/{}", self.session.base_url(), path)
        }
    }
}

#[async_trait::async_trait]
impl<S: SessionProvider> RestTransport for ReqwestTransport<S> {
    async fn execute(&self, request: RestRequest) -> Result<RestResponse, TransportError> {
        let url = self.url_for(&request.path);
        debug!("Working with url {url}");

        let mut builder = self.client.request(method_for(request.operation), &url);

        if self.session.auth_required() {
            let token = self.session.current_token().await?;
            builder = builder.header(AUTH_TOKEN_HEADER, token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(query) = &request.query {
            builder = builder.query(query);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Request {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Request {
                url,
                message: e.to_string(),
            })?;

        debug!("Response status {status}");

        Ok(RestResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            body,
        })
    }
}
