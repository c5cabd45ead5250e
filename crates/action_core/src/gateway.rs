//! HTTP-backed collaborators for the action invoker.

use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::RecordId, error::ActionError, protocol::ErrorBody};
use tracing::debug;
use url::Url;

use crate::{EntryMutation, RecordStore};

/// Talks to the record action service over HTTP. Implements both remote
/// collaborators against the same base URL.
pub struct HttpActionGateway {
    http: Client,
    server_url: String,
}

impl HttpActionGateway {
    pub fn new(server_url: impl Into<String>) -> Result<Self, ActionError> {
        let server_url = server_url.into();
        let parsed = Url::parse(&server_url)
            .map_err(|err| ActionError::Transport(format!("invalid server url {server_url}: {err}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ActionError::Transport(format!(
                "server url must start with http:// or https://, got {server_url}"
            )));
        }
        Ok(Self {
            http: Client::new(),
            server_url: server_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post(&self, url: String) -> Result<(), ActionError> {
        debug!(%url, "posting record action request");
        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(|err| ActionError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let raw = response
            .bytes()
            .await
            .map_err(|err| ActionError::Transport(err.to_string()))?;
        match ErrorBody::decode(&raw) {
            Some(body) => Err(ActionError::Remote { body }),
            None => Err(ActionError::MalformedFailure {
                status: status.as_u16(),
            }),
        }
    }
}

#[async_trait]
impl EntryMutation for HttpActionGateway {
    async fn add_entry(&self, record_id: &RecordId) -> Result<(), ActionError> {
        self.post(format!(
            "{}/records/{}/entries",
            self.server_url, record_id.0
        ))
        .await
    }
}

#[async_trait]
impl RecordStore for HttpActionGateway {
    async fn refresh(&self, record_id: &RecordId) -> Result<(), ActionError> {
        self.post(format!(
            "{}/records/{}/refresh",
            self.server_url, record_id.0
        ))
        .await
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
