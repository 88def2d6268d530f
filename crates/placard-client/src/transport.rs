//! Transport for issuing frame action calls.

use async_trait::async_trait;
use placard_types::{ActionBody, ActionResponse};
use thiserror::Error;

/// Errors from issuing an action call.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP request itself failed (connection, timeout, decode).
    #[error("action request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The action endpoint answered with a non-success status.
    #[error("action endpoint returned status {0}")]
    ErrorStatus(u16),
}

/// Issues action calls on behalf of the dispatcher.
///
/// Abstracted so tests can substitute a scripted implementation for the
/// HTTP transport.
#[async_trait]
pub trait ActionTransport: Send + Sync {
    /// Sends an action body to the plain action endpoint.
    async fn post_action(&self, body: &ActionBody) -> Result<ActionResponse, TransportError>;

    /// Sends an action body to the redirect-capturing endpoint.
    async fn post_redirect(&self, body: &ActionBody) -> Result<ActionResponse, TransportError>;
}

/// HTTP transport targeting a Placard preview server.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport for the preview server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    async fn post(&self, path: &str, body: &ActionBody) -> Result<ActionResponse, TransportError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::ErrorStatus(status.as_u16()));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ActionTransport for HttpTransport {
    async fn post_action(&self, body: &ActionBody) -> Result<ActionResponse, TransportError> {
        self.post("/api/frames/action", body).await
    }

    async fn post_redirect(&self, body: &ActionBody) -> Result<ActionResponse, TransportError> {
        self.post("/api/frames/redirect", body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let transport = HttpTransport::new("http://localhost:3000///");
        assert_eq!(transport.base_url, "http://localhost:3000");
    }
}
