// Shared transport configuration and the single-request POST layer.
//
// Every node endpoint is a form-encoded POST answered with a JSON object.
// RequestTransport performs exactly one exchange and classifies the outcome;
// retry policy (the 401 challenge) belongs to NodeClient.

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::Error;

/// Configuration for building the underlying `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("ictrl/0.1.0")
            .build()
            .map_err(Error::Transport)
    }
}

/// Raw HTTP layer for the node's administrative API.
///
/// Credential-agnostic: the `password` field is merged into the payload by
/// [`NodeClient`](crate::NodeClient) before this layer is invoked. Never
/// retries.
#[derive(Debug, Clone)]
pub struct RequestTransport {
    http: reqwest::Client,
    base_url: Url,
}

impl RequestTransport {
    /// Create a transport from a base URL (e.g. `http://localhost:2187`).
    pub fn new(base_url: Url, config: &TransportConfig) -> Result<Self, Error> {
        let http = config.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a transport with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The node base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send one form-encoded POST and classify the response.
    ///
    /// Outcomes:
    /// - HTTP 401 ⇒ [`Error::Unauthorized`]
    /// - other non-2xx ⇒ [`Error::Http`]
    /// - 2xx body with a string `error` field (or `"success": false`) ⇒
    ///   [`Error::Api`] with the node's verbatim message
    /// - 2xx with parseable JSON ⇒ the parsed object
    pub async fn send(
        &self,
        path: &str,
        payload: &[(&str, String)],
    ) -> Result<serde_json::Value, Error> {
        let url = self.base_url.join(path).map_err(Error::InvalidUrl)?;
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .form(payload)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized);
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        if let Some(message) = value.get("error").and_then(|v| v.as_str()) {
            return Err(Error::Api {
                message: message.to_owned(),
            });
        }
        if value.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
            return Err(Error::Api {
                message: "request failed without error message".into(),
            });
        }

        Ok(value)
    }
}
