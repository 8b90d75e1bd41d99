// Authenticated client — the session object shared by all managers.
//
// Every outgoing payload gets the cached secret appended under the reserved
// `password` field. HTTP 401 never reaches the caller: the call suspends,
// the prompt supplies a fresh secret, the secret is persisted, and the same
// request is resubmitted. The loop has no attempt cap — it terminates when
// the prompt cancels or the node stops answering 401.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::credentials::{CredentialPrompt, CredentialStore, DEFAULT_CREDENTIAL_TTL};
use crate::error::Error;
use crate::transport::{RequestTransport, TransportConfig};

/// Reserved payload field carrying the shared secret.
pub const PASSWORD_FIELD: &str = "password";

/// Authenticated client for the node's administrative API.
///
/// Owns the credential store and prompt; managers in `ictrl-core` hold this
/// behind an `Arc` and never touch the secret directly. The secret is
/// process-wide: one successful challenge benefits every subsequent call.
pub struct NodeClient {
    transport: RequestTransport,
    credentials: Arc<dyn CredentialStore>,
    prompt: Arc<dyn CredentialPrompt>,
    credential_ttl: Duration,
}

impl NodeClient {
    /// Create a client for the node at `base_url`.
    pub fn new(
        base_url: Url,
        config: &TransportConfig,
        credentials: Arc<dyn CredentialStore>,
        prompt: Arc<dyn CredentialPrompt>,
    ) -> Result<Self, Error> {
        let transport = RequestTransport::new(base_url, config)?;
        Ok(Self::with_transport(transport, credentials, prompt))
    }

    /// Create a client around an existing transport.
    pub fn with_transport(
        transport: RequestTransport,
        credentials: Arc<dyn CredentialStore>,
        prompt: Arc<dyn CredentialPrompt>,
    ) -> Self {
        Self {
            transport,
            credentials,
            prompt,
            credential_ttl: DEFAULT_CREDENTIAL_TTL,
        }
    }

    /// Override how long a freshly prompted secret stays cached.
    #[must_use]
    pub fn with_credential_ttl(mut self, ttl: Duration) -> Self {
        self.credential_ttl = ttl;
        self
    }

    /// The node base URL.
    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }

    /// Submit an authenticated request, absorbing any 401 challenge.
    ///
    /// The cached secret (empty if absent) is appended to `fields` and the
    /// request delegated to the transport. On `Unauthorized` the prompt is
    /// asked for a new secret; on receipt it is persisted for the configured
    /// TTL and the identical request resubmitted. A cancelled prompt
    /// surfaces the `Unauthorized` to the caller — the only way out of a
    /// node that keeps rejecting.
    ///
    /// Concurrent calls that each receive 401 each raise their own prompt;
    /// challenges are deliberately not serialized.
    pub async fn submit(
        &self,
        path: &str,
        fields: &[(&str, String)],
    ) -> Result<serde_json::Value, Error> {
        loop {
            let secret = self
                .credentials
                .get()
                .map_or_else(String::new, |c| c.secret.expose_secret().to_owned());

            let mut payload: Vec<(&str, String)> = Vec::with_capacity(fields.len() + 1);
            payload.extend_from_slice(fields);
            payload.push((PASSWORD_FIELD, secret));

            match self.transport.send(path, &payload).await {
                Err(Error::Unauthorized) => {
                    debug!(path, "credential rejected, soliciting a new secret");
                    match self.prompt.request_secret().await {
                        Some(new_secret) => {
                            self.store_secret(new_secret);
                        }
                        None => return Err(Error::Unauthorized),
                    }
                }
                other => return other,
            }
        }
    }

    /// Persist a secret for the configured TTL, visible to all later calls.
    pub fn store_secret(&self, secret: SecretString) {
        self.credentials.set(secret, self.credential_ttl);
    }
}

/// Extract and deserialize one field of a response object.
///
/// The node wraps payloads in `{ "success": true, "<field>": ... }`;
/// a missing field is a deserialization error carrying the full body.
pub(crate) fn take_field<T: serde::de::DeserializeOwned>(
    mut value: serde_json::Value,
    field: &str,
) -> Result<T, Error> {
    let inner = value
        .get_mut(field)
        .map(serde_json::Value::take)
        .ok_or_else(|| Error::Deserialization {
            message: format!("response missing `{field}` field"),
            body: value.to_string(),
        })?;
    serde_json::from_value(inner).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: value.to_string(),
    })
}

/// Deserialize a whole response object, ignoring the `success` flag.
pub(crate) fn whole<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
) -> Result<T, Error> {
    let body = value.to_string();
    serde_json::from_value(value).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}
