use thiserror::Error;

/// Top-level error type for the `ictrl-api` crate.
///
/// Mirrors the node's failure surface: transport-level failures, the HTTP
/// 401 challenge, and application errors reported inside an otherwise
/// successful JSON body. `ictrl-core` maps these into caller-facing results.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP 401 — the password was rejected. Absorbed by
    /// [`NodeClient::submit`](crate::NodeClient::submit) unless the
    /// credential prompt cancels the challenge.
    #[error("Access denied: password rejected by node")]
    Unauthorized,

    /// Application-level error: HTTP 2xx with an `error` field in the body.
    /// The message is the node's verbatim text, intended for display.
    #[error("Node error: {message}")]
    Api { message: String },

    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx status other than 401 (the node has no such responses in
    /// normal operation; a proxy or crash page produces these).
    #[error("Unexpected HTTP status {status}")]
    Http { status: u16, body: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` for generic network-layer failures — everything the
    /// caller should render as "node unreachable" rather than a message
    /// from the node itself.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Http { .. } | Self::Deserialization { .. }
        )
    }
}
