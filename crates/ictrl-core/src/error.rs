// Error taxonomy for the core managers.
//
// Wire-level failures pass through from `ictrl_api::Error`; the variants
// added here are client-side validation failures that never touch the
// network, plus settings loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A failure reported by the transport or the node itself.
    #[error(transparent)]
    Api(#[from] ictrl_api::Error),

    /// An install source that does not name exactly one `owner/repository`.
    #[error("invalid repository '{input}': expected owner/repository")]
    InvalidRepository { input: String },

    /// A blank neighbor address, rejected before any request is issued.
    #[error("neighbor address must not be empty")]
    EmptyAddress,

    /// Settings could not be loaded or applied.
    #[error("settings error: {0}")]
    Config(String),
}

impl CoreError {
    /// True for connectivity-shaped failures worth retrying, as opposed to
    /// rejections the node (or this crate) made deliberately.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_network())
    }
}
