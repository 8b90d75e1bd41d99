//! Node configuration editing with explicit load/save boundaries.
//!
//! The synchronizer keeps a working copy of the node's configuration next to
//! the factory defaults. Edits are purely local until [`save`] pushes the
//! whole mapping in one request; there is no partial merge, and a failed
//! save leaves the pending edits intact for the caller to retry or discard.
//!
//! [`save`]: ConfigSynchronizer::save

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use ictrl_api::{ConfigMap, NodeClient};

use crate::error::CoreError;

pub struct ConfigSynchronizer {
    client: Arc<NodeClient>,
    config: ConfigMap,
    default_config: ConfigMap,
}

impl ConfigSynchronizer {
    pub fn new(client: Arc<NodeClient>) -> Self {
        Self {
            client,
            config: ConfigMap::new(),
            default_config: ConfigMap::new(),
        }
    }

    /// Fetch the node's current configuration and its factory defaults.
    ///
    /// Both fetches must succeed before either replaces local state, so an
    /// interrupted load never leaves current and defaults out of step.
    /// Pending edits are discarded: after a load the working copy is exactly
    /// what the node reported.
    pub async fn load(&mut self) -> Result<(), CoreError> {
        let current = self.client.get_config().await?;
        let info = self.client.get_info().await?;
        self.config = current;
        self.default_config = info.default_config;
        Ok(())
    }

    /// The working copy, including unsaved edits.
    pub fn config(&self) -> &ConfigMap {
        &self.config
    }

    /// The node's factory defaults, as reported at the last load.
    pub fn default_config(&self) -> &ConfigMap {
        &self.default_config
    }

    /// Stage one entry locally. Nothing is sent until [`save`].
    ///
    /// [`save`]: ConfigSynchronizer::save
    pub fn set_entry(&mut self, key: impl Into<String>, value: Value) {
        self.config.insert(key.into(), value);
    }

    /// Replace the working copy with the factory defaults. Local only.
    pub fn reset(&mut self) {
        self.config = self.default_config.clone();
    }

    /// True when the working copy differs from the factory defaults.
    pub fn is_default(&self) -> bool {
        self.config == self.default_config
    }

    /// Push the whole working copy to the node.
    ///
    /// On success the state is reloaded so the working copy reflects
    /// whatever normalization the node applied. On failure the pending
    /// edits stay in place.
    pub async fn save(&mut self) -> Result<(), CoreError> {
        self.client.set_config(&self.config).await?;
        debug!("configuration saved, reloading");
        self.load().await
    }
}
