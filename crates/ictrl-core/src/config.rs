//! Client-side settings: where the node lives and how credentials are cached.
//!
//! Settings merge from defaults ← TOML file ← `ICTRL_*` environment
//! variables. This is configuration *of the client*; the node's own
//! configuration is handled by [`ConfigSynchronizer`](crate::ConfigSynchronizer).

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

use ictrl_api::{
    CredentialPrompt, CredentialStore, FileCredentialStore, MemoryCredentialStore, NodeClient,
    TransportConfig,
};

use crate::error::CoreError;

/// Client settings, loaded from file and environment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Base URL of the node's administrative API.
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Persist the shared secret across restarts.
    #[serde(default = "default_cache")]
    pub credential_cache: bool,

    /// How long a prompted secret stays cached.
    #[serde(default = "default_ttl_days")]
    pub credential_ttl_days: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout(),
            credential_cache: default_cache(),
            credential_ttl_days: default_ttl_days(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:2187".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_cache() -> bool {
    true
}
fn default_ttl_days() -> u64 {
    7
}

/// Resolve the settings file path via platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "ictrl").map_or_else(
        || PathBuf::from(".ictrl.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

impl Settings {
    /// Load settings from the canonical file and `ICTRL_*` environment.
    pub fn load() -> Result<Self, CoreError> {
        Self::load_from(&config_path())
    }

    /// Load settings from an explicit file path (tests, alternate setups).
    pub fn load_from(path: &std::path::Path) -> Result<Self, CoreError> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("ICTRL_"))
            .extract()
            .map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Load settings, falling back to defaults when nothing is configured.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Serialize to TOML and write to the canonical settings path.
    pub fn save(&self) -> Result<(), CoreError> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::Config(e.to_string()))?;
        }
        let body = toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;
        std::fs::write(&path, body).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Assemble a ready client from these settings.
    ///
    /// The credential store is file-backed unless `credential_cache` is off.
    pub fn client(&self, prompt: Arc<dyn CredentialPrompt>) -> Result<Arc<NodeClient>, CoreError> {
        let base_url: Url = self
            .url
            .parse()
            .map_err(|e| CoreError::Config(format!("invalid node url '{}': {e}", self.url)))?;

        let store: Arc<dyn CredentialStore> = if self.credential_cache {
            let path = FileCredentialStore::default_path().map_err(CoreError::Api)?;
            Arc::new(FileCredentialStore::new(path))
        } else {
            Arc::new(MemoryCredentialStore::new())
        };

        let transport = TransportConfig {
            timeout: Duration::from_secs(self.timeout_secs),
        };
        let ttl = Duration::from_secs(self.credential_ttl_days * 24 * 60 * 60);
        let client = NodeClient::new(base_url, &transport, store, prompt)
            .map_err(CoreError::Api)?
            .with_credential_ttl(ttl);
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn defaults_point_at_localhost() {
        let settings = Settings::default();
        assert_eq!(settings.url, "http://localhost:2187");
        assert_eq!(settings.timeout_secs, 30);
        assert!(settings.credential_cache);
        assert_eq!(settings.credential_ttl_days, 7);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "url = \"http://10.0.0.5:2187\"\ntimeout_secs = 5\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.url, "http://10.0.0.5:2187");
        assert_eq!(settings.timeout_secs, 5);
        // Untouched keys keep their defaults.
        assert_eq!(settings.credential_ttl_days, 7);
    }

    #[test]
    fn bad_url_is_rejected_at_assembly() {
        let settings = Settings {
            url: "not a url".into(),
            ..Settings::default()
        };
        let result = settings.client(Arc::new(ictrl_api::NoPrompt));
        assert!(matches!(result, Err(CoreError::Config(_))));
    }
}
