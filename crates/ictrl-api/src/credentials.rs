// Credential caching and the 401 challenge collaborator.
//
// The node authenticates every request with a single shared secret. The
// store keeps that secret with a fixed TTL (the original web GUI used a
// 7-day cookie); the prompt is the external collaborator that supplies a
// fresh secret when the node answers 401.

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::future::BoxFuture;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Error;

/// How long a freshly entered secret stays cached.
pub const DEFAULT_CREDENTIAL_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// The cached shared secret and its expiry instant.
#[derive(Clone)]
pub struct Credential {
    pub secret: SecretString,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("secret", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Persistence for the shared secret.
///
/// Absence is a valid, expected state (unauthenticated); storage failures
/// are logged and swallowed — the worst case is re-prompting the operator.
pub trait CredentialStore: Send + Sync {
    /// The cached credential, if present and unexpired.
    fn get(&self) -> Option<Credential>;

    /// Cache a new secret for `ttl`, replacing any previous value.
    fn set(&self, secret: SecretString, ttl: Duration);
}

/// External collaborator answering a 401 challenge (a password dialog in
/// the original GUI). Returning `None` cancels the call — this is the only
/// way the otherwise unbounded challenge loop terminates.
pub trait CredentialPrompt: Send + Sync {
    fn request_secret(&self) -> BoxFuture<'_, Option<SecretString>>;
}

/// A prompt that always cancels. For non-interactive embedders where an
/// expired secret should surface as an error instead of blocking.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrompt;

impl CredentialPrompt for NoPrompt {
    fn request_secret(&self) -> BoxFuture<'_, Option<SecretString>> {
        Box::pin(async { None })
    }
}

// ── In-memory store ─────────────────────────────────────────────────

/// Process-local credential store. Used by tests and short-lived embedders.
#[derive(Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a known secret (cached for the default TTL).
    pub fn with_secret(secret: SecretString) -> Self {
        let store = Self::default();
        store.set(secret, DEFAULT_CREDENTIAL_TTL);
        store
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<Credential> {
        let guard = self.slot.lock().ok()?;
        guard
            .as_ref()
            .filter(|c| !c.is_expired(Utc::now()))
            .cloned()
    }

    fn set(&self, secret: SecretString, ttl: Duration) {
        let expires_at = Utc::now() + ttl;
        if let Ok(mut guard) = self.slot.lock() {
            *guard = Some(Credential { secret, expires_at });
        }
    }
}

// ── File-backed store ───────────────────────────────────────────────

/// On-disk serialization of the cached credential.
///
/// The secret is stored in the clear, matching the original GUI's cookie;
/// the file lives in the user's data directory with default permissions.
#[derive(Serialize, Deserialize)]
struct CachedCredential {
    secret: String,
    expires_at: DateTime<Utc>,
}

/// Credential store persisted as a small JSON file, surviving restarts
/// within the TTL window.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The platform-default cache location
    /// (e.g. `~/.local/share/ictrl/credential.json` on Linux).
    pub fn default_path() -> Result<PathBuf, Error> {
        let dirs = directories::ProjectDirs::from("", "", "ictrl").ok_or_else(|| {
            Error::Deserialization {
                message: "could not resolve a home directory for the credential cache".into(),
                body: String::new(),
            }
        })?;
        Ok(dirs.data_dir().join("credential.json"))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<Credential> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let cached: CachedCredential = match serde_json::from_str(&raw) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable credential cache");
                return None;
            }
        };
        let credential = Credential {
            secret: SecretString::from(cached.secret),
            expires_at: cached.expires_at,
        };
        if credential.is_expired(Utc::now()) {
            debug!("cached credential expired");
            return None;
        }
        Some(credential)
    }

    fn set(&self, secret: SecretString, ttl: Duration) {
        let cached = CachedCredential {
            secret: secret.expose_secret().to_owned(),
            expires_at: Utc::now() + ttl,
        };
        let result = (|| -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let body = serde_json::to_string(&cached)?;
            std::fs::write(&self.path, body)
        })();
        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, "failed to persist credential");
        }
    }
}
