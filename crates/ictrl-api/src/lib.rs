//! Async client for the administrative HTTP API of an Ict node.
//!
//! The node exposes a flat POST surface (`getModules`, `addNeighbor`,
//! `getLogs`, ...) where every request is form-encoded, authenticated by a
//! shared `password` field, and answered with a JSON object carrying either
//! the payload or an `error` string. This crate owns the wire mechanics:
//!
//! - **[`RequestTransport`]** — one form-encoded POST, one classified result.
//! - **[`NodeClient`]** — attaches the cached credential to every request and
//!   absorbs HTTP 401 by soliciting a fresh secret through a
//!   [`CredentialPrompt`], then resubmitting. Callers never see the challenge.
//! - **Credential caching** — [`CredentialStore`] implementations persist the
//!   secret with a 7-day TTL so a session survives restarts.
//! - **Typed endpoint wrappers** — one inherent-impl file per domain
//!   (modules, neighbors, config, logs, system).
//!
//! Stateful synchronization (pending config edits, log pagination, list
//! refresh after mutations) lives in `ictrl-core`.

pub mod client;
pub mod credentials;
pub mod error;
pub mod models;
pub mod transport;

mod endpoints;

pub use client::{NodeClient, PASSWORD_FIELD};
pub use credentials::{
    Credential, CredentialPrompt, CredentialStore, DEFAULT_CREDENTIAL_TTL, FileCredentialStore,
    MemoryCredentialStore, NoPrompt,
};
pub use error::Error;
pub use models::{
    ConfigMap, GuiEndpoint, LogEntry, LogWindow, Module, ModuleConfig, Neighbor, NodeInfo,
    StatSample,
};
pub use transport::{RequestTransport, TransportConfig};
