//! Stateful managers for administering a running Ict node.
//!
//! Everything here builds on [`ictrl_api`]'s authenticated client: the
//! managers own the client-side state (module list, neighbor list, log
//! cursor, pending config edits) and the rules for when that state may
//! change — never before the node confirms a mutation. Embedders construct
//! one [`NodeClient`](ictrl_api::NodeClient) via [`Settings::client`] and
//! hand it to whichever managers they need.

pub mod config;
pub mod config_sync;
pub mod error;
pub mod logs;
pub mod modules;
pub mod neighbors;

pub use config::Settings;
pub use config_sync::ConfigSynchronizer;
pub use error::CoreError;
pub use logs::{LogPaginator, PAGE_SIZE};
pub use modules::{CommandResponse, ModuleManager, parse_repository_slug};
pub use neighbors::NeighborManager;
