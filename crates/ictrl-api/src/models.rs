// Wire models for the node's JSON responses.
//
// Fields use `#[serde(default)]` liberally because the node omits optional
// fields instead of sending null, and a flattened `extra` map keeps
// undocumented fields round-trippable.

use serde::{Deserialize, Serialize};

/// A flat property-name → scalar-value mapping, used for both the node
/// configuration and per-module configuration.
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

// ── Modules ──────────────────────────────────────────────────────────

/// An installed IXI module as reported by `getModules`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Relative path of the module in the node's `modules/` directory.
    /// Unique; identifies the module in every other module endpoint.
    pub path: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `owner/repository` slug the module was installed from.
    #[serde(default)]
    pub repository: Option<String>,
    /// Newer version available for install, if any.
    #[serde(default)]
    pub update: Option<String>,
    /// Embedded web UI location encoding — see [`Module::gui_endpoint`].
    #[serde(default = "default_gui_port")]
    pub gui_port: i64,
    #[serde(default)]
    pub configurable: bool,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_gui_port() -> i64 {
    -1
}

/// Where a module's embedded web UI is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuiEndpoint {
    /// No embedded UI.
    None,
    /// Served by the node itself under `/modules/{name}/`.
    SubPath,
    /// Served on its own port on the node host.
    Port(u16),
}

impl Module {
    /// Decode `gui_port`: positive values are a dedicated port, zero means
    /// the node serves the UI under a sub-path, negative means no UI.
    pub fn gui_endpoint(&self) -> GuiEndpoint {
        match self.gui_port {
            p if p > 0 => u16::try_from(p).map_or(GuiEndpoint::None, GuiEndpoint::Port),
            0 => GuiEndpoint::SubPath,
            _ => GuiEndpoint::None,
        }
    }

    /// Display name — the module name, falling back to its path.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.path
        } else {
            &self.name
        }
    }
}

/// Current and default configuration of one module (`getModuleConfig`).
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleConfig {
    pub config: ConfigMap,
    pub default_config: ConfigMap,
}

// ── Neighbors ────────────────────────────────────────────────────────

/// A peer connection of the node with its traffic counter history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neighbor {
    /// `HOST:PORT`; unique among the node's neighbors.
    pub address: String,
    /// Per-interval counters, chronological. May arrive empty for a
    /// neighbor that has not completed a round yet.
    #[serde(default)]
    pub stats: Vec<StatSample>,
}

/// One per-round traffic counter sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSample {
    /// Milliseconds since the epoch.
    pub timestamp: i64,
    #[serde(default)]
    pub all: u64,
    #[serde(default)]
    pub new: u64,
    #[serde(default)]
    pub requested: u64,
    #[serde(default)]
    pub invalid: u64,
    #[serde(default)]
    pub ignored: u64,
}

impl StatSample {
    /// A sample with all counters at zero, stamped `timestamp`.
    pub fn zeroed(timestamp: i64) -> Self {
        Self {
            timestamp,
            all: 0,
            new: 0,
            requested: 0,
            invalid: 0,
            ignored: 0,
        }
    }
}

// ── Log ──────────────────────────────────────────────────────────────

/// One entry of the node's append-only log.
///
/// Identity is the `(timestamp, message)` pair — two entries may share a
/// timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Milliseconds since the epoch. Non-decreasing across a session.
    pub timestamp: i64,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub message: String,
}

/// One window of the log plus the node's current index bounds
/// (`getLogs` response).
#[derive(Debug, Clone, Deserialize)]
pub struct LogWindow {
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    /// Index of the first log entry still held by the node.
    pub min: u64,
    /// Index one past the newest entry held by the node.
    pub max: u64,
}

// ── Node info ────────────────────────────────────────────────────────

/// General node information (`getInfo`).
#[derive(Debug, Clone, Deserialize)]
pub struct NodeInfo {
    pub version: String,
    /// Newer node version available for download, if any.
    #[serde(default)]
    pub update: Option<String>,
    /// Factory defaults — the counterpart for configuration diffing.
    #[serde(default)]
    pub default_config: ConfigMap,
}
