//! Forward-only pagination over the node's append-only log.
//!
//! The node indexes its log as a window `[min, max)` and serves arbitrary
//! sub-ranges. The paginator accumulates entries oldest to newest, never
//! re-requests what it already holds, and reconciles against a node restart
//! by reloading when the server's range shrinks below its cursor.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::TimeZone;
use tracing::debug;

use ictrl_api::{LogEntry, NodeClient};

use crate::error::CoreError;

/// Entries fetched per `load_more` call.
pub const PAGE_SIZE: u64 = 30;

pub struct LogPaginator {
    client: Arc<NodeClient>,
    entries: Vec<LogEntry>,
    /// Server-reported `[min, max)` range, absent before the first fetch.
    range: Option<(u64, u64)>,
}

impl LogPaginator {
    pub fn new(client: Arc<NodeClient>) -> Self {
        Self {
            client,
            entries: Vec::new(),
            range: None,
        }
    }

    /// Accumulated entries, oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// True while the server holds entries beyond the cursor.
    pub fn has_more(&self) -> bool {
        self.range
            .is_some_and(|(min, max)| self.held() < max.saturating_sub(min))
    }

    /// Discard everything and fetch a fresh initial window.
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        let window = self.client.get_logs(None, None).await?;
        self.entries.clear();
        self.range = Some((window.min, window.max));
        self.append(window.logs);
        Ok(())
    }

    /// Fetch the next window past the cursor.
    ///
    /// A no-op once everything is held. If the server's `max` has shrunk
    /// below the cursor the accumulated state is stale (the node restarted
    /// and its log started over), so the paginator reloads from scratch.
    pub async fn load_more(&mut self) -> Result<(), CoreError> {
        let Some((min, max)) = self.range else {
            return self.refresh().await;
        };
        let held = self.held();
        if held >= max.saturating_sub(min) {
            return Ok(());
        }

        let from = min + held;
        let to = max.min(from + PAGE_SIZE);
        let window = self.client.get_logs(Some(from), Some(to)).await?;

        if window.max < from {
            debug!(
                cursor = from,
                reported = window.max,
                "log range shrank, reloading"
            );
            return self.refresh().await;
        }

        self.append(window.logs);
        self.range = Some((min, window.max));
        Ok(())
    }

    /// Render the held entries as text, one line per entry, oldest first.
    pub fn export(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let stamp = chrono::Utc
                .timestamp_millis_opt(entry.timestamp)
                .single()
                .map_or_else(
                    || entry.timestamp.to_string(),
                    |t| t.format("%d.%m.%Y %H:%M:%S").to_string(),
                );
            out.push_str(&stamp);
            out.push(' ');
            out.push_str(&entry.message);
            out.push('\n');
        }
        out
    }

    fn held(&self) -> u64 {
        u64::try_from(self.entries.len()).unwrap_or(u64::MAX)
    }

    /// Append a window, dropping entries already held. Identity is
    /// `(timestamp, message)` — the node has no per-entry ids.
    fn append(&mut self, logs: Vec<LogEntry>) {
        let seen: HashSet<(i64, &str)> = self
            .entries
            .iter()
            .map(|e| (e.timestamp, e.message.as_str()))
            .collect();
        let fresh: Vec<LogEntry> = logs
            .into_iter()
            .filter(|e| !seen.contains(&(e.timestamp, e.message.as_str())))
            .collect();
        self.entries.extend(fresh);
    }
}
