//! Neighbor (peer) management and traffic stat presentation.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use ictrl_api::{Neighbor, NodeClient, StatSample};

use crate::error::CoreError;

/// Neighbor list plus add/remove operations.
///
/// A neighbor the node has not yet measured comes back with an empty stat
/// series; the manager synthesizes a single zeroed sample stamped at fetch
/// time so every neighbor always has at least one data point.
pub struct NeighborManager {
    client: Arc<NodeClient>,
    neighbors: Vec<Neighbor>,
}

impl NeighborManager {
    pub fn new(client: Arc<NodeClient>) -> Self {
        Self {
            client,
            neighbors: Vec::new(),
        }
    }

    /// The neighbor list as of the last successful refresh.
    pub fn neighbors(&self) -> &[Neighbor] {
        &self.neighbors
    }

    /// Re-fetch the neighbor list and its stat history.
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        let mut neighbors = self.client.get_neighbors().await?;
        let now = Utc::now().timestamp_millis();
        for neighbor in &mut neighbors {
            if neighbor.stats.is_empty() {
                neighbor.stats.push(StatSample::zeroed(now));
            }
        }
        self.neighbors = neighbors;
        Ok(())
    }

    /// Add a neighbor by `HOST:PORT` address.
    ///
    /// Only blankness is checked here; address syntax is the node's call.
    pub async fn add(&mut self, address: &str) -> Result<(), CoreError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(CoreError::EmptyAddress);
        }
        self.client.add_neighbor(address).await?;
        info!(%address, "neighbor added");
        self.refresh().await
    }

    /// Remove a neighbor by address.
    pub async fn remove(&mut self, address: &str) -> Result<(), CoreError> {
        self.client.remove_neighbor(address).await?;
        info!(%address, "neighbor removed");
        self.refresh().await
    }
}
