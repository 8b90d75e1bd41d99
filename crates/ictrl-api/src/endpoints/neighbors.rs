// Neighbor (peer connection) endpoints.

use crate::client::{NodeClient, take_field};
use crate::error::Error;
use crate::models::Neighbor;

impl NodeClient {
    /// List the node's neighbors with their traffic counter history
    /// (`getNeighbors`).
    pub async fn get_neighbors(&self) -> Result<Vec<Neighbor>, Error> {
        let value = self.submit("getNeighbors", &[]).await?;
        take_field(value, "neighbors")
    }

    /// Add a neighbor by `HOST:PORT` address (`addNeighbor`).
    ///
    /// Address format is enforced by the node, not here.
    pub async fn add_neighbor(&self, address: &str) -> Result<(), Error> {
        self.submit("addNeighbor", &[("address", address.to_owned())])
            .await?;
        Ok(())
    }

    /// Remove a neighbor by address (`removeNeighbor`).
    pub async fn remove_neighbor(&self, address: &str) -> Result<(), Error> {
        self.submit("removeNeighbor", &[("address", address.to_owned())])
            .await?;
        Ok(())
    }
}
