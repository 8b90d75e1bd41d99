// Node-level endpoints: general info and self-update.

use crate::client::{NodeClient, whole};
use crate::error::Error;
use crate::models::NodeInfo;

impl NodeClient {
    /// Fetch version, available update, and factory defaults (`getInfo`).
    pub async fn get_info(&self) -> Result<NodeInfo, Error> {
        let value = self.submit("getInfo", &[]).await?;
        whole(value)
    }

    /// Ask the node to download and switch to the given version (`update`).
    pub async fn update_node(&self, version: &str) -> Result<(), Error> {
        self.submit("update", &[("version", version.to_owned())])
            .await?;
        Ok(())
    }
}
