// Node configuration endpoints.

use crate::client::NodeClient;
use crate::error::Error;
use crate::models::ConfigMap;

impl NodeClient {
    /// Fetch the node's current configuration (`getConfig`).
    ///
    /// The node returns the mapping at the top level of the response
    /// object; the `success` flag is stripped.
    pub async fn get_config(&self) -> Result<ConfigMap, Error> {
        let value = self.submit("getConfig", &[]).await?;
        let mut map: ConfigMap = crate::client::whole(value)?;
        map.remove("success");
        Ok(map)
    }

    /// Replace the node's configuration (`setConfig`).
    ///
    /// The full mapping is serialized into a single JSON-string field;
    /// the node applies it atomically or reports an error.
    pub async fn set_config(&self, config: &ConfigMap) -> Result<(), Error> {
        let serialized = serde_json::Value::Object(config.clone()).to_string();
        self.submit("setConfig", &[("config", serialized)]).await?;
        Ok(())
    }
}
