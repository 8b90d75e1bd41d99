// Append-only log endpoint.

use crate::client::{NodeClient, whole};
use crate::error::Error;
use crate::models::LogWindow;

impl NodeClient {
    /// Fetch one window of the node's log (`getLogs`).
    ///
    /// With no bounds the node picks the window itself and reports its
    /// current `{min, max}` index range; bounded requests fetch
    /// `[min, max)` of that range.
    pub async fn get_logs(&self, min: Option<u64>, max: Option<u64>) -> Result<LogWindow, Error> {
        let mut fields: Vec<(&str, String)> = Vec::new();
        if let Some(min) = min {
            fields.push(("min", min.to_string()));
        }
        if let Some(max) = max {
            fields.push(("max", max.to_string()));
        }
        let value = self.submit("getLogs", &fields).await?;
        whole(value)
    }
}
