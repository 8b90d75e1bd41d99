// IXI module endpoints: listing, lifecycle, configuration, and the
// ad-hoc request/response channel.

use crate::client::{NodeClient, take_field, whole};
use crate::error::Error;
use crate::models::{ConfigMap, Module, ModuleConfig};

impl NodeClient {
    /// List installed modules (`getModules`).
    pub async fn get_modules(&self) -> Result<Vec<Module>, Error> {
        let value = self.submit("getModules", &[]).await?;
        take_field(value, "modules")
    }

    /// Install a module from an `owner/repository` slug (`addModule`).
    ///
    /// The slug must already be normalized — see
    /// `ictrl_core::modules::parse_repository_slug`.
    pub async fn add_module(&self, user_slash_repo: &str) -> Result<(), Error> {
        self.submit(
            "addModule",
            &[("user_slash_repo", user_slash_repo.to_owned())],
        )
        .await?;
        Ok(())
    }

    /// Uninstall a module by path (`removeModule`).
    pub async fn remove_module(&self, path: &str) -> Result<(), Error> {
        self.submit("removeModule", &[("path", path.to_owned())])
            .await?;
        Ok(())
    }

    /// Replace a module with the given released version (`updateModule`).
    pub async fn update_module(&self, path: &str, version: &str) -> Result<(), Error> {
        self.submit(
            "updateModule",
            &[("path", path.to_owned()), ("version", version.to_owned())],
        )
        .await?;
        Ok(())
    }

    /// Fetch one module's current and default configuration
    /// (`getModuleConfig`).
    pub async fn get_module_config(&self, path: &str) -> Result<ModuleConfig, Error> {
        let value = self
            .submit("getModuleConfig", &[("path", path.to_owned())])
            .await?;
        whole(value)
    }

    /// Replace one module's configuration (`setModuleConfig`).
    pub async fn set_module_config(&self, path: &str, config: &ConfigMap) -> Result<(), Error> {
        let serialized = serde_json::Value::Object(config.clone()).to_string();
        self.submit(
            "setModuleConfig",
            &[("path", path.to_owned()), ("config", serialized)],
        )
        .await?;
        Ok(())
    }

    /// Dispatch an opaque request string to a module and return its raw
    /// response (`getModuleResponse`). The response is often JSON-encoded
    /// but the node makes no promise.
    pub async fn module_response(&self, path: &str, request: &str) -> Result<String, Error> {
        let value = self
            .submit(
                "getModuleResponse",
                &[("path", path.to_owned()), ("request", request.to_owned())],
            )
            .await?;
        take_field(value, "response")
    }
}
