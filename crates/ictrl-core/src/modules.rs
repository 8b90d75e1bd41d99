//! IXI module lifecycle: install, update, uninstall, configure, and the
//! ad-hoc command channel into a running module.

use std::sync::Arc;

use tracing::info;

use ictrl_api::{ConfigMap, Module, ModuleConfig, NodeClient};

use crate::error::CoreError;

/// Normalize a module install source to an `owner/repository` slug.
///
/// Accepts the bare slug or a GitHub URL (`https://github.com/owner/repo`,
/// scheme optional). The scheme is only dropped together with the
/// `github.com/` host — a bare `https://owner/repo` is not a GitHub URL
/// and fails validation. Anything that does not reduce to exactly two
/// non-empty path segments is rejected locally, before any request is
/// issued.
pub fn parse_repository_slug(input: &str) -> Result<String, CoreError> {
    let trimmed = input.trim();
    let stripped = trimmed
        .strip_prefix("https://github.com/")
        .or_else(|| trimmed.strip_prefix("github.com/"))
        .unwrap_or(trimmed);

    let mut segments = stripped.split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
            Ok(format!("{owner}/{repo}"))
        }
        _ => Err(CoreError::InvalidRepository {
            input: input.to_owned(),
        }),
    }
}

/// Raw reply from a module's request/response channel.
///
/// Modules answer with an arbitrary string; many encode JSON but the node
/// makes no promise, so the structured view is best-effort.
#[derive(Debug, Clone)]
pub struct CommandResponse {
    raw: String,
}

impl CommandResponse {
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The response parsed as JSON, if it happens to be JSON.
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.raw).ok()
    }
}

/// Installed-module list plus lifecycle operations.
///
/// Mutations re-fetch the list only after the node confirms success, so the
/// cached list never shows a state the node did not acknowledge.
pub struct ModuleManager {
    client: Arc<NodeClient>,
    modules: Vec<Module>,
}

impl ModuleManager {
    pub fn new(client: Arc<NodeClient>) -> Self {
        Self {
            client,
            modules: Vec::new(),
        }
    }

    /// The module list as of the last successful refresh.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Look up a module by its unique path.
    pub fn find(&self, path: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.path == path)
    }

    /// Re-fetch the installed module list.
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        self.modules = self.client.get_modules().await?;
        Ok(())
    }

    /// Install a module from a slug or GitHub URL.
    pub async fn install(&mut self, source: &str) -> Result<(), CoreError> {
        let slug = parse_repository_slug(source)?;
        self.client.add_module(&slug).await?;
        info!(%slug, "module installed");
        self.refresh().await
    }

    /// Uninstall the module at `path`.
    pub async fn uninstall(&mut self, path: &str) -> Result<(), CoreError> {
        self.client.remove_module(path).await?;
        info!(%path, "module removed");
        self.refresh().await
    }

    /// Replace the module at `path` with the given released version.
    pub async fn update(&mut self, path: &str, version: &str) -> Result<(), CoreError> {
        self.client.update_module(path, version).await?;
        info!(%path, %version, "module updated");
        self.refresh().await
    }

    /// Fetch one module's current and default configuration.
    pub async fn module_config(&self, path: &str) -> Result<ModuleConfig, CoreError> {
        Ok(self.client.get_module_config(path).await?)
    }

    /// Replace one module's configuration.
    pub async fn save_module_config(
        &self,
        path: &str,
        config: &ConfigMap,
    ) -> Result<(), CoreError> {
        Ok(self.client.set_module_config(path, config).await?)
    }

    /// Send an opaque request string to a running module.
    pub async fn send_command(
        &self,
        path: &str,
        request: &str,
    ) -> Result<CommandResponse, CoreError> {
        let raw = self.client.module_response(path, request).await?;
        Ok(CommandResponse { raw })
    }
}
