//! Configuration Management
//!
//! Handles persistent configuration storage for rslb. Auth tokens are never
//! written to disk.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Region used when nothing else selects one
pub const DEFAULT_REGION: &str = "dfw";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Last used region (e.g. "dfw", "ord", "lon")
    #[serde(default)]
    pub region: Option<String>,
    /// Account number embedded in the endpoint path
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Explicit endpoint, overriding region and tenant
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Preferred output format
    #[serde(default)]
    pub output: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rslb").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get effective region (CLI > env > config > default)
    pub fn effective_region(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| env_var("RSLB_REGION"))
            .or_else(|| self.region.clone())
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }

    /// Get effective tenant (CLI > env > config)
    pub fn effective_tenant(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string)
            .or_else(|| env_var("RSLB_TENANT_ID"))
            .or_else(|| self.tenant_id.clone())
    }

    /// Get effective endpoint (CLI > env > config)
    pub fn effective_endpoint(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string)
            .or_else(|| env_var("RSLB_ENDPOINT"))
            .or_else(|| self.endpoint.clone())
    }

    /// Remember region and tenant and save
    pub fn set_account(&mut self, region: &str, tenant_id: &str) -> Result<()> {
        self.region = Some(region.to_string());
        self.tenant_id = Some(tenant_id.to_string());
        self.save()
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
