//! Configuration schema for azfn
//!
//! Configuration is stored at `~/.config/azfn/config.toml`

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Azure account settings
    pub azure: AzureConfig,

    /// Local project defaults
    pub project: ProjectConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Azure account settings passed through to the az CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureConfig {
    /// Azure subscription ID
    pub subscription: Option<String>,

    /// Resource group used when `--resource-group` is omitted
    pub resource_group: Option<String>,
}

/// Project initialization defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Functions runtime written to new projects (e.g. "~4")
    pub runtime: String,

    /// Add the extension-install task even when host.json has a bundle
    pub force_extensions_install: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            runtime: "~4".to_string(),
            force_extensions_install: false,
        }
    }
}
