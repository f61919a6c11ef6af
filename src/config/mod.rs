//! Configuration management for azfn

pub mod schema;

pub use schema::Config;

use crate::error::{AzfnError, AzfnResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Locates, reads and writes the azfn config file
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Use `explicit` when given (`--config` / `AZFN_CONFIG`), otherwise
    /// `<config dir>/azfn/config.toml`
    pub fn locate(explicit: Option<PathBuf>) -> Self {
        let config_path = explicit.unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("azfn")
                .join("config.toml")
        });
        Self { config_path }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Missing file means defaults; a file that does not parse is an error
    pub async fn load(&self) -> AzfnResult<Config> {
        let path = &self.config_path;
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| AzfnError::io(format!("reading config from {}", path.display()), e))?;
        toml::from_str(&content).map_err(|e| AzfnError::ConfigInvalid {
            path: path.clone(),
            reason: e.to_string(),
        })
    }

    pub async fn save(&self, config: &Config) -> AzfnResult<()> {
        let path = &self.config_path;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AzfnError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        fs::write(path, toml::to_string_pretty(config)?)
            .await
            .map_err(|e| AzfnError::io(format!("writing config to {}", path.display()), e))?;
        info!("Saved azfn config to {}", path.display());
        Ok(())
    }
}
