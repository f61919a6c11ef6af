//! Error types for azfn
//!
//! All modules use `AzfnResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for azfn operations
pub type AzfnResult<T> = Result<T, AzfnError>;

/// All errors that can occur in azfn
#[derive(Error, Debug)]
pub enum AzfnError {
    // Environment errors
    #[error("Azure CLI not found. Install from https://aka.ms/azure-cli")]
    AzureCliNotFound,

    #[error("Azure not authenticated. Run: az login")]
    AzureNotAuthenticated,

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Remote errors
    #[error("Function App not found: {0}")]
    SiteNotFound(String),

    #[error("Azure request failed: {command}: {reason}")]
    Remote { command: String, reason: String },

    #[error("Unexpected response from {command}: {reason}")]
    RemoteResponse { command: String, reason: String },

    #[error("Invalid proxies.json: {0}")]
    ProxiesInvalid(String),

    // Project errors
    #[error("Unsupported project runtime: {0}")]
    UnsupportedRuntime(String),

    #[error("Invalid editor configuration at {path}: {reason}")]
    EditorConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl AzfnError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a remote API error
    pub fn remote(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Remote {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Check if the error came from the remote management API
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Remote { .. }
                | Self::RemoteResponse { .. }
                | Self::SiteNotFound(_)
                | Self::AzureNotAuthenticated
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::AzureCliNotFound => Some("Install the Azure CLI from https://aka.ms/azure-cli"),
            Self::AzureNotAuthenticated => Some("Run: az login"),
            Self::SiteNotFound(_) => Some("Check the app name, resource group and --slot"),
            Self::UnsupportedRuntime(_) => Some("Supported runtimes: ~1, ~2, ~3, ~4"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AzfnError::SiteNotFound("my-app".to_string());
        assert!(err.to_string().contains("Function App not found: my-app"));
    }

    #[test]
    fn error_hint() {
        let err = AzfnError::AzureNotAuthenticated;
        assert_eq!(err.hint(), Some("Run: az login"));
    }

    #[test]
    fn error_is_remote() {
        assert!(AzfnError::remote("az functionapp show", "boom").is_remote());
        assert!(!AzfnError::User("nope".to_string()).is_remote());
    }
}
