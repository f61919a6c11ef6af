//! Normalized view of a site's `host.json`

use crate::site::version::FuncVersion;
use serde::Serialize;
use serde_json::Value;

/// Route prefix used by the host when none is configured
pub const DEFAULT_ROUTE_PREFIX: &str = "api";

/// Host configuration with defaults applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostConfig {
    /// Prefix for HTTP-triggered function routes
    pub route_prefix: String,

    /// `functionTimeout` as written, e.g. `00:05:00`
    pub function_timeout: Option<String>,

    /// Whether an extension bundle is configured
    pub has_extension_bundle: bool,

    /// True when no host data was available and every field is a default
    pub is_default: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            function_timeout: None,
            has_extension_bundle: false,
            is_default: true,
        }
    }
}

/// Parse raw host data for the given runtime version.
///
/// Malformed or missing sections fall back to defaults; this never fails.
/// 1.x keeps http settings at `http.routePrefix`, later hosts nest them
/// under `extensions.http.routePrefix`.
pub fn parse_host_json(data: Option<&Value>, version: FuncVersion) -> HostConfig {
    let Some(data) = data.filter(|d| d.is_object()) else {
        return HostConfig::default();
    };

    let http = if version.uses_extensions_section() {
        data.get("extensions").and_then(|e| e.get("http"))
    } else {
        data.get("http")
    };

    let route_prefix = http
        .and_then(|h| h.get("routePrefix"))
        .and_then(Value::as_str)
        .map(|p| p.trim_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_ROUTE_PREFIX.to_string());

    let function_timeout = data
        .get("functionTimeout")
        .and_then(Value::as_str)
        .map(str::to_string);

    HostConfig {
        route_prefix,
        function_timeout,
        has_extension_bundle: data.get("extensionBundle").is_some_and(Value::is_object),
        is_default: false,
    }
}
