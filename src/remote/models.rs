//! Resource shapes returned by the Azure management API
//!
//! Field names follow the JSON emitted by `az functionapp ...` so the
//! structs deserialize straight from CLI output.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Run state of a site or slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteState {
    Running,
    Stopped,
    /// State could not be determined (fetch failed or unrecognized value)
    Unknown,
}

impl SiteState {
    /// Map the `state` string reported by the API
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("running") {
            SiteState::Running
        } else if value.eq_ignore_ascii_case("stopped") {
            SiteState::Stopped
        } else {
            SiteState::Unknown
        }
    }
}

impl fmt::Display for SiteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SiteState::Running => "Running",
            SiteState::Stopped => "Stopped",
            SiteState::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// A deployed Function App or one of its slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Full ARM resource id
    pub id: String,

    /// App name (without the slot suffix)
    pub name: String,

    /// Owning resource group
    pub resource_group: String,

    /// Slot name, `None` for the production slot
    pub slot: Option<String>,

    /// Public host name, e.g. `my-app.azurewebsites.net`
    pub default_host_name: String,

    /// Kudu host name, e.g. `my-app.scm.azurewebsites.net`
    pub scm_host_name: String,

    /// ARM id of the hosting plan, if any
    pub server_farm_id: Option<String>,

    /// Last known run state
    pub state: SiteState,
}

impl Site {
    /// Display label: `app` or `app/slot`
    pub fn full_name(&self) -> String {
        match &self.slot {
            Some(slot) => format!("{}/{}", self.name, slot),
            None => self.name.clone(),
        }
    }

    /// Whether this is a deployment slot rather than the production app
    pub fn is_slot(&self) -> bool {
        self.slot.is_some()
    }

    /// Build a site from the raw `az functionapp show` payload
    pub fn from_resource(resource: SiteResource, slot: Option<String>) -> Self {
        let scm_host_name = resource
            .enabled_host_names
            .iter()
            .find(|h| h.contains(".scm."))
            .cloned()
            .unwrap_or_else(|| scm_host_for(&resource.default_host_name));

        // Slot resources are named `app/slot`; keep only the app part.
        let name = resource
            .name
            .split('/')
            .next()
            .unwrap_or(&resource.name)
            .to_string();

        Self {
            id: resource.id,
            name,
            resource_group: resource.resource_group,
            slot,
            default_host_name: resource.default_host_name,
            scm_host_name,
            server_farm_id: resource.server_farm_id,
            state: resource
                .state
                .as_deref()
                .map(SiteState::parse)
                .unwrap_or(SiteState::Unknown),
        }
    }
}

fn scm_host_for(default_host_name: &str) -> String {
    match default_host_name.split_once('.') {
        Some((app, rest)) => format!("{}.scm.{}", app, rest),
        None => format!("{}.scm.azurewebsites.net", default_host_name),
    }
}

/// Raw site payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteResource {
    pub id: String,
    pub name: String,
    pub resource_group: String,
    pub default_host_name: String,
    #[serde(default)]
    pub enabled_host_names: Vec<String>,
    pub server_farm_id: Option<String>,
    pub state: Option<String>,
}

/// App settings as a name/value dictionary
///
/// `properties` is optional because the API omits it for apps that have
/// never had a setting written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StringDictionary {
    pub properties: Option<HashMap<String, String>>,
}

/// One row of `az functionapp config appsettings list`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettingEntry {
    pub name: String,
    pub value: Option<String>,
    #[serde(default)]
    pub slot_setting: bool,
}

impl FromIterator<AppSettingEntry> for StringDictionary {
    fn from_iter<I: IntoIterator<Item = AppSettingEntry>>(iter: I) -> Self {
        let properties = iter
            .into_iter()
            .map(|entry| (entry.name, entry.value.unwrap_or_default()))
            .collect();
        Self {
            properties: Some(properties),
        }
    }
}

/// Subset of the site configuration used for deployments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Source control kind: `None`, `LocalGit`, `GitHub`, ...
    pub scm_type: Option<String>,

    /// Linux runtime stack, e.g. `Python|3.11`
    pub linux_fx_version: Option<String>,
}

/// Source control linkage of a site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceControl {
    pub repo_url: Option<String>,
    pub branch: Option<String>,
    pub is_manual_integration: bool,
}

/// Pricing tier of a hosting plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkuDescription {
    pub name: Option<String>,
    pub tier: Option<String>,
}

/// Hosting plan a site runs on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppServicePlan {
    pub name: String,
    pub sku: Option<SkuDescription>,
}

/// A deployed function as listed by the management API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEnvelope {
    /// Either `fn` or `app/fn` depending on the API version
    pub name: String,
    #[serde(default)]
    pub config: FunctionConfig,
    #[serde(default)]
    pub is_disabled: bool,
}

impl FunctionEnvelope {
    /// Function name without the app prefix
    pub fn short_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// Bindings section of a function's `function.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionConfig {
    #[serde(default)]
    pub bindings: Vec<FunctionBinding>,
}

/// A single trigger or binding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionBinding {
    #[serde(rename = "type")]
    pub binding_type: String,
    pub direction: Option<String>,
    pub auth_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_state_parse() {
        assert_eq!(SiteState::parse("Running"), SiteState::Running);
        assert_eq!(SiteState::parse("stopped"), SiteState::Stopped);
        assert_eq!(SiteState::parse("Restarting"), SiteState::Unknown);
    }

    #[test]
    fn site_from_slot_resource() {
        let json = r#"{
            "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Web/sites/app/slots/staging",
            "name": "app/staging",
            "resourceGroup": "rg",
            "defaultHostName": "app-staging.azurewebsites.net",
            "enabledHostNames": ["app-staging.azurewebsites.net", "app-staging.scm.azurewebsites.net"],
            "serverFarmId": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Web/serverfarms/plan",
            "state": "Running"
        }"#;
        let resource: SiteResource = serde_json::from_str(json).unwrap();
        let site = Site::from_resource(resource, Some("staging".to_string()));

        assert_eq!(site.name, "app");
        assert_eq!(site.full_name(), "app/staging");
        assert_eq!(site.scm_host_name, "app-staging.scm.azurewebsites.net");
        assert_eq!(site.state, SiteState::Running);
        assert!(site.is_slot());
    }

    #[test]
    fn scm_host_derived_when_not_listed() {
        assert_eq!(
            scm_host_for("app.azurewebsites.net"),
            "app.scm.azurewebsites.net"
        );
    }

    #[test]
    fn app_settings_collect_into_dictionary() {
        let json = r#"[
            {"name": "FUNCTIONS_EXTENSION_VERSION", "value": "~4", "slotSetting": false},
            {"name": "EMPTY", "value": null}
        ]"#;
        let entries: Vec<AppSettingEntry> = serde_json::from_str(json).unwrap();
        let dict: StringDictionary = entries.into_iter().collect();
        let props = dict.properties.unwrap();

        assert_eq!(props["FUNCTIONS_EXTENSION_VERSION"], "~4");
        assert_eq!(props["EMPTY"], "");
    }

    #[test]
    fn function_short_name() {
        let json = r#"{"name": "app/HttpTrigger1", "config": {"bindings": [
            {"type": "httpTrigger", "direction": "in", "authLevel": "function"}
        ]}}"#;
        let function: FunctionEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(function.short_name(), "HttpTrigger1");
        assert_eq!(function.config.bindings[0].binding_type, "httpTrigger");
        assert!(!function.is_disabled);
    }
}
