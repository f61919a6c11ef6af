//! `SiteClient` backed by the Azure CLI
//!
//! Every call shells out to `az` and parses its JSON output. Kudu
//! requests go through `az rest` so they reuse the CLI's login.

use crate::config::schema::AzureConfig;
use crate::error::{AzfnError, AzfnResult};
use crate::remote::client::{KuduClient, SiteClient};
use crate::remote::models::{
    AppServicePlan, AppSettingEntry, FunctionConfig, FunctionEnvelope, Site, SiteConfig,
    SiteResource, SiteState, SourceControl, StringDictionary,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tracing::debug;

const ARM_ENDPOINT: &str = "https://management.azure.com";
const ARM_API_VERSION: &str = "2022-03-01";
const KUDU_RESOURCE: &str = "https://management.azure.com/";

/// Site client that drives the `az` CLI
pub struct AzCliClient {
    site: Site,
    azure: AzureConfig,
}

impl AzCliClient {
    /// Bind a client to an already resolved site
    pub fn new(site: Site, azure: AzureConfig) -> Self {
        Self { site, azure }
    }

    /// Look up a Function App (or one of its slots) by name
    pub async fn show_site(
        name: &str,
        resource_group: &str,
        slot: Option<&str>,
        azure: &AzureConfig,
    ) -> AzfnResult<Site> {
        let mut args = vec!["functionapp", "show", "--name", name, "--resource-group", resource_group];
        if let Some(slot) = slot {
            args.extend(["--slot", slot]);
        }

        let resource: SiteResource = run_az_json(&args, azure).await.map_err(|e| match e {
            AzfnError::Remote { reason, .. } if is_not_found(&reason) => {
                AzfnError::SiteNotFound(display_name(name, slot))
            }
            other => other,
        })?;

        Ok(Site::from_resource(resource, slot.map(str::to_string)))
    }

    /// The site this client is bound to
    pub fn site(&self) -> &Site {
        &self.site
    }

    fn site_args<'a>(&'a self, base: &[&'a str]) -> Vec<&'a str> {
        let mut args = base.to_vec();
        args.extend([
            "--name",
            self.site.name.as_str(),
            "--resource-group",
            self.site.resource_group.as_str(),
        ]);
        if let Some(slot) = &self.site.slot {
            args.extend(["--slot", slot.as_str()]);
        }
        args
    }
}

#[async_trait]
impl SiteClient for AzCliClient {
    async fn get_state(&self) -> AzfnResult<SiteState> {
        let mut args = self.site_args(&["functionapp", "show"]);
        args.extend(["--query", "state"]);
        let state: Option<String> = run_az_json(&args, &self.azure).await?;
        Ok(state.as_deref().map(SiteState::parse).unwrap_or(SiteState::Unknown))
    }

    async fn list_application_settings(&self) -> AzfnResult<StringDictionary> {
        let args = self.site_args(&["functionapp", "config", "appsettings", "list"]);
        let entries: Option<Vec<AppSettingEntry>> = run_az_json(&args, &self.azure).await?;
        Ok(entries
            .map(|e| e.into_iter().collect())
            .unwrap_or_default())
    }

    async fn get_site_config(&self) -> AzfnResult<SiteConfig> {
        let args = self.site_args(&["functionapp", "config", "show"]);
        run_az_json(&args, &self.azure).await
    }

    async fn get_source_control(&self) -> AzfnResult<SourceControl> {
        let args = self.site_args(&["functionapp", "deployment", "source", "show"]);
        let source: Option<SourceControl> = run_az_json(&args, &self.azure).await?;
        Ok(source.unwrap_or_default())
    }

    async fn get_app_service_plan(&self) -> AzfnResult<Option<AppServicePlan>> {
        let Some(plan_id) = &self.site.server_farm_id else {
            return Ok(None);
        };
        run_az_json(&["appservice", "plan", "show", "--ids", plan_id.as_str()], &self.azure).await
    }

    async fn kudu_client(&self) -> AzfnResult<Arc<dyn KuduClient>> {
        Ok(Arc::new(AzRestKuduClient {
            scm_host_name: self.site.scm_host_name.clone(),
            azure: self.azure.clone(),
        }))
    }

    async fn list_functions(&self) -> AzfnResult<Vec<FunctionEnvelope>> {
        // `az functionapp function list` has no --slot flag, so go through ARM.
        let url = format!(
            "{}{}/functions?api-version={}",
            ARM_ENDPOINT, self.site.id, ARM_API_VERSION
        );
        let list: ArmList<ArmFunction> =
            run_az_json(&["rest", "--method", "get", "--url", url.as_str()], &self.azure).await?;
        Ok(list.value.into_iter().map(FunctionEnvelope::from).collect())
    }

    async fn delete_site(&self) -> AzfnResult<()> {
        let args = match &self.site.slot {
            Some(_) => self.site_args(&["functionapp", "deployment", "slot", "delete"]),
            None => self.site_args(&["functionapp", "delete"]),
        };
        run_az(&args, &self.azure).await?;
        Ok(())
    }
}

/// Kudu client that issues `az rest` calls against the SCM host
struct AzRestKuduClient {
    scm_host_name: String,
    azure: AzureConfig,
}

impl AzRestKuduClient {
    fn url(&self, path: &str) -> String {
        format!("https://{}/{}", self.scm_host_name, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl KuduClient for AzRestKuduClient {
    async fn host_settings(&self) -> AzfnResult<serde_json::Value> {
        let url = self.url("api/functions/config");
        run_az_json(
            &["rest", "--method", "get", "--resource", KUDU_RESOURCE, "--url", url.as_str()],
            &self.azure,
        )
        .await
    }

    async fn read_vfs_file(&self, path: &str) -> AzfnResult<Option<String>> {
        let url = self.url(&format!("api/vfs/{}", path.trim_start_matches('/')));
        let args = ["rest", "--method", "get", "--resource", KUDU_RESOURCE, "--url", url.as_str()];
        match run_az(&args, &self.azure).await {
            Ok(stdout) => Ok(Some(String::from_utf8_lossy(&stdout).into_owned())),
            Err(AzfnError::Remote { reason, .. }) if is_not_found(&reason) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[derive(Deserialize)]
struct ArmList<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
}

#[derive(Deserialize)]
struct ArmFunction {
    name: String,
    #[serde(default)]
    properties: ArmFunctionProperties,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ArmFunctionProperties {
    config: FunctionConfig,
    is_disabled: bool,
}

impl From<ArmFunction> for FunctionEnvelope {
    fn from(f: ArmFunction) -> Self {
        Self {
            name: f.name,
            config: f.properties.config,
            is_disabled: f.properties.is_disabled,
        }
    }
}

/// Run `az` with JSON output and deserialize stdout
async fn run_az_json<T: DeserializeOwned>(args: &[&str], azure: &AzureConfig) -> AzfnResult<T> {
    let stdout = run_az(args, azure).await?;
    serde_json::from_slice(&stdout).map_err(|e| AzfnError::RemoteResponse {
        command: command_line(args),
        reason: format!("Failed to parse response: {}", e),
    })
}

/// Run `az` and return raw stdout
async fn run_az(args: &[&str], azure: &AzureConfig) -> AzfnResult<Vec<u8>> {
    let command = command_line(args);
    debug!("Running {}", command);

    let mut cmd = Command::new("az");
    cmd.args(args).args(["--output", "json"]);

    if let Some(subscription) = &azure.subscription {
        cmd.args(["--subscription", subscription]);
    }

    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    let output = cmd.output().await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AzfnError::AzureCliNotFound
        } else {
            AzfnError::command_failed(command.clone(), e)
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(classify_failure(&command, &stderr));
    }

    Ok(output.stdout)
}

fn classify_failure(command: &str, stderr: &str) -> AzfnError {
    if stderr.contains("az login") || stderr.contains("not logged in") {
        return AzfnError::AzureNotAuthenticated;
    }
    AzfnError::remote(command, stderr.trim())
}

fn is_not_found(reason: &str) -> bool {
    reason.contains("ResourceNotFound")
        || reason.contains("could not be found")
        || reason.contains("Not Found")
        || reason.contains("404")
}

fn command_line(args: &[&str]) -> String {
    format!("az {}", args.join(" "))
}

fn display_name(name: &str, slot: Option<&str>) -> String {
    match slot {
        Some(slot) => format!("{}/{}", name, slot),
        None => name.to_string(),
    }
}
