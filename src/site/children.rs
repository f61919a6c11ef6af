//! Child nodes shown beneath a site

use crate::error::{AzfnError, AzfnResult};
use crate::remote::SiteClient;
use crate::remote::models::{FunctionEnvelope, SiteConfig, SourceControl};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Role of a child node within the site tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildKind {
    Functions,
    AppSettings,
    SiteFiles,
    LogFiles,
    Deployments,
    Proxies,
}

impl ChildKind {
    /// Fixed display order beneath a site
    pub const ORDER: [ChildKind; 6] = [
        ChildKind::Functions,
        ChildKind::AppSettings,
        ChildKind::SiteFiles,
        ChildKind::LogFiles,
        ChildKind::Deployments,
        ChildKind::Proxies,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChildKind::Functions => "Functions",
            ChildKind::AppSettings => "Application Settings",
            ChildKind::SiteFiles => "Files",
            ChildKind::LogFiles => "Logs",
            ChildKind::Deployments => "Deployments",
            ChildKind::Proxies => "Proxies",
        }
    }
}

impl fmt::Display for ChildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A child of a site node. Cloning shares the underlying node.
#[derive(Clone)]
pub enum ChildNode {
    Functions(Arc<FunctionsNode>),
    AppSettings(Arc<AppSettingsNode>),
    SiteFiles(Arc<FolderNode>),
    LogFiles(Arc<FolderNode>),
    Deployments(Arc<DeploymentsNode>),
    Proxies(Arc<ProxiesNode>),
}

impl ChildNode {
    pub fn kind(&self) -> ChildKind {
        match self {
            ChildNode::Functions(_) => ChildKind::Functions,
            ChildNode::AppSettings(_) => ChildKind::AppSettings,
            ChildNode::SiteFiles(_) => ChildKind::SiteFiles,
            ChildNode::LogFiles(_) => ChildKind::LogFiles,
            ChildNode::Deployments(_) => ChildKind::Deployments,
            ChildNode::Proxies(_) => ChildKind::Proxies,
        }
    }

    /// One-line description shown next to the label
    pub fn description(&self) -> Option<String> {
        match self {
            ChildNode::Deployments(node) => Some(node.description()),
            ChildNode::SiteFiles(node) | ChildNode::LogFiles(node) => Some(node.root.clone()),
            _ => None,
        }
    }

    /// Whether two handles refer to the same node instance
    pub fn same_node(&self, other: &ChildNode) -> bool {
        match (self, other) {
            (ChildNode::Functions(a), ChildNode::Functions(b)) => Arc::ptr_eq(a, b),
            (ChildNode::AppSettings(a), ChildNode::AppSettings(b)) => Arc::ptr_eq(a, b),
            (ChildNode::SiteFiles(a), ChildNode::SiteFiles(b))
            | (ChildNode::LogFiles(a), ChildNode::LogFiles(b)) => Arc::ptr_eq(a, b),
            (ChildNode::Deployments(a), ChildNode::Deployments(b)) => Arc::ptr_eq(a, b),
            (ChildNode::Proxies(a), ChildNode::Proxies(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for ChildNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ChildNode").field(&self.kind()).finish()
    }
}

/// Deployed functions of a site
pub struct FunctionsNode {
    client: Arc<dyn SiteClient>,
}

/// One deployed function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionNode {
    pub name: String,
    /// Trigger binding type, e.g. `httpTrigger`
    pub trigger: Option<String>,
    pub auth_level: Option<String>,
    pub is_disabled: bool,
}

impl FunctionNode {
    pub fn is_http(&self) -> bool {
        self.trigger
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("httpTrigger"))
    }

    /// Invoke URL for HTTP functions
    pub fn trigger_url(&self, host_name: &str, route_prefix: &str) -> Option<String> {
        if !self.is_http() {
            return None;
        }
        let prefix = route_prefix.trim_matches('/');
        Some(if prefix.is_empty() {
            format!("https://{}/{}", host_name, self.name)
        } else {
            format!("https://{}/{}/{}", host_name, prefix, self.name)
        })
    }
}

impl From<FunctionEnvelope> for FunctionNode {
    fn from(envelope: FunctionEnvelope) -> Self {
        let trigger = envelope
            .config
            .bindings
            .iter()
            .find(|b| b.binding_type.ends_with("Trigger"))
            .or_else(|| envelope.config.bindings.first());
        Self {
            name: envelope.short_name().to_string(),
            trigger: trigger.map(|b| b.binding_type.clone()),
            auth_level: trigger.and_then(|b| b.auth_level.clone()),
            is_disabled: envelope.is_disabled,
        }
    }
}

impl FunctionsNode {
    pub(crate) fn new(client: Arc<dyn SiteClient>) -> Self {
        Self { client }
    }

    /// List functions, sorted by name
    pub async fn load(&self) -> AzfnResult<Vec<FunctionNode>> {
        let mut functions: Vec<FunctionNode> = self
            .client
            .list_functions()
            .await?
            .into_iter()
            .map(FunctionNode::from)
            .collect();
        functions.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Loaded {} functions", functions.len());
        Ok(functions)
    }
}

/// Application settings of a site
pub struct AppSettingsNode {
    client: Arc<dyn SiteClient>,
}

/// One application setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettingNode {
    pub name: String,
    pub value: String,
}

impl AppSettingNode {
    /// `NAME=value`, with the value masked unless asked for
    pub fn display(&self, show_value: bool) -> String {
        if show_value {
            format!("{}={}", self.name, self.value)
        } else {
            format!("{}=********", self.name)
        }
    }
}

impl AppSettingsNode {
    pub(crate) fn new(client: Arc<dyn SiteClient>) -> Self {
        Self { client }
    }

    /// Fetch current settings, sorted by name
    pub async fn load(&self) -> AzfnResult<Vec<AppSettingNode>> {
        let settings = self.client.list_application_settings().await?;
        let sorted: BTreeMap<String, String> =
            settings.properties.unwrap_or_default().into_iter().collect();
        Ok(sorted
            .into_iter()
            .map(|(name, value)| AppSettingNode { name, value })
            .collect())
    }
}

/// A browsable folder on the site's file system (site files or logs)
pub struct FolderNode {
    client: Arc<dyn SiteClient>,
    /// VFS path of the folder, always with a trailing slash
    pub root: String,
}

/// Entry of a Kudu VFS directory listing
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VfsEntry {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    pub mime: Option<String>,
    pub mtime: Option<DateTime<Utc>>,
}

impl VfsEntry {
    pub fn is_dir(&self) -> bool {
        self.mime.as_deref() == Some("inode/directory")
    }
}

impl FolderNode {
    pub(crate) fn new(client: Arc<dyn SiteClient>, root: &str) -> Self {
        let root = if root.ends_with('/') {
            root.to_string()
        } else {
            format!("{}/", root)
        };
        Self { client, root }
    }

    /// List the folder; directories first, then files, each by name
    pub async fn list(&self) -> AzfnResult<Vec<VfsEntry>> {
        let kudu = self.client.kudu_client().await?;
        let Some(body) = kudu.read_vfs_file(&self.root).await? else {
            return Ok(Vec::new());
        };
        let mut entries: Vec<VfsEntry> =
            serde_json::from_str(&body).map_err(|e| AzfnError::RemoteResponse {
                command: format!("list {}", self.root),
                reason: e.to_string(),
            })?;
        entries.sort_by(|a, b| b.is_dir().cmp(&a.is_dir()).then_with(|| a.name.cmp(&b.name)));
        Ok(entries)
    }
}

/// Deployment source linkage, rebuilt on every load
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentsNode {
    pub scm_type: Option<String>,
    pub source: SourceControl,
}

impl DeploymentsNode {
    pub(crate) fn new(config: SiteConfig, source: SourceControl) -> Self {
        Self {
            scm_type: config.scm_type,
            source,
        }
    }

    /// Whether deployments come from a connected repository
    pub fn is_connected_to_repo(&self) -> bool {
        self.scm_type
            .as_deref()
            .is_some_and(|t| !t.is_empty() && !t.eq_ignore_ascii_case("none"))
    }

    pub fn description(&self) -> String {
        if !self.is_connected_to_repo() {
            return "Not connected".to_string();
        }
        let scm = self.scm_type.as_deref().unwrap_or_default();
        match (&self.source.repo_url, &self.source.branch) {
            (Some(url), Some(branch)) => format!("{} ({}@{})", scm, url, branch),
            (Some(url), None) => format!("{} ({})", scm, url),
            _ => scm.to_string(),
        }
    }
}

/// Function proxies declared in `proxies.json`
pub struct ProxiesNode {
    client: Arc<dyn SiteClient>,
}

/// One proxy definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyNode {
    pub name: String,
    pub route: Option<String>,
    pub backend_uri: Option<String>,
}

pub(crate) const PROXIES_PATH: &str = "site/wwwroot/proxies.json";

#[derive(Deserialize)]
struct ProxiesFile {
    #[serde(default)]
    proxies: BTreeMap<String, ProxyDefinition>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProxyDefinition {
    match_condition: Option<MatchCondition>,
    backend_uri: Option<String>,
}

#[derive(Deserialize)]
struct MatchCondition {
    route: Option<String>,
}

impl ProxiesNode {
    pub(crate) fn new(client: Arc<dyn SiteClient>) -> Self {
        Self { client }
    }

    /// Read proxies from the site; a missing file means no proxies
    pub async fn load(&self) -> AzfnResult<Vec<ProxyNode>> {
        let kudu = self.client.kudu_client().await?;
        match kudu.read_vfs_file(PROXIES_PATH).await? {
            Some(body) => parse_proxies(&body),
            None => {
                debug!("No proxies.json on site");
                Ok(Vec::new())
            }
        }
    }
}

/// Parse a `proxies.json` document
pub fn parse_proxies(body: &str) -> AzfnResult<Vec<ProxyNode>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let file: ProxiesFile =
        serde_json::from_str(body).map_err(|e| AzfnError::ProxiesInvalid(e.to_string()))?;
    Ok(file
        .proxies
        .into_iter()
        .map(|(name, def)| ProxyNode {
            name,
            route: def.match_condition.and_then(|m| m.route),
            backend_uri: def.backend_uri,
        })
        .collect())
}
