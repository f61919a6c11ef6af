//! Tree node for one deployed site or slot
//!
//! Derived metadata (runtime version, host configuration, plan tier) is
//! fetched on first use and kept until `refresh()`. Every cached accessor
//! is best-effort: a failed remote call yields a fallback value and a
//! warning, never an error, because these run while the tree repaints.

use crate::error::AzfnResult;
use crate::remote::SiteClient;
use crate::remote::models::{Site, SiteState};
use crate::site::children::{
    AppSettingsNode, ChildKind, ChildNode, DeploymentsNode, FolderNode, FunctionsNode, ProxiesNode,
};
use crate::site::events::{EventSink, TreeEvent};
use crate::site::host_json::{parse_host_json, HostConfig};
use crate::site::markers::{self, Marker};
use crate::site::version::{FuncVersion, EXTENSION_VERSION_SETTING};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Settings that make the site's wwwroot read-only when set
pub const RUN_FROM_PACKAGE_SETTINGS: [&str; 2] = ["WEBSITE_RUN_FROM_PACKAGE", "WEBSITE_RUN_FROM_ZIP"];

const SITE_FILES_ROOT: &str = "site/wwwroot/";
const LOG_FILES_ROOT: &str = "LogFiles/";

/// Metadata derived from remote calls. Replaced wholesale on refresh.
#[derive(Debug, Default)]
struct MetadataCache {
    version: Option<FuncVersion>,
    host_config: Option<HostConfig>,
    is_consumption_plan: Option<bool>,
}

/// A deployed Function App or slot in the tree
pub struct SiteNode {
    site: Site,
    client: Arc<dyn SiteClient>,
    events: EventSink,
    cache: MetadataCache,

    app_settings: Arc<AppSettingsNode>,
    site_files: Arc<FolderNode>,
    log_files: Arc<FolderNode>,
    functions: Option<Arc<FunctionsNode>>,
    proxies: Option<Arc<ProxiesNode>>,
    deployments: Option<Arc<DeploymentsNode>>,
}

impl SiteNode {
    pub fn new(site: Site, client: Arc<dyn SiteClient>, events: EventSink) -> Self {
        Self {
            app_settings: Arc::new(AppSettingsNode::new(Arc::clone(&client))),
            site_files: Arc::new(FolderNode::new(Arc::clone(&client), SITE_FILES_ROOT)),
            log_files: Arc::new(FolderNode::new(Arc::clone(&client), LOG_FILES_ROOT)),
            functions: None,
            proxies: None,
            deployments: None,
            cache: MetadataCache::default(),
            site,
            client,
            events,
        }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn label(&self) -> String {
        self.site.full_name()
    }

    /// State shown next to the label; nothing while running
    pub fn description(&self) -> Option<String> {
        match self.site.state {
            SiteState::Running => None,
            state => Some(state.to_string()),
        }
    }

    /// Drop cached metadata and re-read the run state.
    ///
    /// A failed state fetch leaves the node in `Unknown` rather than erroring.
    pub async fn refresh(&mut self) {
        self.cache = MetadataCache::default();

        let state = match self.client.get_state().await {
            Ok(state) => state,
            Err(e) => {
                warn!("Failed to get state of {}: {}", self.label(), e);
                SiteState::Unknown
            }
        };

        if state != self.site.state {
            debug!("{} state {} -> {}", self.label(), self.site.state, state);
            self.site.state = state;
            self.events.notify(TreeEvent::StateChanged {
                site: self.label(),
                state,
            });
        }
    }

    /// Functions host version pinned by the site's app settings
    pub async fn version(&mut self) -> FuncVersion {
        if let Some(version) = self.cache.version {
            return version;
        }

        let version = match self.client.list_application_settings().await {
            Ok(settings) => settings
                .properties
                .as_ref()
                .and_then(|props| props.get(EXTENSION_VERSION_SETTING))
                .and_then(|raw| match raw.parse::<FuncVersion>() {
                    Ok(version) => Some(version),
                    Err(e) => {
                        warn!("{}: {}", self.site.full_name(), e);
                        None
                    }
                })
                .unwrap_or(FuncVersion::DEFAULT),
            Err(e) => {
                warn!("Failed to read app settings of {}: {}", self.label(), e);
                FuncVersion::DEFAULT
            }
        };

        debug!("{} runs Functions {}", self.label(), version);
        self.cache.version = Some(version);
        version
    }

    /// Parsed host.json of the running app, with defaults applied
    pub async fn host_configuration(&mut self) -> HostConfig {
        if let Some(config) = &self.cache.host_config {
            return config.clone();
        }

        let data = self.fetch_host_settings().await;
        let version = self.version().await;
        let config = parse_host_json(data.as_ref(), version);

        self.cache.host_config = Some(config.clone());
        config
    }

    async fn fetch_host_settings(&self) -> Option<serde_json::Value> {
        let result = match self.client.kudu_client().await {
            Ok(kudu) => kudu.host_settings().await,
            Err(e) => Err(e),
        };
        match result {
            Ok(data) => Some(data),
            Err(e) => {
                warn!("Failed to read host settings of {}: {}", self.label(), e);
                None
            }
        }
    }

    /// Current app settings. Always fetched; failures propagate.
    pub async fn application_settings(&self) -> AzfnResult<HashMap<String, String>> {
        let settings = self.client.list_application_settings().await?;
        Ok(settings.properties.unwrap_or_default())
    }

    /// Whether the site runs on a consumption (dynamic) plan.
    ///
    /// No plan, no SKU tier, or a failed lookup all count as consumption.
    pub async fn is_consumption_plan(&mut self) -> bool {
        if let Some(is_consumption) = self.cache.is_consumption_plan {
            return is_consumption;
        }

        let is_consumption = match self.client.get_app_service_plan().await {
            Ok(plan) => plan
                .and_then(|p| p.sku)
                .and_then(|sku| sku.tier)
                .is_none_or(|tier| tier.eq_ignore_ascii_case("dynamic")),
            Err(e) => {
                warn!("Failed to get plan of {}: {}", self.label(), e);
                true
            }
        };

        self.cache.is_consumption_plan = Some(is_consumption);
        is_consumption
    }

    /// All six children in display order.
    ///
    /// Deployments are rebuilt from fresh site config on every call;
    /// functions and proxies are created once and reused.
    pub async fn load_children(&mut self) -> AzfnResult<Vec<ChildNode>> {
        let config = self.client.get_site_config().await?;
        let source = self.client.get_source_control().await?;
        let deployments = Arc::new(DeploymentsNode::new(config, source));
        self.deployments = Some(Arc::clone(&deployments));

        let functions = self.functions_node();
        let proxies = self.proxies_node();

        Ok(ChildKind::ORDER
            .iter()
            .map(|kind| match kind {
                ChildKind::Functions => ChildNode::Functions(Arc::clone(&functions)),
                ChildKind::AppSettings => ChildNode::AppSettings(Arc::clone(&self.app_settings)),
                ChildKind::SiteFiles => ChildNode::SiteFiles(Arc::clone(&self.site_files)),
                ChildKind::LogFiles => ChildNode::LogFiles(Arc::clone(&self.log_files)),
                ChildKind::Deployments => ChildNode::Deployments(Arc::clone(&deployments)),
                ChildKind::Proxies => ChildNode::Proxies(Arc::clone(&proxies)),
            })
            .collect())
    }

    fn functions_node(&mut self) -> Arc<FunctionsNode> {
        if let Some(node) = &self.functions {
            return Arc::clone(node);
        }
        let node = Arc::new(FunctionsNode::new(Arc::clone(&self.client)));
        self.functions = Some(Arc::clone(&node));
        self.events.notify(TreeEvent::ChildCreated {
            site: self.label(),
            kind: ChildKind::Functions,
        });
        node
    }

    fn proxies_node(&mut self) -> Arc<ProxiesNode> {
        if let Some(node) = &self.proxies {
            return Arc::clone(node);
        }
        let node = Arc::new(ProxiesNode::new(Arc::clone(&self.client)));
        self.proxies = Some(Arc::clone(&node));
        self.events.notify(TreeEvent::ChildCreated {
            site: self.label(),
            kind: ChildKind::Proxies,
        });
        node
    }

    /// Find the child responsible for a resource described by `markers`.
    ///
    /// Functions and proxies are created on demand. Deployments only exist
    /// after `load_children()`; before that a deployment match yields `None`.
    pub fn pick_child(&mut self, markers: &[Marker]) -> Option<ChildNode> {
        match markers::resolve(markers)? {
            ChildKind::AppSettings => Some(ChildNode::AppSettings(Arc::clone(&self.app_settings))),
            ChildKind::Proxies => Some(ChildNode::Proxies(self.proxies_node())),
            ChildKind::Deployments => self.deployments.clone().map(ChildNode::Deployments),
            ChildKind::Functions => Some(ChildNode::Functions(self.functions_node())),
            ChildKind::SiteFiles => Some(ChildNode::SiteFiles(Arc::clone(&self.site_files))),
            ChildKind::LogFiles => Some(ChildNode::LogFiles(Arc::clone(&self.log_files))),
        }
    }

    /// Whether the app is deployed as a mounted package
    pub async fn is_read_only(&self) -> AzfnResult<bool> {
        let settings = self.application_settings().await?;
        Ok(settings_are_read_only(&settings))
    }

    /// Delete the site remotely
    pub async fn delete(&self) -> AzfnResult<()> {
        self.client.delete_site().await?;
        info!("Deleted {}", self.label());
        self.events.notify(TreeEvent::SiteDeleted { site: self.label() });
        Ok(())
    }
}

/// A run-from-package setting counts when set to anything but empty, `0`
/// or `false`. URLs and `1` both enable it.
pub fn settings_are_read_only(settings: &HashMap<String, String>) -> bool {
    RUN_FROM_PACKAGE_SETTINGS.iter().any(|key| {
        settings.get(*key).is_some_and(|value| {
            let value = value.trim();
            !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
        })
    })
}
