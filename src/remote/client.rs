//! Remote management client abstraction
//!
//! A `SiteClient` is bound to a single site or slot. The production
//! implementation drives the Azure CLI; tests substitute in-memory fakes.

use crate::error::AzfnResult;
use crate::remote::models::{
    AppServicePlan, FunctionEnvelope, SiteConfig, SiteState, SourceControl, StringDictionary,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Management operations available for one site
#[async_trait]
pub trait SiteClient: Send + Sync {
    /// Current run state of the site
    async fn get_state(&self) -> AzfnResult<SiteState>;

    /// Application settings as a raw dictionary
    async fn list_application_settings(&self) -> AzfnResult<StringDictionary>;

    /// Site configuration (scm type, runtime stack)
    async fn get_site_config(&self) -> AzfnResult<SiteConfig>;

    /// Source control linkage
    async fn get_source_control(&self) -> AzfnResult<SourceControl>;

    /// Hosting plan, `None` when the site has no plan
    async fn get_app_service_plan(&self) -> AzfnResult<Option<AppServicePlan>>;

    /// Client for the site's Kudu (SCM) endpoint
    async fn kudu_client(&self) -> AzfnResult<Arc<dyn KuduClient>>;

    /// Functions deployed to the site
    async fn list_functions(&self) -> AzfnResult<Vec<FunctionEnvelope>>;

    /// Delete the site or slot
    async fn delete_site(&self) -> AzfnResult<()>;
}

/// Operations against the Kudu (SCM) endpoint of a site
#[async_trait]
pub trait KuduClient: Send + Sync {
    /// Raw host configuration (`host.json`) as served by the runtime
    async fn host_settings(&self) -> AzfnResult<serde_json::Value>;

    /// Read a file from the site's virtual file system, `None` if absent
    async fn read_vfs_file(&self, path: &str) -> AzfnResult<Option<String>>;
}
