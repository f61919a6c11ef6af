//! Project initialization steps
//!
//! `BaseInitStep` records the language and runtime settings shared by every
//! project. `PythonInitStep` builds on it: it detects an existing virtual
//! environment, keeps it out of source control and deployment packages,
//! and produces the task and debug descriptors for the editor.

use crate::error::{AzfnError, AzfnResult};
use crate::project::ignore::{
    ensure_ignored_for_deploy, merge_ignore_lines, FUNCIGNORE_FILE, GITIGNORE_FILE,
};
use crate::project::tasks::{
    python_debug_configuration, python_recommended_extensions, python_tasks, DebugConfiguration,
    TaskDescriptor,
};
use crate::project::venv::find_existing_venv;
use crate::site::{parse_host_json, FuncVersion};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Prefix for every setting written by the init steps
pub const SETTINGS_PREFIX: &str = "azureFunctions";

/// Paths Python projects never commit
const PYTHON_GITIGNORE_LINES: [&str; 2] = [".python_packages", "__pycache__"];

/// Inputs for initializing a project
#[derive(Debug, Clone)]
pub struct InitContext {
    pub project_path: PathBuf,
    pub runtime: FuncVersion,
    /// Add the extension-install task regardless of host.json
    pub force_extensions_install: bool,
}

/// An editor setting, keyed under [`SETTINGS_PREFIX`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Setting {
    pub key: String,
    pub value: Value,
}

impl Setting {
    pub fn new(name: &str, value: impl Into<Value>) -> Self {
        Self {
            key: format!("{}.{}", SETTINGS_PREFIX, name),
            value: value.into(),
        }
    }
}

/// Language-independent part of project initialization
#[derive(Debug, Default)]
pub struct BaseInitStep {
    pub settings: Vec<Setting>,
    pub requires_extension_install: bool,
}

impl BaseInitStep {
    pub async fn execute(&mut self, ctx: &InitContext, language: &str) -> AzfnResult<()> {
        self.settings.push(Setting::new("projectLanguage", language));
        self.settings
            .push(Setting::new("projectRuntime", ctx.runtime.as_setting()));

        let host = read_host_json(&ctx.project_path).await?;
        let parsed = parse_host_json(host.as_ref(), ctx.runtime);
        self.requires_extension_install = ctx.force_extensions_install
            || (ctx.runtime.uses_extensions_section() && !parsed.has_extension_bundle);

        debug!(
            "Base init for {} ({}), extension install required: {}",
            language, ctx.runtime, self.requires_extension_install
        );
        Ok(())
    }
}

async fn read_host_json(project: &Path) -> AzfnResult<Option<Value>> {
    let path = project.join("host.json");
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)
        .await
        .map_err(|e| AzfnError::io(format!("reading {}", path.display()), e))?;
    match serde_json::from_str(&content) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Ignoring malformed {}: {}", path.display(), e);
            Ok(None)
        }
    }
}

/// Initialization for Python Functions projects
#[derive(Debug, Default)]
pub struct PythonInitStep {
    base: BaseInitStep,
    venv_name: Option<String>,
}

impl PythonInitStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn execute(&mut self, ctx: &InitContext) -> AzfnResult<()> {
        self.base.execute(ctx, "Python").await?;
        self.base
            .settings
            .push(Setting::new("scmDoBuildDuringDeployment", true));

        self.venv_name = find_existing_venv(&ctx.project_path).await?;

        let mut gitignore_lines: Vec<&str> = PYTHON_GITIGNORE_LINES.to_vec();
        if let Some(venv) = &self.venv_name {
            self.base.settings.push(Setting::new("pythonVenv", venv.as_str()));
            ensure_ignored_for_deploy(&ctx.project_path.join(FUNCIGNORE_FILE), venv).await?;
            gitignore_lines.push(venv.as_str());
        }

        merge_ignore_lines(&ctx.project_path.join(GITIGNORE_FILE), &gitignore_lines).await?;

        info!(
            "Initialized Python project at {}",
            ctx.project_path.display()
        );
        Ok(())
    }

    pub fn settings(&self) -> &[Setting] {
        &self.base.settings
    }

    pub fn venv_name(&self) -> Option<&str> {
        self.venv_name.as_deref()
    }

    pub fn tasks(&self) -> Vec<TaskDescriptor> {
        python_tasks(
            self.venv_name.is_some(),
            self.base.requires_extension_install,
        )
    }

    pub fn debug_configuration(&self) -> DebugConfiguration {
        python_debug_configuration()
    }

    pub fn recommended_extensions(&self) -> Vec<&'static str> {
        python_recommended_extensions()
    }
}
