//! Editor task and debug descriptors for Functions projects
//!
//! These are plain data; `vscode::VsCodeWriter` persists them.

use serde::{Deserialize, Serialize};

/// Label of the task that starts the local Functions host
pub const HOST_START_TASK: &str = "func: host start";

/// Label of the task that installs Python requirements into the venv
pub const PIP_INSTALL_TASK: &str = "pipInstall";

/// Label of the task that installs binding extensions
pub const EXTENSIONS_INSTALL_TASK: &str = "extensionsInstall";

/// Problem matcher contributed for `func host start`
pub const FUNC_WATCH_MATCHER: &str = "$func-watch";

/// Port the Python worker listens on for debugger attach
pub const PYTHON_DEBUG_PORT: u16 = 9091;

/// Setting holding the venv name, referenced from task commands
pub const VENV_SETTING: &str = "azureFunctions.pythonVenv";

/// A command for one operating system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCommand {
    pub command: String,
}

impl PlatformCommand {
    fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

/// One entry of `.vscode/tasks.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDescriptor {
    pub label: String,
    #[serde(rename = "type")]
    pub task_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_matcher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_background: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osx: Option<PlatformCommand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows: Option<PlatformCommand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux: Option<PlatformCommand>,
}

impl TaskDescriptor {
    fn shell(label: &str, command: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            task_type: "shell".to_string(),
            command: command.map(str::to_string),
            problem_matcher: None,
            is_background: None,
            depends_on: None,
            osx: None,
            windows: None,
            linux: None,
        }
    }

    /// Number of per-platform command overrides
    pub fn platform_command_count(&self) -> usize {
        [&self.osx, &self.windows, &self.linux]
            .iter()
            .filter(|c| c.is_some())
            .count()
    }
}

/// Build the task list for a Python project.
///
/// Without a venv there is only the host task. With one, the chain is
/// extensionsInstall -> pipInstall -> host start, and extensionsInstall is
/// present only when `install_extensions` is set.
pub fn python_tasks(has_venv: bool, install_extensions: bool) -> Vec<TaskDescriptor> {
    let mut setup: Vec<TaskDescriptor> = Vec::new();

    if has_venv {
        if install_extensions {
            setup.push(TaskDescriptor::shell(
                EXTENSIONS_INSTALL_TASK,
                Some("func extensions install"),
            ));
        }

        let mut pip = TaskDescriptor::shell(PIP_INSTALL_TASK, None);
        let unix = format!(
            "${{config:{}}}/bin/python -m pip install -r requirements.txt",
            VENV_SETTING
        );
        pip.osx = Some(PlatformCommand::new(unix.clone()));
        pip.linux = Some(PlatformCommand::new(unix));
        pip.windows = Some(PlatformCommand::new(format!(
            "${{config:{}}}\\Scripts\\python -m pip install -r requirements.txt",
            VENV_SETTING
        )));
        pip.depends_on = setup.last().map(|t| t.label.clone());
        setup.push(pip);
    }

    let host = TaskDescriptor {
        label: HOST_START_TASK.to_string(),
        task_type: "func".to_string(),
        command: Some("host start".to_string()),
        problem_matcher: Some(FUNC_WATCH_MATCHER.to_string()),
        is_background: Some(true),
        depends_on: setup.last().map(|t| t.label.clone()),
        osx: None,
        windows: None,
        linux: None,
    };

    let mut tasks = vec![host];
    tasks.extend(setup);
    tasks
}

/// One entry of `.vscode/launch.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugConfiguration {
    pub name: String,
    #[serde(rename = "type")]
    pub debug_type: String,
    pub request: String,
    pub port: u16,
    pub pre_launch_task: String,
}

/// Attach configuration for the Python worker
pub fn python_debug_configuration() -> DebugConfiguration {
    DebugConfiguration {
        name: "Attach to Python Functions".to_string(),
        debug_type: "python".to_string(),
        request: "attach".to_string(),
        port: PYTHON_DEBUG_PORT,
        pre_launch_task: HOST_START_TASK.to_string(),
    }
}

/// Extensions to recommend for Python Functions projects
pub fn python_recommended_extensions() -> Vec<&'static str> {
    vec!["ms-azuretools.vscode-azurefunctions", "ms-python.python"]
}
