//! Local Functions project initialization
//!
//! Runs the language init step against a project directory and persists the
//! resulting editor configuration.

mod ignore;
mod init;
mod tasks;
mod venv;
mod vscode;

pub use ignore::{
    ensure_ignored_for_deploy, merge_ignore_lines, merge_lines, FUNCIGNORE_FILE, GITIGNORE_FILE,
};
pub use init::{BaseInitStep, InitContext, PythonInitStep, Setting, SETTINGS_PREFIX};
pub use tasks::{
    python_debug_configuration, python_recommended_extensions, python_tasks, DebugConfiguration,
    PlatformCommand, TaskDescriptor, EXTENSIONS_INSTALL_TASK, HOST_START_TASK, PIP_INSTALL_TASK,
};
pub use venv::find_existing_venv;
pub use vscode::VsCodeWriter;
