//! Persistence of editor configuration under `.vscode/`
//!
//! Each file is merged with what is already on disk: settings by key, tasks
//! by label, launch configurations by name, and recommended extensions as a
//! set. Entries the user added are kept.

use crate::error::{AzfnError, AzfnResult};
use crate::project::init::Setting;
use crate::project::tasks::{DebugConfiguration, TaskDescriptor};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

const VSCODE_DIR: &str = ".vscode";
const SETTINGS_FILE: &str = "settings.json";
const TASKS_FILE: &str = "tasks.json";
const LAUNCH_FILE: &str = "launch.json";
const EXTENSIONS_FILE: &str = "extensions.json";

const TASKS_VERSION: &str = "2.0.0";
const LAUNCH_VERSION: &str = "0.2.0";

/// Writes editor configuration for a project
pub struct VsCodeWriter {
    dir: PathBuf,
}

impl VsCodeWriter {
    pub fn new(project_path: &Path) -> Self {
        Self {
            dir: project_path.join(VSCODE_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn write_settings(&self, settings: &[Setting]) -> AzfnResult<()> {
        let path = self.dir.join(SETTINGS_FILE);
        let mut root = self.read_object(&path, json!({})).await?;
        let map = as_object(&mut root, &path)?;
        for setting in settings {
            map.insert(setting.key.clone(), setting.value.clone());
        }
        self.write_json(&path, &root).await
    }

    pub async fn write_tasks(&self, tasks: &[TaskDescriptor]) -> AzfnResult<()> {
        let path = self.dir.join(TASKS_FILE);
        let mut root = self
            .read_object(&path, json!({ "version": TASKS_VERSION, "tasks": [] }))
            .await?;
        merge_entries(&mut root, &path, "tasks", "label", tasks)?;
        self.write_json(&path, &root).await
    }

    pub async fn write_launch(&self, configurations: &[DebugConfiguration]) -> AzfnResult<()> {
        let path = self.dir.join(LAUNCH_FILE);
        let mut root = self
            .read_object(
                &path,
                json!({ "version": LAUNCH_VERSION, "configurations": [] }),
            )
            .await?;
        merge_entries(&mut root, &path, "configurations", "name", configurations)?;
        self.write_json(&path, &root).await
    }

    pub async fn write_extensions(&self, recommendations: &[&str]) -> AzfnResult<()> {
        let path = self.dir.join(EXTENSIONS_FILE);
        let mut root = self
            .read_object(&path, json!({ "recommendations": [] }))
            .await?;
        let list = entry_array(&mut root, &path, "recommendations")?;
        for id in recommendations {
            if !list.iter().any(|v| v.as_str() == Some(*id)) {
                list.push(Value::from(*id));
            }
        }
        self.write_json(&path, &root).await
    }

    async fn read_object(&self, path: &Path, empty: Value) -> AzfnResult<Value> {
        if !path.exists() {
            return Ok(empty);
        }
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| AzfnError::io(format!("reading {}", path.display()), e))?;
        if content.trim().is_empty() {
            return Ok(empty);
        }
        serde_json::from_str(&content).map_err(|e| AzfnError::EditorConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    async fn write_json(&self, path: &Path, value: &Value) -> AzfnResult<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AzfnError::io(format!("creating {}", self.dir.display()), e))?;
        let content = serde_json::to_string_pretty(value)?;
        fs::write(path, content)
            .await
            .map_err(|e| AzfnError::io(format!("writing {}", path.display()), e))?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

fn invalid(path: &Path, reason: impl Into<String>) -> AzfnError {
    AzfnError::EditorConfigInvalid {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

fn as_object<'a>(root: &'a mut Value, path: &Path) -> AzfnResult<&'a mut Map<String, Value>> {
    root.as_object_mut()
        .ok_or_else(|| invalid(path, "expected a JSON object"))
}

fn entry_array<'a>(root: &'a mut Value, path: &Path, field: &str) -> AzfnResult<&'a mut Vec<Value>> {
    let map = as_object(root, path)?;
    map.entry(field.to_string())
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| invalid(path, format!("\"{}\" must be an array", field)))
}

/// Replace entries whose `key` field matches, append the rest
fn merge_entries<T: Serialize>(
    root: &mut Value,
    path: &Path,
    field: &str,
    key: &str,
    items: &[T],
) -> AzfnResult<()> {
    let list = entry_array(root, path, field)?;
    for item in items {
        let value = serde_json::to_value(item)?;
        let id = value.get(key).cloned();
        match list.iter_mut().find(|e| id.is_some() && e.get(key) == id.as_ref()) {
            Some(existing) => {
                debug!("Replacing {} entry {:?}", field, id);
                *existing = value;
            }
            None => list.push(value),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::tasks::{python_debug_configuration, python_tasks, HOST_START_TASK};
    use tempfile::TempDir;

    fn read(temp: &TempDir, file: &str) -> Value {
        let content = std::fs::read_to_string(temp.path().join(VSCODE_DIR).join(file)).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[tokio::test]
    async fn creates_files_from_scratch() {
        let temp = TempDir::new().unwrap();
        let writer = VsCodeWriter::new(temp.path());

        writer.write_tasks(&python_tasks(true, false)).await.unwrap();
        writer
            .write_launch(&[python_debug_configuration()])
            .await
            .unwrap();

        let tasks = read(&temp, TASKS_FILE);
        assert_eq!(tasks["version"], TASKS_VERSION);
        assert_eq!(tasks["tasks"].as_array().unwrap().len(), 2);

        let launch = read(&temp, LAUNCH_FILE);
        assert_eq!(launch["version"], LAUNCH_VERSION);
        assert_eq!(launch["configurations"][0]["port"], 9091);
    }

    #[tokio::test]
    async fn settings_keep_user_keys() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(VSCODE_DIR)).unwrap();
        std::fs::write(
            temp.path().join(VSCODE_DIR).join(SETTINGS_FILE),
            r#"{"editor.tabSize": 2, "azureFunctions.projectLanguage": "C#"}"#,
        )
        .unwrap();

        let writer = VsCodeWriter::new(temp.path());
        writer
            .write_settings(&[Setting::new("projectLanguage", "Python")])
            .await
            .unwrap();

        let settings = read(&temp, SETTINGS_FILE);
        assert_eq!(settings["editor.tabSize"], 2);
        assert_eq!(settings["azureFunctions.projectLanguage"], "Python");
    }

    #[tokio::test]
    async fn tasks_replaced_by_label() {
        let temp = TempDir::new().unwrap();
        let writer = VsCodeWriter::new(temp.path());

        writer.write_tasks(&python_tasks(false, false)).await.unwrap();
        writer.write_tasks(&python_tasks(true, false)).await.unwrap();

        let tasks = read(&temp, TASKS_FILE);
        let list = tasks["tasks"].as_array().unwrap();
        assert_eq!(list.len(), 2);
        let host: Vec<_> = list
            .iter()
            .filter(|t| t["label"] == HOST_START_TASK)
            .collect();
        assert_eq!(host.len(), 1);
        assert_eq!(host[0]["dependsOn"], "pipInstall");
    }

    #[tokio::test]
    async fn extensions_are_a_set() {
        let temp = TempDir::new().unwrap();
        let writer = VsCodeWriter::new(temp.path());

        writer.write_extensions(&["a.b", "c.d"]).await.unwrap();
        writer.write_extensions(&["c.d", "e.f"]).await.unwrap();

        let extensions = read(&temp, EXTENSIONS_FILE);
        assert_eq!(extensions["recommendations"], json!(["a.b", "c.d", "e.f"]));
    }

    #[tokio::test]
    async fn malformed_file_is_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(VSCODE_DIR)).unwrap();
        std::fs::write(temp.path().join(VSCODE_DIR).join(TASKS_FILE), "{ not json").unwrap();

        let writer = VsCodeWriter::new(temp.path());
        let err = writer.write_tasks(&python_tasks(false, false)).await.unwrap_err();
        assert!(matches!(err, AzfnError::EditorConfigInvalid { .. }));
    }
}
