//! Python virtual environment discovery

use crate::error::{AzfnError, AzfnResult};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Files whose presence marks a directory as a virtual environment
const VENV_MARKERS: [&str; 3] = ["pyvenv.cfg", "bin/activate", "Scripts/activate"];

/// Name of an existing virtual environment directly under `project`.
///
/// When several exist the alphabetically first wins.
pub async fn find_existing_venv(project: &Path) -> AzfnResult<Option<String>> {
    let mut entries = fs::read_dir(project)
        .await
        .map_err(|e| AzfnError::io(format!("reading {}", project.display()), e))?;

    let mut found = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AzfnError::io("reading project entry", e))?
    {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if VENV_MARKERS.iter().any(|m| path.join(m).exists()) {
            if let Some(name) = entry.file_name().to_str() {
                found.push(name.to_string());
            }
        }
    }

    found.sort();
    let venv = found.into_iter().next();
    if let Some(ref name) = venv {
        debug!("Found virtual environment: {}", name);
    }
    Ok(venv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn no_venv() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("src")).unwrap();
        std::fs::write(temp.path().join("pyvenv.cfg"), "").unwrap();

        assert_eq!(find_existing_venv(temp.path()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn detects_by_marker_file() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("env/bin")).unwrap();
        std::fs::write(temp.path().join("env/bin/activate"), "").unwrap();

        assert_eq!(
            find_existing_venv(temp.path()).await.unwrap().as_deref(),
            Some("env")
        );
    }

    #[tokio::test]
    async fn first_name_wins() {
        let temp = TempDir::new().unwrap();
        for name in ["venv", ".venv"] {
            std::fs::create_dir(temp.path().join(name)).unwrap();
            std::fs::write(temp.path().join(name).join("pyvenv.cfg"), "").unwrap();
        }

        assert_eq!(
            find_existing_venv(temp.path()).await.unwrap().as_deref(),
            Some(".venv")
        );
    }
}
