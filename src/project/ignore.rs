//! Line merging for `.gitignore` and `.funcignore`
//!
//! Both files are treated as unordered sets of lines. A line counts as
//! present when it occurs anywhere in the file as a substring, so merging
//! is idempotent.

use crate::error::{AzfnError, AzfnResult};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// General ignore file, created by the project template
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Files excluded from deployment packages
pub const FUNCIGNORE_FILE: &str = ".funcignore";

/// Separator placed before each appended line
pub const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Append any of `lines` missing from the file at `path`.
///
/// A missing file is left alone. Returns whether the file was written.
pub async fn merge_ignore_lines(path: &Path, lines: &[&str]) -> AzfnResult<bool> {
    if !path.exists() {
        debug!("{} does not exist, skipping", path.display());
        return Ok(false);
    }

    let contents = read(path).await?;
    match merge_lines(&contents, lines) {
        Some(merged) => {
            write(path, &merged).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Make sure `name` is listed in the deployment ignore file at `path`.
///
/// Unlike [`merge_ignore_lines`], a missing or empty file is created
/// containing exactly `name`.
pub async fn ensure_ignored_for_deploy(path: &Path, name: &str) -> AzfnResult<bool> {
    let contents = if path.exists() {
        read(path).await?
    } else {
        String::new()
    };

    if contents.is_empty() {
        write(path, name).await?;
        return Ok(true);
    }

    match merge_lines(&contents, &[name]) {
        Some(merged) => {
            write(path, &merged).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Pure merge step; `None` when every line is already present
pub fn merge_lines(contents: &str, lines: &[&str]) -> Option<String> {
    let mut merged = contents.to_string();
    let mut changed = false;

    for line in lines {
        if !merged.contains(line) {
            merged.push_str(LINE_ENDING);
            merged.push_str(line);
            changed = true;
        }
    }

    changed.then_some(merged)
}

async fn read(path: &Path) -> AzfnResult<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| AzfnError::io(format!("reading {}", path.display()), e))
}

async fn write(path: &Path, contents: &str) -> AzfnResult<()> {
    fs::write(path, contents)
        .await
        .map_err(|e| AzfnError::io(format!("writing {}", path.display()), e))?;
    debug!("Updated {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn appends_only_missing_lines() {
        let merged = merge_lines("foo\nbar", &["bar", "baz"]).unwrap();
        assert_eq!(merged, format!("foo\nbar{}baz", LINE_ENDING));
    }

    #[test]
    fn substring_counts_as_present() {
        assert!(merge_lines("# env/\nenv/", &["env"]).is_none());
    }

    #[tokio::test]
    async fn merge_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(GITIGNORE_FILE);
        std::fs::write(&path, "foo\nbar").unwrap();

        assert!(merge_ignore_lines(&path, &["bar", "baz"]).await.unwrap());
        let first = std::fs::read_to_string(&path).unwrap();

        assert!(!merge_ignore_lines(&path, &["bar", "baz"]).await.unwrap());
        let second = std::fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert!(first.ends_with("baz"));
    }

    #[tokio::test]
    async fn missing_gitignore_is_left_alone() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(GITIGNORE_FILE);

        assert!(!merge_ignore_lines(&path, &["env"]).await.unwrap());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn funcignore_created_with_name() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(FUNCIGNORE_FILE);

        assert!(ensure_ignored_for_deploy(&path, "env").await.unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "env");

        assert!(!ensure_ignored_for_deploy(&path, "env").await.unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "env");
    }

    #[tokio::test]
    async fn funcignore_empty_file_replaced() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(FUNCIGNORE_FILE);
        std::fs::write(&path, "").unwrap();

        ensure_ignored_for_deploy(&path, ".venv").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), ".venv");
    }

    #[tokio::test]
    async fn funcignore_existing_content_appended() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(FUNCIGNORE_FILE);
        std::fs::write(&path, ".git*\n.vscode").unwrap();

        ensure_ignored_for_deploy(&path, "env").await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            format!(".git*\n.vscode{}env", LINE_ENDING)
        );
    }
}
