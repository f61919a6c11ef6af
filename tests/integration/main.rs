//! Integration tests for azfn

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// azfn with its config isolated under `temp`
    fn azfn(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("azfn");
        cmd.env("AZFN_CONFIG", temp.path().join("config.toml"));
        cmd
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        azfn(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Azure Functions from the terminal"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        azfn(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("azfn"));
    }

    #[test]
    fn config_path_honors_env() {
        let temp = TempDir::new().unwrap();
        azfn(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show_defaults() {
        let temp = TempDir::new().unwrap();
        azfn(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[general]"))
            .stdout(predicate::str::contains("runtime = \"~4\""));
    }

    #[test]
    fn config_set_then_show() {
        let temp = TempDir::new().unwrap();
        azfn(&temp)
            .args(["config", "set", "azure.resource_group", "my-rg"])
            .assert()
            .success();

        azfn(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("resource_group = \"my-rg\""));
    }

    #[test]
    fn config_set_unknown_key_fails() {
        let temp = TempDir::new().unwrap();
        azfn(&temp)
            .args(["config", "set", "vm.name", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn invalid_config_reports_hint() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.toml"), "[general\n").unwrap();

        azfn(&temp)
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn init_writes_editor_config() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("app");
        std::fs::create_dir_all(project.join(".venv")).unwrap();
        std::fs::write(project.join(".venv").join("pyvenv.cfg"), "").unwrap();
        std::fs::write(project.join(".gitignore"), "local.settings.json").unwrap();

        azfn(&temp)
            .args(["init", "--path"])
            .arg(&project)
            .assert()
            .success();

        let tasks = std::fs::read_to_string(project.join(".vscode").join("tasks.json")).unwrap();
        assert!(tasks.contains("func: host start"));
        assert!(tasks.contains("pipInstall"));

        let settings =
            std::fs::read_to_string(project.join(".vscode").join("settings.json")).unwrap();
        assert!(settings.contains("\"azureFunctions.pythonVenv\": \".venv\""));

        let gitignore = std::fs::read_to_string(project.join(".gitignore")).unwrap();
        assert!(gitignore.contains("__pycache__"));
        assert_eq!(
            std::fs::read_to_string(project.join(".funcignore")).unwrap(),
            ".venv"
        );
    }

    #[test]
    fn init_rejects_unknown_runtime() {
        let temp = TempDir::new().unwrap();
        azfn(&temp)
            .args(["init", "--runtime", "~9", "--path"])
            .arg(temp.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unsupported project runtime"));
    }

    #[test]
    fn site_requires_resource_group() {
        let temp = TempDir::new().unwrap();
        azfn(&temp)
            .args(["site", "show", "my-app"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("resource group"));
    }

    #[test]
    fn site_without_az_cli_fails_gracefully() {
        let temp = TempDir::new().unwrap();
        azfn(&temp)
            .env("PATH", temp.path())
            .args(["site", "show", "my-app", "-g", "my-rg"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Azure CLI not found"));
    }

    #[test]
    fn site_pick_requires_markers() {
        let temp = TempDir::new().unwrap();
        azfn(&temp)
            .args(["site", "pick", "my-app", "-g", "my-rg"])
            .assert()
            .failure();
    }
}
