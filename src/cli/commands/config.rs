//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{AzfnError, AzfnResult};
use crate::site::FuncVersion;
use crate::ui::{self, UiContext};

/// Keys accepted by `config set`
const VALID_KEYS: [&str; 5] = [
    "general.log_format",
    "azure.subscription",
    "azure.resource_group",
    "project.runtime",
    "project.force_extensions_install",
];

/// Execute the config command
pub async fn execute(args: ConfigArgs, manager: &ConfigManager, config: &Config) -> AzfnResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, config, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> AzfnResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(manager: &ConfigManager, force: bool) -> AzfnResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    ui::step_ok_detail(&ctx, "Configuration initialized", &path.display().to_string());
    Ok(())
}

async fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> AzfnResult<()> {
    let ctx = UiContext::detect();
    let mut config = config.clone();
    apply(&mut config, key, value)?;

    manager.save(&config).await?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));
    Ok(())
}

/// Apply one dot-separated key to `config`
fn apply(config: &mut Config, key: &str, value: &str) -> AzfnResult<()> {
    let optional = |v: &str| (!v.is_empty()).then(|| v.to_string());

    match key {
        "general.log_format" => match value {
            "text" | "json" => config.general.log_format = value.to_string(),
            _ => {
                return Err(AzfnError::User(format!(
                    "Invalid log format: {}. Use text or json",
                    value
                )))
            }
        },
        "azure.subscription" => config.azure.subscription = optional(value),
        "azure.resource_group" => config.azure.resource_group = optional(value),
        "project.runtime" => {
            let version: FuncVersion = value
                .parse()
                .map_err(|_| AzfnError::UnsupportedRuntime(value.to_string()))?;
            config.project.runtime = version.as_setting().to_string();
        }
        "project.force_extensions_install" => {
            config.project.force_extensions_install = parse_bool(value)?
        }
        _ => {
            return Err(AzfnError::User(format!(
                "Unknown config key: {}. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            )))
        }
    }
    Ok(())
}

fn parse_bool(value: &str) -> AzfnResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(AzfnError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}
