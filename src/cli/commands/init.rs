//! Init command - prepare a Python Functions project for local development

use crate::cli::args::InitArgs;
use crate::config::Config;
use crate::error::{AzfnError, AzfnResult};
use crate::project::{InitContext, PythonInitStep, VsCodeWriter};
use crate::site::FuncVersion;
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the init command
pub async fn execute(args: InitArgs, config: &Config) -> AzfnResult<()> {
    let ctx = UiContext::detect();

    let project_path = match args.path {
        Some(p) => p,
        None => {
            std::env::current_dir().map_err(|e| AzfnError::io("getting current directory", e))?
        }
    };
    if !project_path.is_dir() {
        return Err(AzfnError::PathNotFound(project_path));
    }

    let runtime_setting = args.runtime.as_deref().unwrap_or(&config.project.runtime);
    let runtime: FuncVersion = runtime_setting
        .parse()
        .map_err(|_| AzfnError::UnsupportedRuntime(runtime_setting.to_string()))?;

    let init = InitContext {
        project_path: project_path.clone(),
        runtime,
        force_extensions_install: args.force_extensions || config.project.force_extensions_install,
    };

    ui::intro(&ctx, "azfn init");

    let mut step = PythonInitStep::new();
    step.execute(&init).await?;

    match step.venv_name() {
        Some(venv) => ui::step_ok_detail(&ctx, "Virtual environment", venv),
        None => ui::step_warn_hint(
            &ctx,
            "No virtual environment found",
            "Run: python -m venv .venv",
        ),
    }

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Writing editor configuration...");

    let writer = VsCodeWriter::new(&project_path);
    let written = async {
        writer.write_settings(step.settings()).await?;
        writer.write_tasks(&step.tasks()).await?;
        writer.write_launch(&[step.debug_configuration()]).await?;
        writer.write_extensions(&step.recommended_extensions()).await
    }
    .await;

    if let Err(e) = written {
        spinner.stop_error("Failed to write editor configuration");
        return Err(e);
    }
    spinner.stop(&format!("Wrote {}", writer.dir().display()));

    for task in step.tasks() {
        match task.depends_on {
            Some(ref dep) => ui::key_value(&ctx, &task.label, &format!("after {}", dep)),
            None => ui::key_value(&ctx, &task.label, "ready"),
        }
    }

    ui::outro_success(&ctx, &format!("Initialized {} project", runtime));
    Ok(())
}
