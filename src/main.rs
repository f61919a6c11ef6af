//! azfn - Azure Functions from the terminal
//!
//! CLI entry point that dispatches to subcommands.

use azfn::cli::{Cli, Commands};
use azfn::config::{Config, ConfigManager};
use azfn::error::AzfnResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            } else if e.is_remote() {
                eprintln!(
                    "{} Re-run with -vv to see the az commands issued",
                    style("Hint:").yellow()
                );
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AzfnResult<()> {
    let cli = Cli::parse();

    let manager = ConfigManager::locate(cli.config.clone());
    let config = manager.load().await?;

    init_logging(cli.verbose, &config);
    azfn::ui::init_theme();
    debug!("Using config {}", manager.path().display());

    match cli.command {
        Commands::Init(args) => azfn::cli::commands::init(args, &config).await,
        Commands::Site(args) => azfn::cli::commands::site(args, &config).await,
        Commands::Config(args) => azfn::cli::commands::config(args, &manager, &config).await,
    }
}

/// 0 = warn (spinners only), 1 = info, 2+ = debug
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("azfn=warn"),
        1 => EnvFilter::new("azfn=info"),
        _ => EnvFilter::new("azfn=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
