//! CLI argument definitions using clap derive

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// azfn - Azure Functions from the terminal
///
/// Initializes local Python Functions projects and browses deployed
/// Function Apps through the az CLI.
#[derive(Parser, Debug)]
#[command(name = "azfn")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "AZFN_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prepare a Python Functions project for local development
    Init(InitArgs),

    /// Inspect or delete a deployed Function App
    Site(SiteArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Project directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Functions runtime, e.g. ~4 (defaults to project.runtime from config)
    #[arg(short, long)]
    pub runtime: Option<String>,

    /// Add the extension-install task even when host.json has a bundle
    #[arg(long)]
    pub force_extensions: bool,
}

/// Arguments for the site command
#[derive(Parser, Debug)]
pub struct SiteArgs {
    #[command(subcommand)]
    pub action: SiteAction,
}

/// Identifies one Function App or slot
#[derive(Args, Debug, Clone)]
pub struct SiteTarget {
    /// Function App name
    pub name: String,

    /// Resource group (defaults to azure.resource_group from config)
    #[arg(short = 'g', long)]
    pub resource_group: Option<String>,

    /// Deployment slot
    #[arg(short, long)]
    pub slot: Option<String>,
}

/// Site actions
#[derive(Subcommand, Debug)]
pub enum SiteAction {
    /// Show state, runtime version, host configuration and plan
    Show {
        #[command(flatten)]
        target: SiteTarget,
    },

    /// List the children beneath the site
    Tree {
        #[command(flatten)]
        target: SiteTarget,
    },

    /// List application settings
    Settings {
        #[command(flatten)]
        target: SiteTarget,

        /// Print values instead of masking them
        #[arg(long)]
        show_values: bool,
    },

    /// Resolve context markers to the child they identify
    Pick {
        #[command(flatten)]
        target: SiteTarget,

        /// Context values, e.g. "appSettings" or "functions"
        #[arg(required = true, num_args = 1..)]
        markers: Vec<String>,
    },

    /// Delete the Function App or slot
    Delete {
        #[command(flatten)]
        target: SiteTarget,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., azure.resource_group)
        key: String,

        /// Value to set
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_site_pick() {
        let cli = Cli::parse_from([
            "azfn", "site", "pick", "my-app", "-g", "rg", "proxies", "functions",
        ]);
        match cli.command {
            Commands::Site(SiteArgs {
                action: SiteAction::Pick { target, markers },
            }) => {
                assert_eq!(target.name, "my-app");
                assert_eq!(target.resource_group.as_deref(), Some("rg"));
                assert_eq!(markers, vec!["proxies", "functions"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parse_init_defaults() {
        let cli = Cli::parse_from(["azfn", "init"]);
        match cli.command {
            Commands::Init(args) => {
                assert!(args.path.is_none());
                assert!(args.runtime.is_none());
                assert!(!args.force_extensions);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::parse_from(["azfn", "-vv", "config", "path"]);
        assert_eq!(cli.verbose, 2);
    }
}
