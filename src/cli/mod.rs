//! Command-line interface

mod args;
pub mod commands;

pub use args::{
    Cli, Commands, ConfigAction, ConfigArgs, InitArgs, SiteAction, SiteArgs, SiteTarget,
};
