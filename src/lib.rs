//! azfn - Azure Functions from the terminal
//!
//! Browses deployed Function Apps through a lazily cached site tree and
//! initializes local Python Functions projects.

pub mod cli;
pub mod config;
pub mod error;
pub mod project;
pub mod remote;
pub mod site;
pub mod ui;

pub use error::{AzfnError, AzfnResult};
