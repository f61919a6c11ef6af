//! Remote management API
//!
//! Provides the client abstraction the site tree is built on:
//! - `SiteClient`: management operations bound to one site or slot
//! - `KuduClient`: the site's SCM endpoint (host settings, VFS)

mod az_cli;
mod client;
pub mod models;

pub use az_cli::AzCliClient;
pub use client::{KuduClient, SiteClient};
pub use models::{Site, SiteState};
