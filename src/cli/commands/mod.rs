//! CLI command implementations

pub mod config;
pub mod init;
pub mod site;

pub use config::execute as config;
pub use init::execute as init;
pub use site::execute as site;
