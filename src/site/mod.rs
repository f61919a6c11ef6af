//! Deployed Function Apps as a tree of lazily loaded nodes
//!
//! A `SiteNode` wraps one site or slot. Its children (functions, app
//! settings, files, logs, deployments, proxies) are created on demand and
//! its derived metadata is cached until the next refresh.

pub mod children;
mod events;
pub mod host_json;
pub mod markers;
mod node;
pub mod version;

pub use children::{ChildKind, ChildNode};
pub use events::{EventSink, TreeEvent};
pub use host_json::{parse_host_json, HostConfig};
pub use markers::Marker;
pub use node::{settings_are_read_only, SiteNode, RUN_FROM_PACKAGE_SETTINGS};
pub use version::FuncVersion;
