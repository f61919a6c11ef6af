//! Notifications for whatever renders the site tree

use crate::remote::models::SiteState;
use crate::site::children::ChildKind;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::trace;

/// Something in the tree changed and should be repainted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    /// A lazily created child node now exists
    ChildCreated { site: String, kind: ChildKind },
    /// Refresh observed a different run state
    StateChanged { site: String, state: SiteState },
    /// The site was deleted remotely
    SiteDeleted { site: String },
}

/// Fire-and-forget sender for tree events.
///
/// Sending never blocks and never fails the caller; events are dropped when
/// nobody is listening.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<UnboundedSender<TreeEvent>>,
}

impl EventSink {
    /// Create a sink together with the receiving end
    pub fn channel() -> (Self, UnboundedReceiver<TreeEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A sink that discards everything
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Queue an event without waiting for it to be handled
    pub fn notify(&self, event: TreeEvent) {
        let Some(tx) = &self.tx else {
            return;
        };
        if let Err(e) = tx.send(event) {
            trace!("Dropping tree event, receiver gone: {:?}", e.0);
        }
    }
}
