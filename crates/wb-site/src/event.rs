//! Change notifications published by the site directory.

use std::sync::mpsc;

/// A change to the directory view.
///
/// `durable` is false when the change is visible in the view but the store
/// could not persist it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectoryEvent {
    /// Record appended.
    Created { id: String, durable: bool },
    /// Record replaced.
    Updated { id: String, durable: bool },
    /// Record removed.
    Removed { id: String, durable: bool },
    /// View reloaded from the store.
    Refreshed { count: usize },
}

impl DirectoryEvent {
    /// Id of the affected record, if the event concerns one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Created { id, .. } | Self::Updated { id, .. } | Self::Removed { id, .. } => {
                Some(id)
            }
            Self::Refreshed { .. } => None,
        }
    }
}

/// Receiver for directory events.
///
/// Wraps a [`std::sync::mpsc::Receiver`]. Dropping it unsubscribes.
pub struct DirectoryEventReceiver {
    rx: mpsc::Receiver<DirectoryEvent>,
}

impl DirectoryEventReceiver {
    pub(crate) fn new(rx: mpsc::Receiver<DirectoryEvent>) -> Self {
        Self { rx }
    }

    /// Wait for the next event.
    ///
    /// Returns `None` when the directory is dropped.
    #[must_use]
    pub fn recv(&self) -> Option<DirectoryEvent> {
        self.rx.recv().ok()
    }

    /// Next pending event, without blocking.
    #[must_use]
    pub fn try_recv(&self) -> Option<DirectoryEvent> {
        self.rx.try_recv().ok()
    }

    /// Drain pending events without blocking.
    pub fn try_iter(&self) -> impl Iterator<Item = DirectoryEvent> + '_ {
        self.rx.try_iter()
    }
}
