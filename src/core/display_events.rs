use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::warn;

use crate::models::{DisplaySnapshot, MonitorDescriptor, Rect};

/// Normalized change events fanned out to observers.
#[derive(Debug, Clone)]
pub enum DisplayEvent {
    /// Monitor metrics changed and the engine recomputed the window's
    /// placement; the host applies `new_rect`, UIs refresh from the snapshot.
    PlacementChanged {
        old_rect: Rect,
        new_rect: Rect,
        display: DisplaySnapshot,
    },
    /// A monitor was attached. No geometry is recomputed; observers refresh
    /// their enumerations (for example a monitor picker).
    DisplayAdded { monitor: MonitorDescriptor },
    /// A monitor was detached.
    DisplayRemoved { monitor: MonitorDescriptor },
}

pub type Listener = Box<dyn Fn(&DisplayEvent)>;

/// Handle returned by [`ListenerRegistry::add`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Instance-owned observer registry. Fan-out is unordered and a panicking
/// listener never keeps the remaining listeners from being notified.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: BTreeMap<u64, Listener>,
}

impl ListenerRegistry {
    pub fn add(&mut self, listener: Listener) -> ListenerId {
        self.next_id += 1;
        self.listeners.insert(self.next_id, listener);
        ListenerId(self.next_id)
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id.0).is_some()
    }

    pub fn notify(&self, event: &DisplayEvent) {
        for (id, listener) in &self.listeners {
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                warn!(listener = *id, "display listener panicked; continuing fan-out");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
