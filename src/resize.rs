//! Container resize notifications.
//!
//! The window shell owns a [`ResizeHub`] and publishes the container size
//! whenever it changes. A surface subscribes on mount and keeps the returned
//! [`ResizeSubscription`]; dropping it unregisters from the hub.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::types::Size;

type Slot = Rc<Cell<Option<Size>>>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: Vec<(u64, Slot)>,
    current: Option<Size>,
}

#[derive(Default, Clone)]
pub struct ResizeHub {
    inner: Rc<RefCell<HubInner>>,
}

impl ResizeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last published size, if any.
    pub fn current(&self) -> Option<Size> {
        self.inner.borrow().current
    }

    /// Notify every live subscription. Repeating the current size is a no-op.
    pub fn publish(&self, size: Size) {
        let mut inner = self.inner.borrow_mut();
        if inner.current == Some(size) {
            return;
        }
        inner.current = Some(size);
        for (_, slot) in &inner.listeners {
            slot.set(Some(size));
        }
    }

    pub fn subscribe(&self) -> ResizeSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let slot: Slot = Rc::new(Cell::new(None));
        inner.listeners.push((id, Rc::clone(&slot)));
        ResizeSubscription { id, slot, hub: Rc::downgrade(&self.inner) }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Receives the most recent size published since the last [`take`](Self::take).
pub struct ResizeSubscription {
    id: u64,
    slot: Slot,
    hub: Weak<RefCell<HubInner>>,
}

impl ResizeSubscription {
    pub fn take(&self) -> Option<Size> {
        self.slot.take()
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
