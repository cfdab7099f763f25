#![forbid(unsafe_code)]

//! Resize notifications with explicit registration lifetimes.
//!
//! The host owns one [`ResizeHub`] and tells it about terminal resizes. Each
//! mounted form holds a [`ResizeRegistration`]; dropping the registration
//! (or the form) removes it from the hub.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Size = (u16, u16);

#[derive(Debug, Default)]
struct HubInner {
    next_id: u64,
    observers: Vec<(u64, Rc<Cell<Option<Size>>>)>,
}

/// Broadcasts viewport sizes to registered observers.
#[derive(Debug, Clone, Default)]
pub struct ResizeHub {
    inner: Rc<RefCell<HubInner>>,
}

impl ResizeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new observer.
    pub fn register(&self) -> ResizeRegistration {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let pending = Rc::new(Cell::new(None));
        inner.observers.push((id, Rc::clone(&pending)));
        ResizeRegistration {
            id,
            hub: Rc::downgrade(&self.inner),
            pending,
        }
    }

    /// Record a new size for every observer. Only the latest size is kept.
    pub fn notify(&self, width: u16, height: u16) {
        for (_, pending) in &self.inner.borrow().observers {
            pending.set(Some((width, height)));
        }
    }

    /// Number of live registrations.
    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }
}

/// One observer's membership in a [`ResizeHub`].
#[derive(Debug)]
pub struct ResizeRegistration {
    id: u64,
    hub: Weak<RefCell<HubInner>>,
    pending: Rc<Cell<Option<Size>>>,
}

impl ResizeRegistration {
    /// Take the latest size notified since the last call.
    pub fn take(&self) -> Option<Size> {
        self.pending.take()
    }
}

impl Drop for ResizeRegistration {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.borrow_mut().observers.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_lives_until_drop() {
        let hub = ResizeHub::new();
        let a = hub.register();
        let b = hub.register();
        assert_eq!(hub.observer_count(), 2);
        drop(a);
        assert_eq!(hub.observer_count(), 1);
        drop(b);
        assert_eq!(hub.observer_count(), 0);
    }

    #[test]
    fn latest_size_wins() {
        let hub = ResizeHub::new();
        let reg = hub.register();
        hub.notify(80, 24);
        hub.notify(100, 30);
        assert_eq!(reg.take(), Some((100, 30)));
        assert_eq!(reg.take(), None);
    }

    #[test]
    fn outliving_the_hub_is_harmless() {
        let hub = ResizeHub::new();
        let reg = hub.register();
        drop(hub);
        assert_eq!(reg.take(), None);
        drop(reg);
    }
}
