//=========================================================================
// Subscriber List
//=========================================================================
//
// Ordered, duplicate-free list of handlers registered under one event
// name. Identity is by allocation (`Rc` pointer), not by behavior.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::Handler;

//=========================================================================

/// Handlers for a single event name, in subscription order.
#[derive(Default)]
pub(super) struct SubscriberList {
    handlers: Vec<Handler>,
}

impl SubscriberList {
    pub(super) fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends `handler` unless the same instance is already present.
    ///
    /// Returns true if the handler was newly added.
    pub(super) fn insert(&mut self, handler: Handler) -> bool {
        if self.contains(&handler) {
            return false;
        }
        self.handlers.push(handler);
        true
    }

    /// Removes `handler` if present. Returns true if a removal occurred.
    pub(super) fn remove(&mut self, handler: &Handler) -> bool {
        match self.handlers.iter().position(|h| same_handler(h, handler)) {
            Some(index) => {
                self.handlers.remove(index);
                true
            }
            None => false,
        }
    }

    pub(super) fn contains(&self, handler: &Handler) -> bool {
        self.handlers.iter().any(|h| same_handler(h, handler))
    }

    /// Copies the current handler list.
    ///
    /// A publish iterates this copy, so subscriptions made during dispatch
    /// take effect on the next publish only.
    pub(super) fn snapshot(&self) -> Vec<Handler> {
        self.handlers.clone()
    }

    pub(super) fn len(&self) -> usize {
        self.handlers.len()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Compares handler allocations, ignoring vtable metadata.
fn same_handler(a: &Handler, b: &Handler) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}

//=========================================================================
// Tests
//=========================================================================
