//=========================================================================
// Event Bus
//=========================================================================
//
// Synchronous publish/subscribe registry keyed by event name.
//
// Architecture:
//   Producers → publish(name, payload) → HashMap<String, SubscriberList>
//                                              ↓ (snapshot)
//   Handlers (subscription order) ← payload by reference
//
// Pattern: same-turn, same-thread fan-out. No queueing, no wildcards.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use log::{debug, error, warn};

//=== Internal Dependencies ===============================================

use super::subscriber_list::SubscriberList;
use super::EventPayload;
use crate::core::error::{BusError, HandlerError};

//=== Public API ==========================================================

/// Outcome of a single handler invocation.
pub type HandlerResult = Result<(), HandlerError>;

/// Shared, identity-comparable event handler.
///
/// Subscribing the same `Handler` instance twice is a no-op; keep a clone
/// around to unsubscribe later.
pub type Handler = Rc<dyn Fn(&EventPayload) -> HandlerResult>;

/// Wraps a closure into a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&EventPayload) -> HandlerResult + 'static,
{
    Rc::new(f)
}

//=========================================================================

/// Publish/subscribe registry for game occurrences.
///
/// All methods take `&self`, so handlers may subscribe, unsubscribe or
/// publish re-entrantly while a publish is in progress.
pub struct EventBus {
    subscribers: RefCell<HashMap<String, SubscriberList>>,
}

impl EventBus {
    /// Creates a new bus with no subscribers.
    pub fn new() -> Self {
        EventBus {
            subscribers: RefCell::new(HashMap::new()),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers `handler` under `event`.
    ///
    /// Returns `Ok(true)` if newly registered and `Ok(false)` if the same
    /// handler instance was already subscribed to this event.
    pub fn subscribe(&self, event: &str, handler: Handler) -> Result<bool, BusError> {
        if event.trim().is_empty() {
            warn!("Rejected subscription with empty event name");
            return Err(BusError::EmptyEventName);
        }

        let added = self
            .subscribers
            .borrow_mut()
            .entry(event.to_string())
            .or_insert_with(SubscriberList::new)
            .insert(handler);

        if added {
            debug!("Subscribed handler to '{}'", event);
        } else {
            debug!("Handler already subscribed to '{}', ignoring", event);
        }
        Ok(added)
    }

    /// Removes a previously registered handler.
    ///
    /// Returns whether a removal occurred. Unknown events or handlers are
    /// not an error.
    pub fn unsubscribe(&self, event: &str, handler: &Handler) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let removed = subscribers
            .get_mut(event)
            .map(|list| list.remove(handler))
            .unwrap_or(false);

        if removed {
            debug!("Unsubscribed handler from '{}'", event);
            if subscribers.get(event).is_some_and(SubscriberList::is_empty) {
                subscribers.remove(event);
            }
        }
        removed
    }

    //--- Dispatch ---------------------------------------------------------

    /// Invokes every handler registered for `event`, in subscription order.
    ///
    /// Returns false when nobody is listening. A failing or panicking
    /// handler is logged and skipped; the remaining handlers still run.
    pub fn publish(&self, event: &str, payload: &EventPayload) -> bool {
        // Fix the handler list before dispatch and release the borrow so
        // handlers can touch the bus.
        let handlers = self
            .subscribers
            .borrow()
            .get(event)
            .filter(|list| !list.is_empty())
            .map(SubscriberList::snapshot);

        let Some(handlers) = handlers else {
            debug!("No subscribers for '{}'", event);
            return false;
        };

        for (index, handler) in handlers.iter().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| handler(payload))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    error!("Handler #{} for '{}' failed: {}", index, event, err);
                }
                Err(cause) => {
                    error!(
                        "Handler #{} for '{}' panicked: {}",
                        index,
                        event,
                        panic_message(cause.as_ref())
                    );
                }
            }
        }
        true
    }

    //--- Query API --------------------------------------------------------

    /// Returns the number of handlers registered for `event`.
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.subscribers
            .borrow()
            .get(event)
            .map(SubscriberList::len)
            .unwrap_or(0)
    }

    /// Returns true if `handler` is registered for `event`.
    pub fn is_subscribed(&self, event: &str, handler: &Handler) -> bool {
        self.subscribers
            .borrow()
            .get(event)
            .is_some_and(|list| list.contains(handler))
    }

    /// Drops every subscription for every event.
    pub fn clear(&self) {
        self.subscribers.borrow_mut().clear();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(cause: &(dyn Any + Send)) -> String {
    if let Some(message) = cause.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = cause.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::core::event_bus::handler;

    fn counter() -> (Rc<Cell<u32>>, Handler) {
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        let h = handler(move |_| {
            seen.set(seen.get() + 1);
            Ok(())
        });
        (count, h)
    }

    #[test]
    fn new_bus_has_no_subscribers() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count("stateChanged"), 0);
        assert!(!bus.publish("stateChanged", &EventPayload::Empty));
    }

    #[test]
    fn subscribe_rejects_empty_event_name() {
        let bus = EventBus::new();
        let (_, h) = counter();

        assert_eq!(bus.subscribe("", h.clone()), Err(BusError::EmptyEventName));
        assert_eq!(bus.subscribe("   ", h), Err(BusError::EmptyEventName));
    }

    #[test]
    fn same_handler_subscribed_twice_runs_once() {
        let bus = EventBus::new();
        let (count, h) = counter();

        assert_eq!(bus.subscribe("allSlotsFilled", h.clone()), Ok(true));
        assert_eq!(bus.subscribe("allSlotsFilled", h.clone()), Ok(false));
        assert_eq!(bus.subscriber_count("allSlotsFilled"), 1);

        assert!(bus.publish("allSlotsFilled", &EventPayload::Empty));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn handlers_run_in_subscription_order() {
        let bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for id in 0..3 {
            let order = order.clone();
            bus.subscribe(
                "roundLoaded",
                handler(move |_| {
                    order.borrow_mut().push(id);
                    Ok(())
                }),
            )
            .unwrap();
        }

        bus.publish("roundLoaded", &EventPayload::Empty);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn payload_is_passed_unchanged() {
        let bus = EventBus::new();
        let received = Rc::new(RefCell::new(None));
        let sink = received.clone();
        bus.subscribe(
            "hintShown",
            handler(move |payload| {
                *sink.borrow_mut() = Some(payload.clone());
                Ok(())
            }),
        )
        .unwrap();

        let payload = EventPayload::HintShown { letter: 'c', slot: 0 };
        bus.publish("hintShown", &payload);
        assert_eq!(*received.borrow(), Some(payload));
    }

    #[test]
    fn failing_handler_does_not_stop_the_rest() {
        let bus = EventBus::new();
        let (count, last) = counter();

        bus.subscribe("answerCorrect", handler(|_| Err(HandlerError::new("nope"))))
            .unwrap();
        bus.subscribe("answerCorrect", handler(|_| panic!("handler blew up")))
            .unwrap();
        bus.subscribe("answerCorrect", last).unwrap();

        assert!(bus.publish("answerCorrect", &EventPayload::Empty));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn unsubscribe_removes_only_that_handler() {
        let bus = EventBus::new();
        let (first_count, first) = counter();
        let (second_count, second) = counter();
        bus.subscribe("letterMoved", first.clone()).unwrap();
        bus.subscribe("letterMoved", second).unwrap();

        assert!(bus.unsubscribe("letterMoved", &first));
        assert!(!bus.unsubscribe("letterMoved", &first));
        assert!(!bus.unsubscribe("unknown", &first));

        bus.publish("letterMoved", &EventPayload::Empty);
        assert_eq!(first_count.get(), 0);
        assert_eq!(second_count.get(), 1);
    }

    #[test]
    fn publish_returns_false_after_last_unsubscribe() {
        let bus = EventBus::new();
        let (_, h) = counter();
        bus.subscribe("stateReset", h.clone()).unwrap();
        bus.unsubscribe("stateReset", &h);

        assert!(!bus.publish("stateReset", &EventPayload::Empty));
    }

    #[test]
    fn subscription_during_publish_applies_next_time() {
        let bus = Rc::new(EventBus::new());
        let (late_count, late) = counter();

        let inner_bus = bus.clone();
        bus.subscribe(
            "stateChanged",
            handler(move |_| {
                inner_bus.subscribe("stateChanged", late.clone())?;
                Ok(())
            }),
        )
        .unwrap();

        bus.publish("stateChanged", &EventPayload::Empty);
        assert_eq!(late_count.get(), 0);

        bus.publish("stateChanged", &EventPayload::Empty);
        assert_eq!(late_count.get(), 1);
    }

    #[test]
    fn handler_can_publish_other_events() {
        let bus = Rc::new(EventBus::new());
        let (count, downstream) = counter();
        bus.subscribe("celebrationStarted", downstream).unwrap();

        let inner_bus = bus.clone();
        bus.subscribe(
            "answerCorrect",
            handler(move |_| {
                inner_bus.publish("celebrationStarted", &EventPayload::Empty);
                Ok(())
            }),
        )
        .unwrap();

        bus.publish("answerCorrect", &EventPayload::Empty);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn clear_drops_everything() {
        let bus = EventBus::new();
        let (_, h) = counter();
        bus.subscribe("a", h.clone()).unwrap();
        bus.subscribe("b", h.clone()).unwrap();

        bus.clear();
        assert!(!bus.is_subscribed("a", &h));
        assert_eq!(bus.subscriber_count("b"), 0);
    }
}
