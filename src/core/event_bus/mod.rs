//=========================================================================
// Event Bus
//=========================================================================
//
// Decouples producers and consumers of game occurrences.
//
// Components:
// - `event_bus`: the name-keyed handler registry and dispatcher
// - `subscriber_list`: per-event ordered, duplicate-free handler storage
// - `payload`: event names and the payload enum
//
//=========================================================================

//=== Module Declarations =================================================

#[allow(clippy::module_inception)]
mod event_bus;
mod payload;
mod subscriber_list;

//=== Public API ==========================================================

pub use event_bus::{handler, EventBus, Handler, HandlerResult};
pub use payload::{names, EventPayload};
