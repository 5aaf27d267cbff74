//=========================================================================
// Game State
//=========================================================================
//
// Centralized mutable record with change-diffing.
//
// Architecture:
//   GameStateStore
//     ├─ state: RefCell<GameState>
//     └─ bus: Rc<EventBus>  ── stateChanged / stateReset
//
//=========================================================================

//=== Module Declarations =================================================

mod game_state;
mod store;

//=== Public API ==========================================================

pub use game_state::{Field, FieldChange, FieldValue, GameState, StateChange, StatePatch};
pub use store::GameStateStore;
