//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use word_unscramble::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Session
pub use crate::session::{GameSession, GameSessionBuilder, PumpReport};

// Configuration
pub use crate::core::config::GameConfig;

// Event bus
pub use crate::core::event_bus::{handler, names, EventBus, EventPayload, Handler};

// Game state
pub use crate::core::state::{Field, GameState, GameStateStore, StatePatch};

// Round flow
pub use crate::core::flow::{AnswerOutcome, FlowPhase, HintOutcome, LoadOutcome};

// Input
pub use crate::core::input::{GestureEvent, TileId, TilePosition};

// Collaborators
pub use crate::core::collaborators::{
    AudioPlayer, InMemoryWordSource, Presentation, Sound, WordSource,
};
