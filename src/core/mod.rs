//=========================================================================
// Coordination Core
//
// Systems shared by every part of the game, all running on one thread.
//
// Responsibilities:
// - Route named events between decoupled components (event_bus)
// - Own the authoritative game state and publish its diffs (state)
// - Drive rounds: load, evaluate, hint, celebrate, advance (flow)
// - Turn input-layer gestures into board state (input)
// - Provide the scrambler, timer queue, word pool and settings
//
// Notes:
// Components share the bus and store through `Rc`; nothing here is
// `Send`. The gesture channel is the only seam to other threads.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod collaborators;
pub mod config;
pub mod error;
pub mod event_bus;
pub mod flow;
pub mod input;
pub mod schedule;
pub mod scramble;
pub mod state;
pub mod words;

//=== Public API ==========================================================

pub use collaborators::{AudioPlayer, Collaborators, Presentation, Sound, WordSource};
pub use config::GameConfig;
pub use error::{BusError, ConfigError, FlowError, HandlerError, SourceError, StateError};
pub use event_bus::{EventBus, EventPayload};
pub use flow::{FlowPhase, WordFlowController};
pub use state::{GameState, GameStateStore, StatePatch};
