//=========================================================================
// Game Event Types
//
// Defines the event names and payloads carried over the EventBus.
//
// Responsibilities:
// - Name every game occurrence with a stable string key
// - Represent each occurrence's data in one portable payload enum
// - Keep producers (store, board, flow) and consumers (UI, audio,
//   telemetry) agreeing on a single vocabulary
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::{TileId, TilePosition};
use crate::core::schedule::RoundId;
use crate::core::state::{GameState, StateChange};

//=== Event Names =========================================================
// String keys used for subscription and publication.
//
// Names follow the camelCase convention of the browser layer so that
// glue code can forward them without translation.
pub mod names {
    //--- State store ------------------------------------------------------
    pub const STATE_CHANGED: &str = "stateChanged";
    pub const STATE_RESET: &str = "stateReset";

    //--- Input adapter ----------------------------------------------------
    pub const LETTER_MOVED: &str = "letterMoved";
    pub const ALL_SLOTS_FILLED: &str = "allSlotsFilled";

    //--- Round flow -------------------------------------------------------
    pub const ROUND_LOADED: &str = "roundLoaded";
    pub const WORD_LOAD_FAILED: &str = "wordLoadFailed";
    pub const ANSWER_CORRECT: &str = "answerCorrect";
    pub const ANSWER_INCORRECT: &str = "answerIncorrect";
    pub const HINT_SHOWN: &str = "hintShown";
    pub const CELEBRATION_STARTED: &str = "celebrationStarted";
}

//=== EventPayload Enum ===================================================
// Data delivered to subscribers, passed unchanged to every handler of a
// single publish call.
//
// State snapshots inside payloads are independent copies; mutating them
// never reaches the store.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// Signal-only events such as `allSlotsFilled`.
    Empty,

    StateChanged {
        changes: StateChange,
        old_state: GameState,
        new_state: GameState,
    },

    StateReset {
        old_state: GameState,
        new_state: GameState,
    },

    LetterMoved {
        tile: TileId,
        from: TilePosition,
        to: TilePosition,
    },

    RoundLoaded {
        round: RoundId,
        word: String,
        scrambled: String,
    },

    /// The word pipeline failed; `fallback_word` is what the board shows.
    WordLoadFailed {
        reason: String,
        fallback_word: String,
    },

    AnswerCorrect {
        word: String,
        score: u32,
        awarded: u32,
    },

    AnswerIncorrect {
        assembled_answer: String,
        correct_word: String,
    },

    HintShown {
        letter: char,
        slot: usize,
    },

    CelebrationStarted {
        word: String,
    },
}

impl EventPayload {
    /// Returns the canonical event name for this payload.
    ///
    /// `Empty` has no canonical name and returns `None`.
    pub fn event_name(&self) -> Option<&'static str> {
        use EventPayload::*;
        match self {
            Empty => None,
            StateChanged { .. } => Some(names::STATE_CHANGED),
            StateReset { .. } => Some(names::STATE_RESET),
            LetterMoved { .. } => Some(names::LETTER_MOVED),
            RoundLoaded { .. } => Some(names::ROUND_LOADED),
            WordLoadFailed { .. } => Some(names::WORD_LOAD_FAILED),
            AnswerCorrect { .. } => Some(names::ANSWER_CORRECT),
            AnswerIncorrect { .. } => Some(names::ANSWER_INCORRECT),
            HintShown { .. } => Some(names::HINT_SHOWN),
            CelebrationStarted { .. } => Some(names::CELEBRATION_STARTED),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
