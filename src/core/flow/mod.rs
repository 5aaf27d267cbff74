//=========================================================================
// Round Flow
//=========================================================================
//
// The word-load / answer-check / hint state machine.
//
// Phases:
//   Idle ──load──> RoundActive ──all slots filled──> Evaluating
//                      ↑   ↑                              │
//                      │   └──────── incorrect ───────────┤
//                      │                                  ↓ correct
//                      └── advance ── Celebrating <── Solved
//                                                 (celebration delay)
//
// Solved and Celebrating ignore stray gestures, answers and hints; an
// explicit next-word request or a reset cancels the pending transition.
//
//=========================================================================

//=== Module Declarations =================================================

mod controller;

//=== Public API ==========================================================

pub use controller::WordFlowController;

//=== FlowPhase ===========================================================

/// Where the current round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlowPhase {
    /// No round has been loaded yet, or the game was reset.
    #[default]
    Idle,

    /// Letters are being placed.
    RoundActive,

    /// A full board is being checked.
    Evaluating,

    /// Answered correctly; celebration pending.
    Solved,

    /// Celebration running; auto-advance pending.
    Celebrating,
}

impl FlowPhase {
    /// True while the player may still change the board.
    pub fn accepts_input(self) -> bool {
        self == FlowPhase::RoundActive
    }
}

//=== Outcomes ============================================================

/// Result of loading a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A word from the pool was loaded.
    Loaded { word: String },

    /// The word pipeline failed and the fixed fallback round was loaded.
    Fallback { word: String, reason: String },
}

impl LoadOutcome {
    pub fn word(&self) -> &str {
        match self {
            LoadOutcome::Loaded { word } | LoadOutcome::Fallback { word, .. } => word,
        }
    }
}

/// Result of checking an assembled answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct { awarded: u32, score: u32 },
    Incorrect,
    /// No round is accepting answers right now.
    Ignored,
}

/// Result of a hint request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintOutcome {
    /// The first letter was placed. `answer` is set when that placement
    /// completed the board and triggered evaluation.
    Revealed {
        letter: char,
        answer: Option<AnswerOutcome>,
    },

    AlreadyUsed,

    /// No round is accepting hints right now.
    Unavailable,
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_rounds_accept_input() {
        assert!(FlowPhase::RoundActive.accepts_input());
        for phase in [
            FlowPhase::Idle,
            FlowPhase::Evaluating,
            FlowPhase::Solved,
            FlowPhase::Celebrating,
        ] {
            assert!(!phase.accepts_input(), "{:?}", phase);
        }
    }

    #[test]
    fn default_phase_is_idle() {
        assert_eq!(FlowPhase::default(), FlowPhase::Idle);
    }

    #[test]
    fn load_outcome_exposes_word() {
        let fallback = LoadOutcome::Fallback {
            word: "cat".to_string(),
            reason: "empty".to_string(),
        };
        assert_eq!(fallback.word(), "cat");
    }
}
