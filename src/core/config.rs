//=========================================================================
// Game Configuration
//=========================================================================
//
// Scoring, timing and fallback settings for a game session.
//
// Loaded from JSON (camelCase keys, every key optional) or built in code;
// both paths go through `validate()` before a session accepts them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::error::ConfigError;
use crate::core::words;

//=== GameConfig ==========================================================

/// Tunable game settings.
///
/// # Default Values
///
/// - **Points without hint**: 10
/// - **Points with hint**: 5
/// - **Celebration delay**: 500 ms after a correct answer
/// - **Advance delay**: 2000 ms after the celebration starts
/// - **Gesture batch limit**: 100 gestures per pump
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct GameConfig {
    pub points_without_hint: u32,
    pub points_with_hint: u32,
    pub celebration_delay_ms: u64,
    pub advance_delay_ms: u64,
    /// Pool used when the word source yields nothing.
    pub default_words: Vec<String>,
    pub gesture_batch_limit: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            points_without_hint: 10,
            points_with_hint: 5,
            celebration_delay_ms: 500,
            advance_delay_ms: 2000,
            default_words: words::default_words(),
            gesture_batch_limit: 100,
        }
    }
}

impl GameConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.points_without_hint == 0 {
            return Err(ConfigError::Invalid {
                field: "pointsWithoutHint",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.points_with_hint > self.points_without_hint {
            return Err(ConfigError::Invalid {
                field: "pointsWithHint",
                reason: format!(
                    "{} exceeds pointsWithoutHint ({})",
                    self.points_with_hint, self.points_without_hint
                ),
            });
        }
        if self.gesture_batch_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "gestureBatchLimit",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    //--- Builder ----------------------------------------------------------

    pub fn with_points(mut self, without_hint: u32, with_hint: u32) -> Self {
        self.points_without_hint = without_hint;
        self.points_with_hint = with_hint;
        self
    }

    pub fn with_delays(mut self, celebration: Duration, advance: Duration) -> Self {
        self.celebration_delay_ms = duration_ms(celebration);
        self.advance_delay_ms = duration_ms(advance);
        self
    }

    pub fn with_default_words<I, S>(mut self, list: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.default_words = words::sanitize_word_list(list);
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn celebration_delay(&self) -> Duration {
        Duration::from_millis(self.celebration_delay_ms)
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }

    /// Points for a correct answer given the round's hint status.
    pub fn points_for(&self, hint_used: bool) -> u32 {
        if hint_used {
            self.points_with_hint
        } else {
            self.points_without_hint
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

//=========================================================================
// Tests
//=========================================================================
