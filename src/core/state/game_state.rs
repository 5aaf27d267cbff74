//=========================================================================
// Game State Record
//=========================================================================
//
// The single record of game-relevant fields, its partial-update patch,
// and the field-level change record computed between two snapshots.
//
// Architecture:
//   StatePatch ──apply_to()──> GameState
//   StateChange::between(old, new) → { Field → FieldChange }
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::error::StateError;

//=== Field ===============================================================

/// Names of the fields held in [`GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    CurrentWord,
    ScrambledWord,
    CurrentImageUrl,
    Score,
    HintUsed,
    AvailableWords,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::CurrentWord,
        Field::ScrambledWord,
        Field::CurrentImageUrl,
        Field::Score,
        Field::HintUsed,
        Field::AvailableWords,
    ];

    /// The camelCase key used in JSON patches and event payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::CurrentWord => "currentWord",
            Field::ScrambledWord => "scrambledWord",
            Field::CurrentImageUrl => "currentImageUrl",
            Field::Score => "score",
            Field::HintUsed => "hintUsed",
            Field::AvailableWords => "availableWords",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = StateError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| StateError::UnknownField(name.to_string()))
    }
}

//=== FieldValue ==========================================================

/// A dynamically typed view of one field's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Number(u32),
    Flag(bool),
    Words(Vec<String>),
}

//=== GameState ===========================================================

/// Snapshot of the game-relevant fields.
///
/// The store owns the live record; every value of this type handed out is
/// an independent copy, so its fields are public.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    /// Target word of the active round. Empty means no active round.
    pub current_word: String,
    /// Permutation of `current_word` shown to the player.
    pub scrambled_word: String,
    pub current_image_url: String,
    pub score: u32,
    /// Reset at the start of every round, set by the hint operation.
    pub hint_used: bool,
    /// Remaining word pool for the session.
    pub available_words: Vec<String>,
}

impl GameState {
    /// Returns the value of one field.
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::CurrentWord => FieldValue::Text(self.current_word.clone()),
            Field::ScrambledWord => FieldValue::Text(self.scrambled_word.clone()),
            Field::CurrentImageUrl => FieldValue::Text(self.current_image_url.clone()),
            Field::Score => FieldValue::Number(self.score),
            Field::HintUsed => FieldValue::Flag(self.hint_used),
            Field::AvailableWords => FieldValue::Words(self.available_words.clone()),
        }
    }

    /// Returns true while a round is being played.
    pub fn has_active_round(&self) -> bool {
        !self.current_word.is_empty()
    }
}

//=== StatePatch ==========================================================

/// Partial record for [`GameState`] updates.
///
/// Only the fields set to `Some` are written; everything else keeps its
/// prior value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StatePatch {
    pub current_word: Option<String>,
    pub scrambled_word: Option<String>,
    pub current_image_url: Option<String>,
    pub score: Option<u32>,
    pub hint_used: Option<bool>,
    pub available_words: Option<Vec<String>>,
}

impl StatePatch {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Builder ----------------------------------------------------------

    pub fn current_word(mut self, word: impl Into<String>) -> Self {
        self.current_word = Some(word.into());
        self
    }

    pub fn scrambled_word(mut self, word: impl Into<String>) -> Self {
        self.scrambled_word = Some(word.into());
        self
    }

    pub fn current_image_url(mut self, url: impl Into<String>) -> Self {
        self.current_image_url = Some(url.into());
        self
    }

    pub fn score(mut self, score: u32) -> Self {
        self.score = Some(score);
        self
    }

    pub fn hint_used(mut self, used: bool) -> Self {
        self.hint_used = Some(used);
        self
    }

    pub fn available_words(mut self, words: Vec<String>) -> Self {
        self.available_words = Some(words);
        self
    }

    //--- Application ------------------------------------------------------

    /// Returns true if the patch names no field at all.
    pub fn is_empty(&self) -> bool {
        *self == StatePatch::default()
    }

    /// Overwrites the fields named by this patch.
    pub(crate) fn apply_to(self, state: &mut GameState) {
        if let Some(word) = self.current_word {
            state.current_word = word;
        }
        if let Some(word) = self.scrambled_word {
            state.scrambled_word = word;
        }
        if let Some(url) = self.current_image_url {
            state.current_image_url = url;
        }
        if let Some(score) = self.score {
            state.score = score;
        }
        if let Some(used) = self.hint_used {
            state.hint_used = used;
        }
        if let Some(words) = self.available_words {
            state.available_words = words;
        }
    }
}

//=== StateChange =========================================================

/// Old and new value of one changed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub old_value: FieldValue,
    pub new_value: FieldValue,
}

/// Field-level diff between two snapshots.
///
/// Contains only fields whose values differ. Built fresh for each update
/// and handed to subscribers; the store never keeps one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StateChange {
    changes: BTreeMap<Field, FieldChange>,
}

impl StateChange {
    /// Diffs every field of `old` against `new`.
    pub fn between(old: &GameState, new: &GameState) -> Self {
        let changes = Field::ALL
            .into_iter()
            .filter_map(|field| {
                let old_value = old.get(field);
                let new_value = new.get(field);
                (old_value != new_value).then_some((
                    field,
                    FieldChange {
                        old_value,
                        new_value,
                    },
                ))
            })
            .collect();

        Self { changes }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.changes.contains_key(&field)
    }

    pub fn get(&self, field: Field) -> Option<&FieldChange> {
        self.changes.get(&field)
    }

    /// Changed fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.changes.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldChange)> {
        self.changes.iter().map(|(field, change)| (*field, change))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
