//=========================================================================
// Word Lists
//=========================================================================
//
// Built-in word lists and normalization of player-supplied lists.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::debug;

//=== Constants ===========================================================

/// Words used when the word source has nothing to offer.
pub const DEFAULT_WORDS: &[&str] = &[
    "cat", "dog", "sun", "hat", "fish", "bird", "frog", "duck", "tree", "cake", "apple",
    "house",
];

/// Known-good round shown when every word pipeline fails.
pub const FALLBACK_WORD: &str = "cat";
pub const FALLBACK_SCRAMBLE: &str = "tac";

//=== Public API ==========================================================

/// Owned copy of [`DEFAULT_WORDS`].
pub fn default_words() -> Vec<String> {
    DEFAULT_WORDS.iter().map(|w| w.to_string()).collect()
}

/// True for non-empty words made only of alphabetic chars.
pub fn is_playable(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

/// Normalizes a word list: trims, lowercases, drops unplayable entries and
/// duplicates. First occurrence wins, order is otherwise preserved.
pub fn sanitize_word_list<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut clean = Vec::new();

    for raw in words {
        let word = raw.as_ref().trim().to_lowercase();
        if !is_playable(&word) {
            debug!("Dropping unplayable word {:?}", raw.as_ref());
            continue;
        }
        if seen.insert(word.clone()) {
            clean.push(word);
        }
    }
    clean
}

//=========================================================================
// Tests
//=========================================================================
