//=========================================================================
// Scramble Engine
//=========================================================================
//
// Produces a randomized letter permutation that differs from the input
// whenever such a permutation exists.
//
// Algorithm: Fisher–Yates over the word's chars, drawing the swap index
// uniformly from `0..=i` while `i` counts down from the last position.
// Retries are bounded; a word whose letters are all identical has no
// differing permutation and is returned unchanged.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};
use rand::Rng;

//=== Constants ===========================================================

/// Shuffles attempted before falling back to a rotation.
///
/// Any word with two distinct letters has at most a 1/2 chance of a
/// shuffle reproducing it, so this is never reached in practice.
pub const MAX_SCRAMBLE_ATTEMPTS: usize = 64;

//=== Public API ==========================================================

/// Scrambles `word` using the thread-local RNG.
pub fn scramble(word: &str) -> String {
    scramble_with(word, &mut rand::thread_rng())
}

/// Scrambles `word` with the supplied RNG.
///
/// For words of two or more chars the result is a permutation of `word`
/// that differs from it, unless every char is the same. Words of length
/// zero or one are returned as-is.
pub fn scramble_with<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let original: Vec<char> = word.chars().collect();
    if original.len() <= 1 {
        return word.to_string();
    }

    let mut letters = original.clone();
    for attempt in 1..=MAX_SCRAMBLE_ATTEMPTS {
        shuffle(&mut letters, rng);
        if letters != original {
            return letters.into_iter().collect();
        }
        debug!("Scramble attempt {} reproduced '{}', retrying", attempt, word);
    }

    // `letters` equals `original` here; a one-step rotation differs unless
    // every char is the same.
    letters.rotate_left(1);
    if letters == original {
        warn!("'{}' has no permutation distinct from itself", word);
    }
    letters.into_iter().collect()
}

/// Returns true if `a` and `b` contain the same chars with the same counts.
pub fn is_anagram(a: &str, b: &str) -> bool {
    let mut left: Vec<char> = a.chars().collect();
    let mut right: Vec<char> = b.chars().collect();
    left.sort_unstable();
    right.sort_unstable();
    left == right
}

//=== Internal Helpers ====================================================

fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn scrambled_word_is_a_distinct_permutation() {
        let mut rng = rng();
        for word in ["at", "cat", "dog", "apple", "banana", "elephant", "héllo"] {
            for _ in 0..50 {
                let scrambled = scramble_with(word, &mut rng);
                assert!(is_anagram(word, &scrambled), "{} -> {}", word, scrambled);
                assert_ne!(scrambled, word);
            }
        }
    }

    #[test]
    fn short_words_are_returned_unchanged() {
        let mut rng = rng();
        assert_eq!(scramble_with("", &mut rng), "");
        assert_eq!(scramble_with("a", &mut rng), "a");
        assert_eq!(scramble("é"), "é");
    }

    #[test]
    fn identical_letters_terminate_without_change() {
        let mut rng = rng();
        assert_eq!(scramble_with("aaaa", &mut rng), "aaaa");
    }

    #[test]
    fn two_letter_word_is_always_swapped() {
        let mut rng = rng();
        for _ in 0..20 {
            assert_eq!(scramble_with("ab", &mut rng), "ba");
        }
    }

    #[test]
    fn every_position_receives_every_letter() {
        let mut rng = rng();
        let word = "abcde";
        let mut seen: Vec<HashSet<char>> = vec![HashSet::new(); word.len()];

        for _ in 0..2000 {
            for (position, letter) in scramble_with(word, &mut rng).chars().enumerate() {
                seen[position].insert(letter);
            }
        }

        for (position, letters) in seen.iter().enumerate() {
            assert_eq!(letters.len(), word.len(), "position {} is biased", position);
        }
    }

    #[test]
    fn first_letter_moves_at_a_reasonable_rate() {
        let mut rng = rng();
        let trials = 4000;
        let moved = (0..trials)
            .filter(|_| !scramble_with("abcd", &mut rng).starts_with('a'))
            .count();

        // 18 of the 23 non-identity permutations of four letters move `a`.
        let expected = trials as f64 * 18.0 / 23.0;
        assert!((moved as f64 - expected).abs() < trials as f64 * 0.05);
    }

    #[test]
    fn shuffle_covers_all_permutations() {
        let mut rng = rng();
        let mut seen = HashSet::new();
        for _ in 0..3000 {
            let mut items = ['x', 'y', 'z'];
            shuffle(&mut items, &mut rng);
            seen.insert(items);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn anagram_check_counts_letters() {
        assert!(is_anagram("listen", "silent"));
        assert!(!is_anagram("aab", "abb"));
        assert!(!is_anagram("cat", "cats"));
    }
}
