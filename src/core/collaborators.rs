//=========================================================================
// Collaborator Interfaces
//=========================================================================
//
// Capabilities the round flow consumes from the outside world: the word
// and persistence source, the board renderer, and audio playback.
//
// Every capability ships with a null-object implementation so the flow
// controller always holds a present collaborator and never probes for
// one at call sites.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::error::SourceError;

//=== WordSource ==========================================================

/// Word pool, image lookup and persistence.
///
/// Failures are reported as [`SourceError`] and always tolerated by the
/// caller with a fallback.
pub trait WordSource {
    /// Returns the words available for a fresh session pool.
    fn available_words(&self) -> Result<Vec<String>, SourceError>;

    /// Returns the picture associated with `word`, if any.
    fn image_for(&self, word: &str) -> Result<Option<String>, SourceError>;

    fn persist_score(&mut self, score: u32) -> Result<(), SourceError>;

    fn persist_word_pool(&mut self, words: &[String]) -> Result<(), SourceError>;
}

//=== Presentation ========================================================

/// Board renderer. Side effects only.
pub trait Presentation {
    /// Draws a new round: the scrambled tiles and `slot_count` empty slots.
    fn render_round(&mut self, scrambled: &str, slot_count: usize);

    fn mark_slots_correct(&mut self);

    fn show_celebration(&mut self);

    /// Highlights a hinted letter placed into `slot`.
    ///
    /// Default implementation does nothing; the board model already moved
    /// the tile.
    fn place_hint(&mut self, _letter: char, _slot: usize) {}
}

//=== AudioPlayer =========================================================

/// Sound effects played by the round flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Correct,
    Incorrect,
    Hint,
    Celebration,
    LetterDrop,
}

/// Fire-and-forget audio playback.
pub trait AudioPlayer {
    fn play(&mut self, sound: Sound);

    /// Speaks `word` aloud.
    fn announce(&mut self, word: &str);
}

//=== Null Objects ========================================================

/// Source with no words that accepts and discards every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullWordSource;

impl WordSource for NullWordSource {
    fn available_words(&self) -> Result<Vec<String>, SourceError> {
        Ok(Vec::new())
    }

    fn image_for(&self, _word: &str) -> Result<Option<String>, SourceError> {
        Ok(None)
    }

    fn persist_score(&mut self, _score: u32) -> Result<(), SourceError> {
        Ok(())
    }

    fn persist_word_pool(&mut self, _words: &[String]) -> Result<(), SourceError> {
        Ok(())
    }
}

/// Renderer that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresentation;

impl Presentation for NullPresentation {
    fn render_round(&mut self, _scrambled: &str, _slot_count: usize) {}
    fn mark_slots_correct(&mut self) {}
    fn show_celebration(&mut self) {}
}

/// Audio player that stays quiet.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioPlayer for SilentAudio {
    fn play(&mut self, _sound: Sound) {}
    fn announce(&mut self, _word: &str) {}
}

//=== Collaborators =======================================================

/// The set of capabilities handed to the flow controller at construction.
///
/// Defaults to the null objects; replace individual members with the
/// `with_*` methods.
pub struct Collaborators {
    pub words: Box<dyn WordSource>,
    pub presentation: Box<dyn Presentation>,
    pub audio: Box<dyn AudioPlayer>,
}

impl Collaborators {
    pub fn new() -> Self {
        Self {
            words: Box::new(NullWordSource),
            presentation: Box::new(NullPresentation),
            audio: Box::new(SilentAudio),
        }
    }

    pub fn with_words(mut self, words: impl WordSource + 'static) -> Self {
        self.words = Box::new(words);
        self
    }

    pub fn with_presentation(mut self, presentation: impl Presentation + 'static) -> Self {
        self.presentation = Box::new(presentation);
        self
    }

    pub fn with_audio(mut self, audio: impl AudioPlayer + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self::new()
    }
}

//=== InMemoryWordSource ==================================================

/// Word source backed by plain collections.
///
/// A persisted word pool replaces the available words, matching how a
/// customized list survives in browser storage.
#[derive(Debug, Default, Clone)]
pub struct InMemoryWordSource {
    words: Vec<String>,
    images: HashMap<String, String>,
    saved_score: Option<u32>,
}

impl InMemoryWordSource {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, word: impl Into<String>, url: impl Into<String>) -> Self {
        self.images.insert(word.into(), url.into());
        self
    }

    /// Last persisted score, if any.
    pub fn saved_score(&self) -> Option<u32> {
        self.saved_score
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl WordSource for InMemoryWordSource {
    fn available_words(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.words.clone())
    }

    fn image_for(&self, word: &str) -> Result<Option<String>, SourceError> {
        Ok(self.images.get(word).cloned())
    }

    fn persist_score(&mut self, score: u32) -> Result<(), SourceError> {
        debug!("Persisting score {}", score);
        self.saved_score = Some(score);
        Ok(())
    }

    fn persist_word_pool(&mut self, words: &[String]) -> Result<(), SourceError> {
        debug!("Persisting word pool of {} words", words.len());
        self.words = words.to_vec();
        Ok(())
    }
}

//=========================================================================
// Test Doubles
//=========================================================================


//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_source_is_empty_and_accepts_writes() {
        let mut source = NullWordSource;
        assert_eq!(source.available_words(), Ok(Vec::new()));
        assert_eq!(source.image_for("cat"), Ok(None));
        assert!(source.persist_score(10).is_ok());
        assert!(source.persist_word_pool(&[]).is_ok());
    }

    #[test]
    fn in_memory_source_serves_words_and_images() {
        let source = InMemoryWordSource::new(["cat", "dog"]).with_image("cat", "img/cat.png");

        assert_eq!(source.available_words().unwrap(), vec!["cat", "dog"]);
        assert_eq!(
            source.image_for("cat").unwrap().as_deref(),
            Some("img/cat.png")
        );
        assert_eq!(source.image_for("dog").unwrap(), None);
    }

    #[test]
    fn in_memory_source_persists_score_and_pool() {
        let mut source = InMemoryWordSource::new(["cat"]);
        source.persist_score(42).unwrap();
        source
            .persist_word_pool(&["owl".to_string(), "fox".to_string()])
            .unwrap();

        assert_eq!(source.saved_score(), Some(42));
        assert_eq!(source.words(), ["owl", "fox"]);
        assert_eq!(source.available_words().unwrap(), vec!["owl", "fox"]);
    }
}
