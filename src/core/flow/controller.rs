//=========================================================================
// Word Flow Controller
//=========================================================================
//
// Orchestrates rounds: loads the next word, evaluates assembled answers,
// applies hints, awards score, and drives celebration and auto-advance.
//
// All game state goes through the GameStateStore; the controller keeps
// only flow bookkeeping (phase, round token, pending task, board model).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;
use std::time::Duration;

use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::{AnswerOutcome, FlowPhase, HintOutcome, LoadOutcome};
use crate::core::collaborators::{Collaborators, Sound};
use crate::core::config::GameConfig;
use crate::core::error::FlowError;
use crate::core::event_bus::{names, EventBus, EventPayload};
use crate::core::input::{BoardOutcome, GestureEvent, LetterBoard};
use crate::core::schedule::{RoundId, ScheduledTask, Scheduler, TaskHandle};
use crate::core::scramble::scramble_with;
use crate::core::state::{GameStateStore, StatePatch};
use crate::core::words::{self, FALLBACK_SCRAMBLE, FALLBACK_WORD};

//=== PreparedRound =======================================================

struct PreparedRound {
    word: String,
    scrambled: String,
    image: Option<String>,
    remaining: Vec<String>,
}

struct LoadFailure {
    reason: String,
    remaining: Vec<String>,
}

//=== WordFlowController ==================================================

/// The round state machine.
///
/// Entry points ([`load_next_word`](Self::load_next_word),
/// [`check_answer`](Self::check_answer), [`show_hint`](Self::show_hint),
/// [`handle_gesture`](Self::handle_gesture)) never panic or propagate
/// collaborator failures; they report an outcome and leave the board in a
/// playable state.
pub struct WordFlowController {
    store: Rc<GameStateStore>,
    bus: Rc<EventBus>,
    collaborators: Collaborators,
    config: GameConfig,
    rng: StdRng,
    board: LetterBoard,
    scheduler: Scheduler,
    pending: Option<TaskHandle>,
    phase: FlowPhase,
    round: RoundId,
}

impl WordFlowController {
    //--- Construction -----------------------------------------------------

    pub fn new(
        store: Rc<GameStateStore>,
        bus: Rc<EventBus>,
        collaborators: Collaborators,
        config: GameConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            store,
            bus,
            collaborators,
            config,
            rng,
            board: LetterBoard::new(),
            scheduler: Scheduler::new(),
            pending: None,
            phase: FlowPhase::Idle,
            round: RoundId::default(),
        }
    }

    //--- Round Loading ----------------------------------------------------

    /// Starts a new round.
    ///
    /// Picks a word uniformly at random from the remaining pool (refilling
    /// it from the word source, then from the configured defaults, when
    /// empty), removes it from the pool, scrambles it and writes the round
    /// into the store in a single update. Any pending celebration or
    /// advance is cancelled first.
    ///
    /// When no word can be produced, the fixed fallback round is loaded
    /// and `wordLoadFailed` is published.
    pub fn load_next_word(&mut self) -> LoadOutcome {
        self.cancel_pending();
        self.round = self.round.next();

        match self.prepare_round() {
            Ok(prepared) => {
                self.store.update(
                    StatePatch::new()
                        .hint_used(false)
                        .current_word(prepared.word.clone())
                        .scrambled_word(prepared.scrambled.clone())
                        .current_image_url(prepared.image.unwrap_or_default())
                        .available_words(prepared.remaining),
                );
                info!(
                    "Round {} loaded: '{}' ({} words left)",
                    self.round,
                    prepared.word,
                    self.store.available_words().len()
                );
                self.begin_round(&prepared.word, &prepared.scrambled);
                LoadOutcome::Loaded {
                    word: prepared.word,
                }
            }
            Err(LoadFailure { reason, remaining }) => {
                error!("Word load failed ({}), using fallback round", reason);
                self.store.update(
                    StatePatch::new()
                        .hint_used(false)
                        .current_word(FALLBACK_WORD)
                        .scrambled_word(FALLBACK_SCRAMBLE)
                        .current_image_url("")
                        .available_words(remaining),
                );
                self.emit(EventPayload::WordLoadFailed {
                    reason: reason.clone(),
                    fallback_word: FALLBACK_WORD.to_string(),
                });
                self.begin_round(FALLBACK_WORD, FALLBACK_SCRAMBLE);
                LoadOutcome::Fallback {
                    word: FALLBACK_WORD.to_string(),
                    reason,
                }
            }
        }
    }

    /// Explicit "next word" request, e.g. from a skip button.
    ///
    /// Safe at any phase: a pending auto-advance is cancelled so the round
    /// advances exactly once.
    pub fn next_word(&mut self) -> LoadOutcome {
        if self.pending.is_some() {
            debug!("Next word requested while a transition is pending");
        }
        self.load_next_word()
    }

    //--- Answer Evaluation ------------------------------------------------

    /// Compares `assembled_answer` to the current word, ignoring case.
    ///
    /// A correct answer awards points (reduced if a hint was used this
    /// round), persists the score and schedules the celebration. An
    /// incorrect answer only notifies; the round stays active.
    pub fn check_answer(&mut self, assembled_answer: &str) -> AnswerOutcome {
        if !self.phase.accepts_input() {
            debug!("Ignoring answer '{}' in phase {:?}", assembled_answer, self.phase);
            return AnswerOutcome::Ignored;
        }

        let word = self.store.current_word();
        if word.is_empty() {
            warn!("Answer submitted without a current word");
            return AnswerOutcome::Ignored;
        }

        self.phase = FlowPhase::Evaluating;
        if assembled_answer.to_lowercase() == word.to_lowercase() {
            self.accept_answer(&word)
        } else {
            self.reject_answer(assembled_answer, &word)
        }
    }

    //--- Hints ------------------------------------------------------------

    /// Places the current word's first letter into the first slot.
    ///
    /// Allowed once per round. If the placement fills the board, the
    /// regular evaluation path runs, scored as a hinted round. When the
    /// first slot already holds the right letter nothing is revealed and
    /// the hint stays available.
    pub fn show_hint(&mut self) -> HintOutcome {
        if !self.phase.accepts_input() {
            debug!("Hint unavailable in phase {:?}", self.phase);
            return HintOutcome::Unavailable;
        }
        if self.store.hint_used() {
            return HintOutcome::AlreadyUsed;
        }

        let Some(letter) = self.store.current_word().chars().next() else {
            return HintOutcome::Unavailable;
        };
        let Some(outcome) = self.board.place_letter(letter, 0) else {
            warn!("Board has no tile '{}' for the hint", letter);
            return HintOutcome::Unavailable;
        };
        if outcome.moves.is_empty() {
            debug!("First slot already holds '{}', hint not charged", letter);
            return HintOutcome::Unavailable;
        }

        self.store.update(StatePatch::new().hint_used(true));
        self.collaborators.presentation.place_hint(letter, 0);
        self.collaborators.audio.play(Sound::Hint);
        self.emit(EventPayload::HintShown { letter, slot: 0 });

        let answer = self.process_board(outcome);
        HintOutcome::Revealed { letter, answer }
    }

    //--- Input ------------------------------------------------------------

    /// Applies a gesture from the input layer.
    ///
    /// Returns the evaluation result when the gesture completed a new
    /// full arrangement. Gestures outside an active round are ignored.
    pub fn handle_gesture(&mut self, gesture: GestureEvent) -> Option<AnswerOutcome> {
        if !self.phase.accepts_input() {
            debug!("Ignoring {:?} in phase {:?}", gesture, self.phase);
            return None;
        }

        let outcome = self.board.apply(gesture);
        if !outcome.moves.is_empty() {
            self.collaborators.audio.play(Sound::LetterDrop);
        }
        self.process_board(outcome)
    }

    //--- Timers -----------------------------------------------------------

    /// Advances the flow clock, running celebration and auto-advance
    /// transitions that came due.
    ///
    /// Returns the tasks that ran; tasks left over from an earlier round
    /// are dropped.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<ScheduledTask> {
        let mut ran = Vec::new();

        for task in self.scheduler.advance(elapsed) {
            // Cancellation normally removes these; the token check still
            // holds if a task outlives its round.
            if task.round() != self.round {
                warn!("Dropping stale {:?} (current round {})", task, self.round);
                continue;
            }

            self.pending = None;
            match task {
                ScheduledTask::Celebrate(_) => self.start_celebration(),
                ScheduledTask::Advance(_) => {
                    self.load_next_word();
                }
            }
            ran.push(task);
        }
        ran
    }

    //--- Session Management -----------------------------------------------

    /// Cancels pending transitions, clears the board and zeroes the store.
    pub fn reset_game(&mut self) {
        self.cancel_pending();
        self.round = self.round.next();
        self.board.clear();
        self.phase = FlowPhase::Idle;
        self.store.reset_state();
        info!("Game reset");
    }

    /// Replaces the session word pool with a sanitized copy of `list` and
    /// persists it.
    ///
    /// The round in progress is not affected. Returns the number of words
    /// kept; persistence failures are logged and tolerated.
    pub fn replace_word_list<I, S>(&mut self, list: I) -> Result<usize, FlowError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pool = words::sanitize_word_list(list);
        if pool.is_empty() {
            warn!("Rejected word list without playable words");
            return Err(FlowError::EmptyWordList);
        }

        if let Err(err) = self.collaborators.words.persist_word_pool(&pool) {
            warn!("Word list not persisted: {}", err);
        }

        let count = pool.len();
        self.store.update(StatePatch::new().available_words(pool));
        info!("Word list replaced ({} words)", count);
        Ok(count)
    }

    //--- Query API --------------------------------------------------------

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn round(&self) -> RoundId {
        self.round
    }

    pub fn board(&self) -> &LetterBoard {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// True while a celebration or auto-advance is scheduled.
    pub fn has_pending_transition(&self) -> bool {
        self.pending.is_some()
    }

    //--- Internal Helpers -------------------------------------------------

    fn prepare_round(&mut self) -> Result<PreparedRound, LoadFailure> {
        let mut pool = self.store.available_words();
        if pool.is_empty() {
            pool = self.replenish_pool();
        }
        if pool.is_empty() {
            return Err(LoadFailure {
                reason: "no words available from source or defaults".to_string(),
                remaining: pool,
            });
        }

        // Unplayable entries are consumed too, so they cannot come back.
        let word = pool.swap_remove(self.rng.gen_range(0..pool.len()));
        if !words::is_playable(&word) {
            return Err(LoadFailure {
                reason: format!("unplayable word {:?} in pool", word),
                remaining: pool,
            });
        }

        let image = match self.collaborators.words.image_for(&word) {
            Ok(image) => image,
            Err(err) => {
                warn!("No image for '{}': {}", word, err);
                None
            }
        };
        let scrambled = scramble_with(&word, &mut self.rng);

        Ok(PreparedRound {
            word,
            scrambled,
            image,
            remaining: pool,
        })
    }

    fn replenish_pool(&mut self) -> Vec<String> {
        let fresh = match self.collaborators.words.available_words() {
            Ok(list) => words::sanitize_word_list(list),
            Err(err) => {
                warn!("Word source failed: {}", err);
                Vec::new()
            }
        };

        if fresh.is_empty() {
            warn!("Word source is empty, using default words");
            return words::sanitize_word_list(&self.config.default_words);
        }
        debug!("Replenished word pool with {} words", fresh.len());
        fresh
    }

    fn begin_round(&mut self, word: &str, scrambled: &str) {
        let slot_count = word.chars().count();
        self.board.load(scrambled, slot_count);
        self.collaborators
            .presentation
            .render_round(scrambled, slot_count);
        self.phase = FlowPhase::RoundActive;

        self.emit(EventPayload::RoundLoaded {
            round: self.round,
            word: word.to_string(),
            scrambled: scrambled.to_string(),
        });
    }

    /// Publishes board moves and evaluates a newly filled board.
    fn process_board(&mut self, outcome: BoardOutcome) -> Option<AnswerOutcome> {
        for mv in &outcome.moves {
            self.emit(EventPayload::LetterMoved {
                tile: mv.tile,
                from: mv.from,
                to: mv.to,
            });
        }

        if !outcome.filled {
            return None;
        }

        self.bus.publish(names::ALL_SLOTS_FILLED, &EventPayload::Empty);
        let answer = self.board.assembled_answer();
        Some(self.check_answer(&answer))
    }

    fn accept_answer(&mut self, word: &str) -> AnswerOutcome {
        // Hint status is fixed here, once, for this round.
        let hint_used = self.store.hint_used();
        let awarded = self.config.points_for(hint_used);
        let score = self.store.score().saturating_add(awarded);

        self.store.update(StatePatch::new().score(score));
        if let Err(err) = self.collaborators.words.persist_score(score) {
            warn!("Score not persisted: {}", err);
        }

        self.collaborators.presentation.mark_slots_correct();
        self.collaborators.audio.play(Sound::Correct);
        self.collaborators.audio.announce(word);
        self.emit(EventPayload::AnswerCorrect {
            word: word.to_string(),
            score,
            awarded,
        });

        info!(
            "Round {} solved: '{}' +{} (hint: {}), score {}",
            self.round, word, awarded, hint_used, score
        );

        self.phase = FlowPhase::Solved;
        self.schedule(self.config.celebration_delay(), ScheduledTask::Celebrate(self.round));
        AnswerOutcome::Correct { awarded, score }
    }

    fn reject_answer(&mut self, assembled_answer: &str, word: &str) -> AnswerOutcome {
        debug!("Incorrect answer '{}' for '{}'", assembled_answer, word);
        self.collaborators.audio.play(Sound::Incorrect);
        self.emit(EventPayload::AnswerIncorrect {
            assembled_answer: assembled_answer.to_string(),
            correct_word: word.to_string(),
        });
        self.phase = FlowPhase::RoundActive;
        AnswerOutcome::Incorrect
    }

    fn start_celebration(&mut self) {
        let word = self.store.current_word();
        debug!("Celebrating '{}'", word);

        self.phase = FlowPhase::Celebrating;
        self.collaborators.presentation.show_celebration();
        self.collaborators.audio.play(Sound::Celebration);
        self.emit(EventPayload::CelebrationStarted { word });
        self.schedule(self.config.advance_delay(), ScheduledTask::Advance(self.round));
    }

    fn schedule(&mut self, delay: Duration, task: ScheduledTask) {
        self.cancel_pending();
        self.pending = Some(self.scheduler.schedule(delay, task));
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            if self.scheduler.cancel(handle) {
                debug!("Cancelled pending transition");
            }
        }
    }

    fn emit(&self, payload: EventPayload) {
        if let Some(event) = payload.event_name() {
            self.bus.publish(event, &payload);
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
