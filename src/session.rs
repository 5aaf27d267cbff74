//=========================================================================
// Game Session
//
// Top-level entry point that wires the coordination core together.
//
// Architecture:
// ```text
//     GameSessionBuilder  ──build()──>  GameSession  ──start()──>  [Round 1]
//         │                                 │
//         ├─ with_config()                  ├─ pump(elapsed)
//         ├─ with_word_source()             │    ├─ drain gestures
//         ├─ with_presentation()            │    ├─ apply to board / evaluate
//         ├─ with_audio()                   │    └─ run due timers
//         ├─ with_seed()                    │
//         └─ with_channel_capacity()        └─ gesture_sender() ──> input layer
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;
use std::time::Duration;

use crossbeam_channel::{bounded, Sender};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use crate::core::collaborators::{
    AudioPlayer, Collaborators, InMemoryWordSource, Presentation, WordSource,
};
use crate::core::config::GameConfig;
use crate::core::error::{BusError, ConfigError, FlowError};
use crate::core::event_bus::{EventBus, Handler};
use crate::core::flow::{AnswerOutcome, FlowPhase, HintOutcome, LoadOutcome, WordFlowController};
use crate::core::input::{CollectStatus, GestureCollector, GestureEvent, LetterBoard};
use crate::core::schedule::ScheduledTask;
use crate::core::state::{GameState, GameStateStore};
use crate::core::words;

//=== GameSessionBuilder ==================================================

/// Builder for configuring and constructing a [`GameSession`].
///
/// # Default Values
///
/// - **Config**: [`GameConfig::default`]
/// - **Word source**: in-memory source over the built-in word list
/// - **Presentation / audio**: null objects
/// - **Seed**: drawn from the OS
/// - **Channel capacity**: 64 gestures
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use word_unscramble::GameSessionBuilder;
///
/// let mut session = GameSessionBuilder::new()
///     .with_seed(42)
///     .build()
///     .expect("valid config");
///
/// session.start();
/// session.pump(Duration::from_millis(16));
/// ```
pub struct GameSessionBuilder {
    config: GameConfig,
    collaborators: Collaborators,
    seed: Option<u64>,
    channel_capacity: usize,
}

impl GameSessionBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            collaborators: Collaborators::new()
                .with_words(InMemoryWordSource::new(words::default_words())),
            seed: None,
            channel_capacity: 64,
        }
    }

    /// Replaces the game configuration. Validated by [`build`](Self::build).
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_word_source(mut self, source: impl WordSource + 'static) -> Self {
        self.collaborators = self.collaborators.with_words(source);
        self
    }

    pub fn with_presentation(mut self, presentation: impl Presentation + 'static) -> Self {
        self.collaborators = self.collaborators.with_presentation(presentation);
        self
    }

    pub fn with_audio(mut self, audio: impl AudioPlayer + 'static) -> Self {
        self.collaborators = self.collaborators.with_audio(audio);
        self
    }

    /// Fixes the RNG seed so word order and scrambles are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the capacity of the input layer → session gesture channel.
    ///
    /// Default: 64
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Validates the configuration and assembles the session.
    ///
    /// No round is loaded until [`GameSession::start`].
    pub fn build(self) -> Result<GameSession, ConfigError> {
        self.config.validate()?;

        info!(
            "Building game session (seed: {:?}, channel: {}, batch: {})",
            self.seed, self.channel_capacity, self.config.gesture_batch_limit
        );

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let bus = Rc::new(EventBus::new());
        let store = Rc::new(GameStateStore::new(bus.clone()));
        let (sender, receiver) = bounded(self.channel_capacity);
        let collector = GestureCollector::new(receiver, self.config.gesture_batch_limit);
        let controller = WordFlowController::new(
            store.clone(),
            bus.clone(),
            self.collaborators,
            self.config,
            rng,
        );

        Ok(GameSession {
            bus,
            store,
            controller,
            collector,
            sender: Some(sender),
            input_connected: true,
        })
    }
}

impl Default for GameSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== PumpReport ==========================================================

/// What happened during one [`GameSession::pump`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PumpReport {
    pub gestures: usize,
    pub answers: Vec<AnswerOutcome>,
    pub tasks: Vec<ScheduledTask>,
}

//=== GameSession =========================================================

/// A running game: bus, state store, round flow and gesture intake.
///
/// Single-threaded. The only handle meant for other threads is the
/// gesture [`Sender`] from [`gesture_sender`](Self::gesture_sender).
/// Once every sender is dropped the session stops polling for gestures;
/// timers keep running.
pub struct GameSession {
    bus: Rc<EventBus>,
    store: Rc<GameStateStore>,
    controller: WordFlowController,
    collector: GestureCollector,
    sender: Option<Sender<GestureEvent>>,
    input_connected: bool,
}

impl GameSession {
    //--- Lifecycle --------------------------------------------------------

    /// Loads the first round.
    pub fn start(&mut self) -> LoadOutcome {
        info!("Starting game session");
        self.controller.load_next_word()
    }

    /// Runs one frame of the session.
    ///
    /// 1. Drains pending gestures (bounded batch)
    /// 2. Applies them to the board, evaluating new full arrangements
    /// 3. Advances the clock by `elapsed`, running due transitions
    pub fn pump(&mut self, elapsed: Duration) -> PumpReport {
        let mut report = PumpReport::default();

        //--- Step 1: Gather gestures --------------------------------------
        if self.input_connected {
            if let CollectStatus::Disconnected = self.collector.collect() {
                warn!("Gesture channel disconnected");
                self.input_connected = false;
            }
        }

        //--- Step 2: Apply to board ---------------------------------------
        for gesture in self.collector.take_gestures() {
            report.gestures += 1;
            if let Some(answer) = self.controller.handle_gesture(gesture) {
                report.answers.push(answer);
            }
        }

        //--- Step 3: Run timers -------------------------------------------
        report.tasks = self.controller.tick(elapsed);

        if report.gestures > 0 || !report.tasks.is_empty() {
            debug!(
                "Pump: {} gestures, {} answers, {} tasks",
                report.gestures,
                report.answers.len(),
                report.tasks.len()
            );
        }
        report
    }

    /// Hands the gesture sender over to the external input layer.
    ///
    /// The session keeps no copy, so dropping every clone of the returned
    /// sender disconnects the channel. Returns `None` once handed out.
    pub fn gesture_sender(&mut self) -> Option<Sender<GestureEvent>> {
        let sender = self.sender.take();
        if sender.is_none() {
            warn!("Gesture sender already handed out");
        }
        sender
    }

    //--- Events -----------------------------------------------------------

    /// Registers `handler` for `event` on the session bus.
    pub fn subscribe(&self, event: &str, handler: Handler) -> Result<bool, BusError> {
        self.bus.subscribe(event, handler)
    }

    pub fn unsubscribe(&self, event: &str, handler: &Handler) -> bool {
        self.bus.unsubscribe(event, handler)
    }

    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    pub fn store(&self) -> &Rc<GameStateStore> {
        &self.store
    }

    //--- Player Requests --------------------------------------------------

    pub fn show_hint(&mut self) -> HintOutcome {
        self.controller.show_hint()
    }

    pub fn check_answer(&mut self, assembled_answer: &str) -> AnswerOutcome {
        self.controller.check_answer(assembled_answer)
    }

    pub fn next_word(&mut self) -> LoadOutcome {
        self.controller.next_word()
    }

    pub fn reset_game(&mut self) {
        self.controller.reset_game();
    }

    pub fn replace_word_list<I, S>(&mut self, list: I) -> Result<usize, FlowError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.controller.replace_word_list(list)
    }

    //--- Query API --------------------------------------------------------

    pub fn state(&self) -> GameState {
        self.store.snapshot()
    }

    pub fn phase(&self) -> FlowPhase {
        self.controller.phase()
    }

    pub fn board(&self) -> &LetterBoard {
        self.controller.board()
    }

    pub fn config(&self) -> &GameConfig {
        self.controller.config()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
