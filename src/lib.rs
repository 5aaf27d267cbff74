//=========================================================================
// Word Unscramble: Library Root
//
// This crate defines the coordination core of a word unscrambling game.
//
// Responsibilities:
// - Expose the session facade (`GameSession`, `GameSessionBuilder`)
// - Expose the core systems for hosts that wire their own session
// - Keep rendering, audio and storage behind collaborator traits
//
// Typical usage:
// ```no_run
// use std::time::Duration;
// use word_unscramble::GameSessionBuilder;
//
// let mut session = GameSessionBuilder::new().build().unwrap();
// session.start();
// loop {
//     session.pump(Duration::from_millis(16));
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the bus, state store, round flow and input model.
// Most hosts only need the `GameSession` facade and the prelude.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `session` wires the core systems into a single driver.
//
mod session;

//--- Public Exports ------------------------------------------------------

pub use session::{GameSession, GameSessionBuilder, PumpReport};
