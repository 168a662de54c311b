//! # Showreel
//!
//! A scripted interaction sequencer for product demos.
//!
//! Showreel plays a fixed, timed script of UI steps (type a prompt, wait,
//! switch view, stream a response) to simulate a live session, and hands
//! control to the real user the instant they touch anything.
//!
//! ## Core Concepts
//!
//! - **Script**: an immutable list of [`Step`]s, each with an action and a
//!   duration
//! - **Typewriter**: reveals text one grapheme or word at a time
//! - **Sequencer**: a cooperative state machine that dispatches steps in
//!   order, with structural cancellation on interrupt, replay, and teardown
//! - **Actor model**: optional input and ticker threads feeding a
//!   single-threaded [`Player`] loop
//!
//! ## Example
//!
//! ```rust,ignore
//! use showreel::{Player, PlayerConfig, Script, Sequencer, Step};
//!
//! let script = Script::new(vec![
//!     Step::type_text("Show me top customers", ms(1200)),
//!     Step::navigate("results", ms(400)),
//!     Step::stream_text("Here are your top 5 customers...", ms(1500)),
//!     Step::finish(),
//! ]);
//!
//! let mut player = Player::new(Sequencer::new(script, screen), PlayerConfig::default());
//! player.run(|sequencer, signal| redraw(sequencer, signal));
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod config;
pub mod error;
pub mod script;
pub mod sequencer;
pub mod typewriter;

// Re-exports for convenience
pub use actor::{Control, InputEvent, InputKind, KeyCode, Player, PlayerExit, Signal};
pub use config::{PlayerConfig, SequencerConfig, ShowreelConfig};
pub use error::{ConfigError, EffectError, SequencerError};
pub use script::{Action, Script, Step, StepKind, ViewId};
pub use sequencer::{EffectHandlers, InterruptHandle, Mode, Phase, Sequencer, SequencerState};
pub use typewriter::{CancelToken, Reveal, RevealUnit, Typewriter};
