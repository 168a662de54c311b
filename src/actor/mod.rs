//! Actor Model: the host-side runtime around a sequencer.
//!
//! This module implements a small actor system using crossbeam channels:
//! - **Input Actor**: Polls terminal events, forwards them to the player
//! - **Ticker Actor**: Emits ticks on a fixed cadence
//! - **Player**: Owns the sequencer; interrupts it on user input and ticks
//!   it on every tick
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │              │   effects
//! └──────────────┘                     │    Player    │ ─────────▶ host
//!                                      │ (Sequencer)  │
//! ┌──────────────┐        Tick         │              │
//! │Ticker Thread │ ─────────────────▶  │              │
//! └──────────────┘                     └──────────────┘
//! ```

mod input;
mod messages;
mod player;
mod ticker;

pub use input::InputActor;
pub use messages::{InputEvent, InputKind, KeyCode, KeyModifiers, MouseButton, MouseEvent};
pub use player::{Control, Player, PlayerExit, Signal};
pub use ticker::{Tick, TickerActor};
