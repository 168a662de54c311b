//! Sequencer: plays a script, yields to real input.
//!
//! The sequencer walks a [`Script`](crate::script::Script) step by step in
//! autoplay mode, dispatching each step's effect through the host's
//! [`EffectHandlers`] and holding each step for its duration. The first
//! genuine user input flips it to interactive mode for good: every pending
//! reveal and timer is released and no scripted effect runs again until an
//! explicit replay.
//!
//! ```text
//!            start             interrupt
//!   Idle ───────────▶ Running ───────────▶ Interactive
//!                      │   ▲                    │
//!          end/Finish  │   │ loop pause         │ replay
//!                      ▼   │                    │
//!                    Finished ◀─────────────────┘ (via Running)
//! ```

mod effects;
mod sequencer;
mod state;
mod timer;

pub use effects::EffectHandlers;
pub use sequencer::{InterruptHandle, Sequencer};
pub use state::{Mode, Phase, SequencerState};
