//! Scripts: fixed, timed sequences of demo steps.
//!
//! A script is authored once, usually as compiled-in data, and never
//! changes at runtime. Each [`Step`] pairs an [`Action`] with the time the
//! step occupies before the sequencer moves on.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use showreel::script::{Script, Step};
//!
//! let ms = Duration::from_millis;
//! let script = Script::new(vec![
//!     Step::wait(ms(500)),
//!     Step::type_text("hello", ms(300)).with_unit_delay(ms(50)),
//!     Step::navigate("B", ms(300)),
//!     Step::finish(),
//! ]);
//! assert_eq!(script.total_duration(), ms(1100));
//! ```

mod script;
mod step;

pub use script::{PacingViolation, Script};
pub use step::{Action, Step, StepKind, TextReveal, ViewId};
