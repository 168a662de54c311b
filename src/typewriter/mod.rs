//! Typewriter: incremental text reveal.
//!
//! A [`Reveal`] exposes a string one unit at a time on a fixed cadence to
//! simulate live typing or a streamed response. It never sleeps: the owner
//! polls it with the current instant and every unit that has come due is
//! reported, in order, to the caller's sink.
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use showreel::typewriter::{RevealUnit, Typewriter};
//!
//! let start = Instant::now();
//! let mut reveal = Typewriter::new(RevealUnit::Grapheme, Duration::from_millis(50))
//!     .reveal("hi", start);
//!
//! let mut seen = Vec::new();
//! reveal.poll(start + Duration::from_millis(50), |partial| seen.push(partial.to_string()));
//! assert_eq!(seen, ["h", "hi"]);
//! ```

mod reveal;
mod units;

pub use reveal::{CancelToken, Reveal, RevealStatus, Typewriter};
pub use units::{unit_count, unit_ends, RevealUnit};
