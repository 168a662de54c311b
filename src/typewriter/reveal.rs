//! Reveal state machine and its cancel token.

use super::units::{unit_ends, RevealUnit};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared cancellation flag for a [`Reveal`].
///
/// Clones observe the same flag, so a token handed to another thread can
/// stop a reveal owned elsewhere. Cancellation is permanent.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    canceled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a live token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the reveal. No partial is reported after this returns.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    /// Check whether the token has been canceled.
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }
}

/// Outcome of polling a [`Reveal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStatus {
    /// More units are scheduled.
    Pending,
    /// The whole text has been reported.
    Complete,
    /// The reveal was canceled; it will never report again.
    Canceled,
}

/// Reveal configuration: unit granularity and cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Typewriter {
    unit: RevealUnit,
    unit_delay: Duration,
}

impl Typewriter {
    /// Create a typewriter revealing one `unit` every `unit_delay`.
    ///
    /// A zero delay is allowed: every unit is then due on the first poll and
    /// is still reported one prefix at a time, in order.
    pub const fn new(unit: RevealUnit, unit_delay: Duration) -> Self {
        Self { unit, unit_delay }
    }

    /// Unit granularity.
    pub const fn unit(&self) -> RevealUnit {
        self.unit
    }

    /// Delay between units.
    pub const fn unit_delay(&self) -> Duration {
        self.unit_delay
    }

    /// Schedule a reveal of `text` whose first unit is due at `started`.
    pub fn reveal(&self, text: impl Into<String>, started: Instant) -> Reveal {
        Reveal::new(text.into(), self.unit, self.unit_delay, started)
    }
}

/// An in-flight reveal of one string.
///
/// Unit `k` (counting from zero) comes due at `started + k * unit_delay`, so
/// the first unit appears as soon as the reveal is polled. Every reported
/// value is a strictly longer prefix of the text than the one before, and
/// the final report is the full text.
///
/// Empty text is reported once, as the empty string, so a sink that shows
/// the latest partial is always left holding the finished value.
#[derive(Debug)]
pub struct Reveal {
    text: String,
    /// Byte end of the prefix reported after each unit.
    ends: Vec<usize>,
    /// Units already reported.
    emitted: usize,
    started: Instant,
    unit_delay: Duration,
    token: CancelToken,
}

impl Reveal {
    fn new(text: String, unit: RevealUnit, unit_delay: Duration, started: Instant) -> Self {
        let mut ends = unit_ends(&text, unit);
        if ends.is_empty() {
            ends.push(0);
        }

        Self {
            text,
            ends,
            emitted: 0,
            started,
            unit_delay,
            token: CancelToken::new(),
        }
    }

    /// A token that cancels this reveal.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Cancel this reveal.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The full text being revealed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The prefix reported so far.
    pub fn current(&self) -> &str {
        match self.emitted {
            0 => "",
            n => &self.text[..self.ends[n - 1]],
        }
    }

    /// Number of reports a full reveal makes.
    pub fn unit_count(&self) -> usize {
        self.ends.len()
    }

    /// Whether the full text has been reported.
    pub fn is_complete(&self) -> bool {
        self.emitted == self.ends.len()
    }

    /// When the next unit comes due, if any remain and the reveal is live.
    pub fn next_due(&self) -> Option<Instant> {
        if self.is_complete() || self.token.is_canceled() {
            return None;
        }
        self.due_at(self.emitted)
    }

    /// Report every unit due at `now`.
    pub fn poll(&mut self, now: Instant, on_partial: impl FnMut(&str)) -> RevealStatus {
        self.poll_while(now, || true, on_partial)
    }

    /// Report every unit due at `now` while `live` holds.
    ///
    /// `live` and the cancel token are both checked before each unit, so a
    /// cancellation from another thread takes effect between units.
    pub fn poll_while(
        &mut self,
        now: Instant,
        live: impl FnMut() -> bool,
        on_partial: impl FnMut(&str),
    ) -> RevealStatus {
        self.advance(Some(now), live, on_partial)
    }

    /// Report every remaining unit immediately while `live` holds.
    pub fn flush(&mut self, live: impl FnMut() -> bool, on_partial: impl FnMut(&str)) -> RevealStatus {
        self.advance(None, live, on_partial)
    }

    fn advance(
        &mut self,
        until: Option<Instant>,
        mut live: impl FnMut() -> bool,
        mut on_partial: impl FnMut(&str),
    ) -> RevealStatus {
        loop {
            if self.token.is_canceled() || !live() {
                return RevealStatus::Canceled;
            }
            if self.is_complete() {
                return RevealStatus::Complete;
            }
            if let Some(now) = until {
                match self.due_at(self.emitted) {
                    Some(due) if due <= now => {}
                    _ => return RevealStatus::Pending,
                }
            }

            self.emitted += 1;
            on_partial(&self.text[..self.ends[self.emitted - 1]]);
        }
    }

    fn due_at(&self, unit: usize) -> Option<Instant> {
        let steps = u32::try_from(unit).unwrap_or(u32::MAX);
        self.started.checked_add(self.unit_delay.saturating_mul(steps))
    }
}
