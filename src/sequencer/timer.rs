//! Timer slot: the single pending continuation a sequencer owns.

use std::time::Instant;

/// What happens when the armed deadline passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Continuation {
    /// The current step's duration is over.
    StepComplete,
    /// The loop pause after a finished run is over.
    LoopRestart,
}

impl Continuation {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::StepComplete => "step completion",
            Self::LoopRestart => "loop restart",
        }
    }
}

/// Holds at most one deadline. Arming replaces, canceling releases.
#[derive(Debug, Default)]
pub(crate) struct TimerSlot {
    armed: Option<(Continuation, Instant)>,
}

impl TimerSlot {
    pub(crate) fn arm(&mut self, what: Continuation, at: Instant) {
        self.armed = Some((what, at));
    }

    /// Release the pending deadline. Returns whether one was armed.
    pub(crate) fn cancel(&mut self) -> bool {
        self.armed.take().is_some()
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.armed.map(|(_, at)| at)
    }

    /// Disarm and return the continuation if its deadline is at or before `now`.
    pub(crate) fn take_due(&mut self, now: Instant) -> Option<(Continuation, Instant)> {
        match self.armed {
            Some((_, at)) if at <= now => self.armed.take(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_take_due() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::default();
        slot.arm(Continuation::StepComplete, t0 + Duration::from_millis(10));

        assert!(slot.take_due(t0).is_none());
        assert_eq!(slot.deadline(), Some(t0 + Duration::from_millis(10)));

        let due = slot.take_due(t0 + Duration::from_millis(10));
        assert_eq!(
            due,
            Some((Continuation::StepComplete, t0 + Duration::from_millis(10)))
        );
        assert!(slot.deadline().is_none());
    }

    #[test]
    fn test_cancel_releases() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::default();
        assert!(!slot.cancel());

        slot.arm(Continuation::LoopRestart, t0);
        assert!(slot.cancel());
        assert!(slot.take_due(t0 + Duration::from_secs(1)).is_none());
    }
}
