//! The sequencer run loop.

use super::effects::EffectHandlers;
use super::state::{Mode, Phase, SequencerState};
use super::timer::{Continuation, TimerSlot};
use crate::config::SequencerConfig;
use crate::error::{EffectError, SequencerError};
use crate::script::{Action, Script, StepKind};
use crate::typewriter::{Reveal, RevealStatus, Typewriter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Flags shared between a sequencer and its interrupt handles.
#[derive(Debug)]
struct Shared {
    /// Set by user input, cleared only by replay.
    interrupted: AtomicBool,
    /// Cleared on teardown.
    alive: AtomicBool,
}

impl Shared {
    fn interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    fn alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}

/// Cloneable handle that requests interruption from any thread.
///
/// The request is visible immediately through [`Sequencer::mode`],
/// [`Sequencer::phase`], and [`Sequencer::state`], and the reveal in progress
/// stops before its next unit. Timers are released and handlers notified on
/// the owning sequencer's next tick.
#[derive(Debug, Clone)]
pub struct InterruptHandle {
    shared: Arc<Shared>,
}

impl InterruptHandle {
    /// Hand control to the user. No-op once the sequencer is torn down.
    pub fn interrupt(&self) {
        if self.shared.alive() {
            self.shared.interrupted.store(true, Ordering::SeqCst);
        }
    }

    /// Whether the sequencer still exists.
    pub fn is_alive(&self) -> bool {
        self.shared.alive()
    }
}

/// Reveal started by the current step.
#[derive(Debug)]
struct ActiveReveal {
    kind: StepKind,
    reveal: Reveal,
}

/// Plays a [`Script`] through a set of [`EffectHandlers`].
///
/// The sequencer never blocks and owns no threads. The host calls
/// [`tick`](Self::tick) with the current instant, from a frame loop or a
/// timer, and every step, unit, and continuation due by then is applied in
/// script order. Each step starts exactly when the previous one's duration
/// ran out, however coarse the ticks are.
///
/// # Example
///
/// ```rust
/// use std::time::{Duration, Instant};
/// use showreel::{EffectError, EffectHandlers, Phase, Script, Sequencer, Step, ViewId};
///
/// #[derive(Default)]
/// struct Screen { text: String, view: String }
///
/// impl EffectHandlers for Screen {
///     fn on_navigate(&mut self, view: &ViewId) -> Result<(), EffectError> {
///         self.view = view.to_string();
///         Ok(())
///     }
///     fn on_text_partial(&mut self, text: &str) {
///         self.text = text.to_string();
///     }
/// }
///
/// let ms = Duration::from_millis;
/// let script = Script::new(vec![
///     Step::type_text("hello", ms(250)),
///     Step::navigate("results", ms(300)),
///     Step::finish(),
/// ]);
///
/// let t0 = Instant::now();
/// let mut sequencer = Sequencer::new(script, Screen::default());
/// sequencer.start(t0);
/// sequencer.tick(t0 + ms(1000));
///
/// assert_eq!(sequencer.phase(), Phase::Finished);
/// assert_eq!(sequencer.handlers().text, "hello");
/// assert_eq!(sequencer.handlers().view, "results");
/// ```
#[derive(Debug)]
pub struct Sequencer<H: EffectHandlers> {
    script: Script,
    handlers: H,
    config: SequencerConfig,
    state: SequencerState,
    phase: Phase,
    /// The single pending continuation.
    timer: TimerSlot,
    reveal: Option<ActiveReveal>,
    shared: Arc<Shared>,
}

impl<H: EffectHandlers> Sequencer<H> {
    /// Create a sequencer with default configuration.
    pub fn new(script: Script, handlers: H) -> Self {
        Self::with_config(script, handlers, SequencerConfig::default())
    }

    /// Create a sequencer with custom configuration.
    ///
    /// Reveal steps that outlast their own duration are logged as warnings.
    pub fn with_config(script: Script, handlers: H, config: SequencerConfig) -> Self {
        script.warn_pacing(&config);

        let state = SequencerState {
            view_id: config.initial_view.clone(),
            ..SequencerState::default()
        };

        Self {
            script,
            handlers,
            config,
            state,
            phase: Phase::Idle,
            timer: TimerSlot::default(),
            reveal: None,
            shared: Arc::new(Shared {
                interrupted: AtomicBool::new(false),
                alive: AtomicBool::new(true),
            }),
        }
    }

    /// A handle that interrupts this sequencer from another thread.
    pub fn interrupt_handle(&self) -> InterruptHandle {
        InterruptHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// A snapshot of the observable state, including interruptions not yet
    /// applied by a tick.
    pub fn state(&self) -> SequencerState {
        SequencerState {
            mode: self.mode(),
            ..self.state.clone()
        }
    }

    /// The lifecycle phase, including interruptions not yet applied by a tick.
    pub fn phase(&self) -> Phase {
        if self.shared.interrupted() {
            Phase::Interactive
        } else {
            self.phase
        }
    }

    /// The current mode, including interruptions not yet applied by a tick.
    pub fn mode(&self) -> Mode {
        if self.shared.interrupted() {
            Mode::Interactive
        } else {
            self.state.mode
        }
    }

    /// The current cursor.
    pub const fn cursor(&self) -> usize {
        self.state.cursor
    }

    /// The script being played.
    pub const fn script(&self) -> &Script {
        &self.script
    }

    /// The configuration.
    pub const fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// The effect handlers.
    pub const fn handlers(&self) -> &H {
        &self.handlers
    }

    /// The effect handlers, mutably.
    pub fn handlers_mut(&mut self) -> &mut H {
        &mut self.handlers
    }

    /// Whether the sequencer has not been torn down.
    pub fn is_alive(&self) -> bool {
        self.shared.alive()
    }

    /// The earliest instant at which a tick would change anything.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Running => {
                let unit = self.reveal.as_ref().and_then(|a| a.reveal.next_due());
                match (unit, self.timer.deadline()) {
                    (Some(a), Some(b)) => Some(a.min(b)),
                    (a, b) => a.or(b),
                }
            }
            Phase::Finished => self.timer.deadline(),
            Phase::Idle | Phase::Interactive => None,
        }
    }

    /// Begin autoplay at `now`. Only valid while idle.
    pub fn start(&mut self, now: Instant) {
        if !self.is_alive() {
            return;
        }
        if self.phase != Phase::Idle {
            debug!(phase = ?self.phase, "start ignored, sequencer already started");
            return;
        }
        if self.shared.interrupted() {
            self.enter_interactive();
            return;
        }

        debug!(steps = self.script.len(), "autoplay started");
        self.phase = Phase::Running;
        self.begin(now);
        self.drive(now);
    }

    /// Apply everything due at `now`.
    pub fn tick(&mut self, now: Instant) {
        if !self.is_alive() {
            trace!("tick after teardown ignored");
            return;
        }
        if self.shared.interrupted() {
            self.enter_interactive();
            return;
        }
        self.drive(now);
    }

    /// Hand control to the user.
    ///
    /// Cancels the reveal in progress and releases the pending timer. Safe to
    /// call at any time and any number of times.
    pub fn interrupt(&mut self) {
        if !self.is_alive() {
            return;
        }
        self.shared.interrupted.store(true, Ordering::SeqCst);
        self.enter_interactive();
    }

    /// Cancel everything and play the script again from step 0 at `now`.
    pub fn replay(&mut self, now: Instant) {
        if !self.is_alive() {
            return;
        }

        self.cancel_pending();
        self.shared.interrupted.store(false, Ordering::SeqCst);
        self.reset_state();
        debug!(from = ?self.phase, "replaying script");
        self.phase = Phase::Running;
        self.begin(now);
        self.drive(now);
    }

    /// Release every pending continuation and refuse all further work.
    ///
    /// Called automatically on drop.
    pub fn teardown(&mut self) {
        if self.shared.alive.swap(false, Ordering::SeqCst) {
            self.cancel_pending();
            debug!(cursor = self.state.cursor, "sequencer torn down");
        }
    }

    /// Catch up with `now`, applying due units and continuations in order.
    fn drive(&mut self, now: Instant) {
        // A zero-length looping script would otherwise restart forever
        let mut restarted = false;

        loop {
            match self.phase {
                Phase::Running => {
                    self.pump_reveal(now);
                    if self.shared.interrupted() {
                        self.enter_interactive();
                        return;
                    }

                    let Some((what, deadline)) = self.timer.take_due(now) else {
                        return;
                    };
                    self.complete_step(what, deadline);
                }
                Phase::Finished => {
                    if restarted {
                        return;
                    }
                    let Some((what, deadline)) = self.timer.take_due(now) else {
                        return;
                    };
                    if !self.autoplay_continues(what) {
                        return;
                    }

                    debug!(cursor = self.state.cursor, "looping script");
                    self.reset_state();
                    self.phase = Phase::Running;
                    self.begin(deadline);
                    restarted = true;
                }
                Phase::Idle | Phase::Interactive => return,
            }
        }
    }

    /// Guard run before any continuation mutates state.
    fn autoplay_continues(&mut self, what: Continuation) -> bool {
        if self.shared.interrupted() {
            let race = SequencerError::SchedulingRace {
                index: self.state.cursor,
                what: what.as_str(),
            };
            trace!(error = %race, "continuation suppressed");
            self.enter_interactive();
            return false;
        }
        true
    }

    fn begin(&mut self, at: Instant) {
        if self.script.is_empty() {
            self.finish(at);
        } else {
            self.dispatch(0, at);
        }
    }

    fn complete_step(&mut self, what: Continuation, deadline: Instant) {
        if !self.autoplay_continues(what) {
            return;
        }

        let index = self.state.cursor;
        if let Some(active) = self.reveal.take() {
            self.flush_reveal(active);
        }

        let kind = self.script[index].kind();
        self.state.cursor += 1;

        if kind == StepKind::Finish || self.state.cursor == self.script.len() {
            self.finish(deadline);
        } else {
            self.dispatch(self.state.cursor, deadline);
        }
    }

    /// Apply step `index`'s effect and arm its completion at `at + duration`.
    fn dispatch(&mut self, index: usize, at: Instant) {
        self.state.rendered_fragment.clear();

        let step = &self.script[index];
        debug!(
            index,
            kind = step.kind().as_str(),
            duration_ms = step.duration().as_millis(),
            "dispatching step"
        );

        match step.action() {
            Action::Wait | Action::Finish => {}
            Action::Navigate(view) => match self.handlers.on_navigate(view) {
                Ok(()) => self.state.view_id = Some(view.clone()),
                Err(source) => warn_invalid(index, view.as_str(), source),
            },
            Action::Effect { name, payload } => {
                if let Err(source) = self.handlers.on_effect(name, payload.as_deref()) {
                    warn_invalid(index, name, source);
                }
            }
            Action::TypeText(_) | Action::StreamText(_) => {
                if let Some((text, unit)) = step.reveal() {
                    let delay = text
                        .unit_delay
                        .or_else(|| self.config.unit_delay_for(step.kind()))
                        .unwrap_or_default();
                    self.reveal = Some(ActiveReveal {
                        kind: step.kind(),
                        reveal: Typewriter::new(unit, delay).reveal(text.text.clone(), at),
                    });
                }
            }
        }

        // Fail open: an unrepresentable deadline completes the step right away
        let deadline = at.checked_add(step.duration()).unwrap_or(at);
        self.timer.arm(Continuation::StepComplete, deadline);
    }

    /// Report every unit of the current reveal due at `now`.
    fn pump_reveal(&mut self, now: Instant) {
        let Some(active) = self.reveal.as_mut() else {
            return;
        };

        let kind = active.kind;
        let shared = &self.shared;
        let handlers = &mut self.handlers;
        let fragment = &mut self.state.rendered_fragment;

        let status = active.reveal.poll_while(
            now,
            || shared.alive() && !shared.interrupted(),
            |partial| {
                fragment.clear();
                fragment.push_str(partial);
                emit_partial(&mut *handlers, kind, partial);
            },
        );

        if status != RevealStatus::Pending {
            self.reveal = None;
        }
    }

    /// Finish a reveal whose step ran out before the text did.
    fn flush_reveal(&mut self, mut active: ActiveReveal) {
        if active.reveal.is_complete() {
            return;
        }
        debug!(
            index = self.state.cursor,
            shown = active.reveal.current().len(),
            total = active.reveal.text().len(),
            "reveal outlasted its step, flushing"
        );

        let kind = active.kind;
        let shared = &self.shared;
        let handlers = &mut self.handlers;
        let fragment = &mut self.state.rendered_fragment;
        active.reveal.flush(
            || shared.alive() && !shared.interrupted(),
            |partial| {
                fragment.clear();
                fragment.push_str(partial);
                emit_partial(&mut *handlers, kind, partial);
            },
        );
    }

    fn finish(&mut self, at: Instant) {
        debug!(cursor = self.state.cursor, "autoplay finished");
        self.phase = Phase::Finished;
        self.handlers.on_finish();

        if let Some(pause) = self.config.loop_pause {
            let deadline = at.checked_add(pause).unwrap_or(at);
            self.timer.arm(Continuation::LoopRestart, deadline);
        }
    }

    fn enter_interactive(&mut self) {
        if self.phase == Phase::Interactive {
            return;
        }

        self.cancel_pending();
        debug!(cursor = self.state.cursor, from = ?self.phase, "autoplay interrupted");
        self.state.mode = Mode::Interactive;
        self.phase = Phase::Interactive;
        self.handlers.on_interrupt();
    }

    fn cancel_pending(&mut self) {
        if let Some(active) = self.reveal.take() {
            active.reveal.cancel();
        }
        self.timer.cancel();
    }

    /// Clear progress and put the host back on the initial view, if any.
    fn reset_state(&mut self) {
        self.state = SequencerState::default();

        let Some(view) = self.config.initial_view.as_ref() else {
            return;
        };
        match self.handlers.on_navigate(view) {
            Ok(()) => self.state.view_id = Some(view.clone()),
            Err(source) => warn_invalid(0, view.as_str(), source),
        }
    }
}

impl<H: EffectHandlers> Drop for Sequencer<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn emit_partial<H: EffectHandlers>(handlers: &mut H, kind: StepKind, partial: &str) {
    if kind == StepKind::StreamText {
        handlers.on_stream_partial(partial);
    } else {
        handlers.on_text_partial(partial);
    }
}

fn warn_invalid(index: usize, reference: &str, source: EffectError) {
    let error = SequencerError::InvalidStepReference {
        index,
        reference: reference.to_string(),
        source,
    };
    warn!(%error, "skipping step effect");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{Step, ViewId};
    use std::time::Duration;

    const fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Text(String),
        Stream(String),
        Navigate(String),
        Effect(String),
        Finish,
        Interrupt,
    }

    #[derive(Debug, Default)]
    struct Recorder {
        events: Vec<Event>,
        known_views: Option<Vec<&'static str>>,
    }

    impl Recorder {
        fn texts(&self) -> Vec<&str> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Text(t) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn count(&self, wanted: &Event) -> usize {
            self.events.iter().filter(|e| *e == wanted).count()
        }
    }

    impl EffectHandlers for Recorder {
        fn on_navigate(&mut self, view: &ViewId) -> Result<(), EffectError> {
            if let Some(known) = &self.known_views {
                if !known.contains(&view.as_str()) {
                    return Err(EffectError::UnknownView(view.to_string()));
                }
            }
            self.events.push(Event::Navigate(view.to_string()));
            Ok(())
        }

        fn on_text_partial(&mut self, text: &str) {
            self.events.push(Event::Text(text.to_string()));
        }

        fn on_stream_partial(&mut self, text: &str) {
            self.events.push(Event::Stream(text.to_string()));
        }

        fn on_effect(&mut self, name: &str, _payload: Option<&str>) -> Result<(), EffectError> {
            if name == "broken" {
                return Err(EffectError::Unhandled(name.to_string()));
            }
            self.events.push(Event::Effect(name.to_string()));
            Ok(())
        }

        fn on_finish(&mut self) {
            self.events.push(Event::Finish);
        }

        fn on_interrupt(&mut self) {
            self.events.push(Event::Interrupt);
        }
    }

    fn scenario() -> Script {
        Script::new(vec![
            Step::wait(ms(500)),
            Step::type_text("hello", ms(300)).with_unit_delay(ms(50)),
            Step::navigate("B", ms(300)),
            Step::finish(),
        ])
    }

    fn started(script: Script, config: SequencerConfig) -> (Sequencer<Recorder>, Instant) {
        let t0 = Instant::now();
        let mut seq = Sequencer::with_config(script, Recorder::default(), config);
        seq.start(t0);
        (seq, t0)
    }

    #[test]
    fn test_runs_to_completion() {
        let (mut seq, t0) = started(scenario(), SequencerConfig::default());
        assert_eq!(seq.phase(), Phase::Running);

        seq.tick(t0 + ms(5000));

        assert_eq!(seq.handlers().texts(), ["h", "he", "hel", "hell", "hello"]);
        assert_eq!(seq.handlers().count(&Event::Navigate("B".into())), 1);
        assert_eq!(seq.phase(), Phase::Finished);
        assert_eq!(seq.mode(), Mode::Autoplay);
        assert_eq!(seq.cursor(), 4);
        assert_eq!(seq.state().view_id, Some(ViewId::from("B")));
        assert_eq!(seq.handlers().events.last(), Some(&Event::Finish));
        assert_eq!(seq.next_deadline(), None);
    }

    #[test]
    fn test_fine_ticks_match_coarse_ticks() {
        let (mut fine, t0) = started(scenario(), SequencerConfig::default());
        for step in 0..=150 {
            fine.tick(t0 + ms(step * 10));
        }

        let (mut coarse, t1) = started(scenario(), SequencerConfig::default());
        coarse.tick(t1 + ms(1500));

        assert_eq!(fine.handlers().events, coarse.handlers().events);
    }

    #[test]
    fn test_step_timing() {
        let (mut seq, t0) = started(scenario(), SequencerConfig::default());

        seq.tick(t0 + ms(499));
        assert_eq!(seq.cursor(), 0);
        assert_eq!(seq.next_deadline(), Some(t0 + ms(500)));

        seq.tick(t0 + ms(500));
        assert_eq!(seq.cursor(), 1);
        assert_eq!(seq.handlers().texts(), ["h"]);
        assert_eq!(seq.state().rendered_fragment, "h");

        seq.tick(t0 + ms(799));
        assert_eq!(seq.cursor(), 1);
        assert_eq!(seq.state().rendered_fragment, "hello");

        seq.tick(t0 + ms(800));
        assert_eq!(seq.cursor(), 2);
        assert_eq!(seq.state().rendered_fragment, "");
        assert_eq!(seq.state().view_id, Some(ViewId::from("B")));
        assert_eq!(seq.phase(), Phase::Running);

        seq.tick(t0 + ms(1100));
        assert_eq!(seq.phase(), Phase::Finished);
    }

    #[test]
    fn test_interrupt_mid_typing_freezes_script() {
        let (mut seq, t0) = started(scenario(), SequencerConfig::default());
        seq.tick(t0 + ms(520));
        assert_eq!(seq.handlers().texts(), ["h"]);

        seq.interrupt();
        seq.tick(t0 + ms(10_000));

        assert_eq!(seq.handlers().texts(), ["h"]);
        assert_eq!(seq.handlers().count(&Event::Navigate("B".into())), 0);
        assert_eq!(seq.handlers().count(&Event::Finish), 0);
        assert_eq!(seq.phase(), Phase::Interactive);
        assert_eq!(seq.mode(), Mode::Interactive);
        assert_eq!(seq.cursor(), 1);
        assert_eq!(seq.next_deadline(), None);
    }

    #[test]
    fn test_interrupt_is_idempotent() {
        let (mut once, t0) = started(scenario(), SequencerConfig::default());
        once.tick(t0 + ms(600));
        once.interrupt();

        let (mut twice, t1) = started(scenario(), SequencerConfig::default());
        twice.tick(t1 + ms(600));
        twice.interrupt();
        twice.interrupt();

        assert_eq!(once.handlers().events, twice.handlers().events);
        assert_eq!(once.state(), twice.state());
        assert_eq!(twice.handlers().count(&Event::Interrupt), 1);
    }

    #[test]
    fn test_interrupt_wins_same_tick_completion() {
        let (mut seq, t0) = started(scenario(), SequencerConfig::default());
        let handle = seq.interrupt_handle();

        // The wait's completion and the interruption land in the same tick
        handle.interrupt();
        seq.tick(t0 + ms(500));

        assert_eq!(seq.cursor(), 0);
        assert!(seq.handlers().texts().is_empty());
        assert_eq!(seq.phase(), Phase::Interactive);
    }

    #[test]
    fn test_handle_from_another_thread() {
        let (mut seq, t0) = started(scenario(), SequencerConfig::default());
        let handle = seq.interrupt_handle();

        std::thread::spawn(move || handle.interrupt()).join().unwrap();
        assert_eq!(seq.mode(), Mode::Interactive);

        seq.tick(t0 + ms(10_000));
        assert_eq!(seq.cursor(), 0);
        assert_eq!(seq.handlers().events, [Event::Interrupt]);
    }

    #[test]
    fn test_replay_resets_fully() {
        let (mut seq, t0) = started(scenario(), SequencerConfig::default());
        seq.tick(t0 + ms(900));
        seq.interrupt();
        seq.handlers_mut().events.clear();

        let t1 = t0 + ms(2000);
        seq.replay(t1);
        assert_eq!(seq.cursor(), 0);
        assert_eq!(seq.mode(), Mode::Autoplay);
        assert_eq!(seq.phase(), Phase::Running);
        assert_eq!(seq.state().view_id, None);
        assert_eq!(seq.state().rendered_fragment, "");

        seq.tick(t1 + ms(500));
        assert_eq!(seq.handlers().events.first(), Some(&Event::Text("h".into())));

        seq.tick(t1 + ms(5000));
        assert_eq!(seq.phase(), Phase::Finished);
        assert_eq!(seq.handlers().texts().len(), 5);
    }

    #[test]
    fn test_invalid_navigate_fails_open() {
        let t0 = Instant::now();
        let recorder = Recorder {
            known_views: Some(vec!["home"]),
            ..Recorder::default()
        };
        let script = Script::new(vec![
            Step::navigate("missing", ms(100)),
            Step::effect("broken", None, ms(100)),
            Step::navigate("home", ms(100)),
        ]);
        let mut seq = Sequencer::new(script, recorder);
        seq.start(t0);

        seq.tick(t0 + ms(100));
        assert_eq!(seq.cursor(), 1);
        assert_eq!(seq.state().view_id, None);

        seq.tick(t0 + ms(300));
        assert_eq!(seq.phase(), Phase::Finished);
        assert_eq!(seq.state().view_id, Some(ViewId::from("home")));
        assert_eq!(
            seq.handlers().events,
            [Event::Navigate("home".into()), Event::Finish]
        );
    }

    #[test]
    fn test_stream_text_uses_stream_sink() {
        let t0 = Instant::now();
        let script = Script::new(vec![Step::stream_text("rows found", ms(100))]);
        let mut seq = Sequencer::new(script, Recorder::default());
        seq.start(t0);
        seq.tick(t0 + ms(100));

        assert_eq!(
            seq.handlers().events,
            [
                Event::Stream("rows ".into()),
                Event::Stream("rows found".into()),
                Event::Finish
            ]
        );
    }

    #[test]
    fn test_short_step_flushes_reveal() {
        let t0 = Instant::now();
        let script = Script::new(vec![
            Step::type_text("abcd", ms(100)).with_unit_delay(ms(100)),
            Step::effect("next", None, ms(100)),
        ]);
        let mut seq = Sequencer::new(script, Recorder::default());
        seq.start(t0);
        seq.tick(t0 + ms(100));

        assert_eq!(
            seq.handlers().events,
            [
                Event::Text("a".into()),
                Event::Text("ab".into()),
                Event::Text("abc".into()),
                Event::Text("abcd".into()),
                Event::Effect("next".into()),
            ]
        );
    }

    #[test]
    fn test_loop_restarts_after_pause() {
        let config = SequencerConfig {
            loop_pause: Some(ms(1000)),
            ..SequencerConfig::default()
        };
        let (mut seq, t0) = started(scenario(), config);

        seq.tick(t0 + ms(1100));
        assert_eq!(seq.phase(), Phase::Finished);
        assert_eq!(seq.next_deadline(), Some(t0 + ms(2100)));

        seq.tick(t0 + ms(2100));
        assert_eq!(seq.phase(), Phase::Running);
        assert_eq!(seq.cursor(), 0);
        assert_eq!(seq.state().view_id, None);

        seq.tick(t0 + ms(3200));
        assert_eq!(seq.handlers().count(&Event::Finish), 2);
        assert_eq!(seq.handlers().count(&Event::Navigate("B".into())), 2);
    }

    #[test]
    fn test_interrupt_during_loop_pause_suppresses_restart() {
        let config = SequencerConfig {
            loop_pause: Some(ms(1000)),
            ..SequencerConfig::default()
        };
        let (mut seq, t0) = started(scenario(), config);
        seq.tick(t0 + ms(1500));
        assert_eq!(seq.phase(), Phase::Finished);

        seq.interrupt_handle().interrupt();
        seq.tick(t0 + ms(10_000));

        assert_eq!(seq.phase(), Phase::Interactive);
        assert_eq!(seq.handlers().count(&Event::Finish), 1);
        assert_eq!(seq.cursor(), 4);
    }

    #[test]
    fn test_zero_length_loop_does_not_spin() {
        let config = SequencerConfig {
            loop_pause: Some(Duration::ZERO),
            ..SequencerConfig::default()
        };
        let (mut seq, t0) = started(Script::new(vec![Step::wait(Duration::ZERO)]), config);
        let after_start = seq.handlers().count(&Event::Finish);

        seq.tick(t0 + ms(1));
        assert_eq!(seq.handlers().count(&Event::Finish), after_start + 1);
    }

    #[test]
    fn test_empty_script_finishes_on_start() {
        let (seq, _) = started(Script::default(), SequencerConfig::default());
        assert_eq!(seq.phase(), Phase::Finished);
        assert_eq!(seq.cursor(), 0);
        assert_eq!(seq.handlers().events, [Event::Finish]);
    }

    #[test]
    fn test_interrupt_before_start() {
        let t0 = Instant::now();
        let mut seq = Sequencer::new(scenario(), Recorder::default());
        seq.interrupt();
        seq.start(t0);
        seq.tick(t0 + ms(5000));

        assert_eq!(seq.phase(), Phase::Interactive);
        assert_eq!(seq.handlers().events, [Event::Interrupt]);
    }

    #[test]
    fn test_start_twice_is_ignored() {
        let (mut seq, t0) = started(scenario(), SequencerConfig::default());
        seq.tick(t0 + ms(600));
        seq.start(t0 + ms(600));
        assert_eq!(seq.cursor(), 1);
    }

    #[test]
    fn test_teardown_stops_everything() {
        let (mut seq, t0) = started(scenario(), SequencerConfig::default());
        let handle = seq.interrupt_handle();
        seq.tick(t0 + ms(550));
        let before = seq.handlers().events.clone();

        seq.teardown();
        assert!(!handle.is_alive());
        handle.interrupt();

        seq.tick(t0 + ms(10_000));
        seq.replay(t0 + ms(10_000));
        assert_eq!(seq.handlers().events, before);
        assert_eq!(seq.mode(), Mode::Autoplay);
    }

    #[test]
    fn test_drop_releases_handles() {
        let seq = Sequencer::new(scenario(), Recorder::default());
        let handle = seq.interrupt_handle();
        drop(seq);
        assert!(!handle.is_alive());
    }

    #[test]
    fn test_initial_view_restored_on_replay() {
        let config = SequencerConfig {
            initial_view: Some(ViewId::from("A")),
            ..SequencerConfig::default()
        };
        let (mut seq, t0) = started(scenario(), config);
        assert_eq!(seq.state().view_id, Some(ViewId::from("A")));

        seq.tick(t0 + ms(900));
        assert_eq!(seq.state().view_id, Some(ViewId::from("B")));

        seq.handlers_mut().events.clear();
        seq.replay(t0 + ms(900));
        assert_eq!(seq.state().view_id, Some(ViewId::from("A")));
        assert_eq!(seq.handlers().events.first(), Some(&Event::Navigate("A".into())));
    }

    #[test]
    fn test_initial_view_restored_on_loop() {
        let config = SequencerConfig {
            initial_view: Some(ViewId::from("A")),
            loop_pause: Some(ms(100)),
            ..SequencerConfig::default()
        };
        let (mut seq, t0) = started(scenario(), config);

        // Finished at 1100ms, restarted at 1200ms, still waiting at 1500ms
        seq.tick(t0 + ms(1500));
        assert_eq!(seq.handlers().count(&Event::Finish), 1);
        assert_eq!(seq.state().view_id, Some(ViewId::from("A")));
        assert_eq!(seq.handlers().count(&Event::Navigate("A".into())), 1);
    }

    #[test]
    fn test_unknown_initial_view_skipped_on_replay() {
        let recorder = Recorder {
            known_views: Some(vec!["B"]),
            ..Recorder::default()
        };
        let config = SequencerConfig {
            initial_view: Some(ViewId::from("gone")),
            ..SequencerConfig::default()
        };
        let t0 = Instant::now();
        let mut seq = Sequencer::with_config(scenario(), recorder, config);
        seq.start(t0);
        seq.tick(t0 + ms(900));

        seq.replay(t0 + ms(900));
        assert_eq!(seq.state().view_id, None);
        assert_eq!(seq.phase(), Phase::Running);
    }

    #[test]
    fn test_pending_handle_interrupt_is_observable() {
        let (mut seq, t0) = started(scenario(), SequencerConfig::default());
        seq.interrupt_handle().interrupt();

        assert_eq!(seq.mode(), Mode::Interactive);
        assert_eq!(seq.state().mode, Mode::Interactive);
        assert_eq!(seq.phase(), Phase::Interactive);
        assert!(seq.handlers().events.is_empty());

        seq.tick(t0 + ms(1));
        assert_eq!(seq.state().mode, Mode::Interactive);
        assert_eq!(seq.handlers().events, [Event::Interrupt]);
    }
}
