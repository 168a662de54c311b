//! Player: the host loop that drives a sequencer from real time and input.
//!
//! The player owns the [`Sequencer`] and is the only code that touches it.
//! Input and tick actors run on their own threads and talk to the player
//! over channels, so all sequencer state stays on one thread.

use super::input::InputActor;
use super::messages::InputEvent;
use super::ticker::{Tick, TickerActor};
use crate::config::PlayerConfig;
use crate::sequencer::{EffectHandlers, Phase, Sequencer};
use crossbeam_channel::{bounded, select, Receiver};
use std::time::Instant;
use tracing::{debug, warn};

/// What the player hands the host on each turn of the loop.
#[derive(Debug, Clone, Copy)]
pub enum Signal<'a> {
    /// The sequencer was just ticked; redraw if anything changed.
    Tick(Tick),
    /// An input event, delivered after any interruption it caused.
    Input(&'a InputEvent),
}

/// The host's answer to a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Control {
    /// Keep going.
    #[default]
    Continue,
    /// Restart the script from the beginning.
    Replay,
    /// Stop the loop.
    Quit,
}

/// Why [`Player::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerExit {
    /// The host asked to quit.
    Quit,
    /// Autoplay finished and `exit_on_finish` is set.
    Finished,
    /// The input source went away.
    Disconnected,
}

/// Runs a sequencer against the clock and the user's input.
pub struct Player<H: EffectHandlers> {
    sequencer: Sequencer<H>,
    config: PlayerConfig,
    input_rx: Receiver<InputEvent>,
    /// Present when the player reads the terminal itself.
    input_actor: Option<InputActor>,
    ticker: TickerActor,
}

impl<H: EffectHandlers> Player<H> {
    /// Create a player that reads input from the terminal.
    ///
    /// The host is responsible for raw mode and for enabling mouse, focus,
    /// and paste reporting if those inputs should count.
    pub fn new(sequencer: Sequencer<H>, config: PlayerConfig) -> Self {
        let (input_tx, input_rx) = bounded::<InputEvent>(64);
        let input_actor = InputActor::spawn(input_tx, config.input_poll_timeout);
        let mut player = Self::with_input(sequencer, config, input_rx);
        player.input_actor = Some(input_actor);
        player
    }

    /// Create a player fed by a host-provided input channel.
    pub fn with_input(
        sequencer: Sequencer<H>,
        config: PlayerConfig,
        input_rx: Receiver<InputEvent>,
    ) -> Self {
        let ticker = TickerActor::spawn(config.tick_interval);
        Self {
            sequencer,
            config,
            input_rx,
            input_actor: None,
            ticker,
        }
    }

    /// The sequencer being played.
    pub const fn sequencer(&self) -> &Sequencer<H> {
        &self.sequencer
    }

    /// The sequencer being played, mutably.
    pub fn sequencer_mut(&mut self) -> &mut Sequencer<H> {
        &mut self.sequencer
    }

    /// Consume the player, returning its sequencer.
    pub fn into_sequencer(self) -> Sequencer<H> {
        let Self {
            sequencer,
            input_actor,
            ticker,
            ..
        } = self;
        if let Some(actor) = input_actor {
            actor.join();
        }
        ticker.join();
        sequencer
    }

    /// Start the script and run until the host quits.
    ///
    /// Input whose kind is in `interrupt_on` interrupts the sequencer before
    /// the host sees the event, so a host that maps a key to
    /// [`Control::Replay`] gets a clean restart.
    pub fn run<F>(&mut self, mut host: F) -> PlayerExit
    where
        F: FnMut(&mut Sequencer<H>, Signal<'_>) -> Control,
    {
        self.sequencer.start(Instant::now());

        loop {
            let control = select! {
                recv(self.input_rx) -> msg => match msg {
                    Ok(InputEvent::Shutdown) | Err(_) => return PlayerExit::Disconnected,
                    Ok(InputEvent::Error(message)) => {
                        warn!(%message, "input error");
                        Control::Continue
                    }
                    Ok(event) => {
                        if event.kind().is_some_and(|kind| self.config.interrupt_on.intersects(kind)) {
                            self.sequencer.interrupt();
                        }
                        host(&mut self.sequencer, Signal::Input(&event))
                    }
                },
                recv(self.ticker.receiver()) -> msg => match msg {
                    Ok(tick) => {
                        self.sequencer.tick(tick.at);
                        host(&mut self.sequencer, Signal::Tick(tick))
                    }
                    Err(_) => return PlayerExit::Disconnected,
                },
            };

            match control {
                Control::Continue => {}
                Control::Replay => self.sequencer.replay(Instant::now()),
                Control::Quit => {
                    debug!(cursor = self.sequencer.cursor(), "player quit");
                    return PlayerExit::Quit;
                }
            }

            if self.config.exit_on_finish
                && self.sequencer.config().loop_pause.is_none()
                && self.sequencer.phase() == Phase::Finished
            {
                return PlayerExit::Finished;
            }
        }
    }
}
