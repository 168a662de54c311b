//! Ticker Actor: Dedicated thread that paces the sequencer.
//!
//! The sequencer does nothing until it is ticked. This actor supplies those
//! ticks on a fixed cadence so a player loop can block on channels instead
//! of sleeping.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Longest single sleep, so shutdown is noticed promptly.
const MAX_NAP: Duration = Duration::from_millis(5);

/// A tick event sent at regular intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Tick number (monotonically increasing, gaps mean dropped ticks).
    pub frame: u64,
    /// When the tick fired.
    pub at: Instant,
}

/// Ticker actor that generates regular timing events.
pub struct TickerActor {
    /// Handle to the ticker thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Receiver for tick events.
    tick_rx: Receiver<Tick>,
}

impl TickerActor {
    /// Spawn a ticker firing every `interval`.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the ticker thread.
    pub fn spawn(interval: Duration) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);

        // Ticks carry their own instant, so a lagging receiver loses nothing
        // by missing some; keep the queue short.
        let (tick_tx, tick_rx) = bounded(1);

        let handle = thread::Builder::new()
            .name("showreel-ticker".to_string())
            .spawn(move || Self::run_loop(&tick_tx, &flag, interval))
            .expect("Failed to spawn ticker thread");

        Self {
            handle: Some(handle),
            shutdown,
            tick_rx,
        }
    }

    /// The tick receiver, for use with `select!`.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Tick> {
        &self.tick_rx
    }

    /// Signal the ticker to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the ticker thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(tick_tx: &Sender<Tick>, shutdown: &AtomicBool, interval: Duration) {
        let mut frame = 0u64;
        let mut next = Instant::now();

        while !shutdown.load(Ordering::Relaxed) {
            let now = Instant::now();
            if now < next {
                thread::sleep((next - now).min(MAX_NAP));
                continue;
            }

            match tick_tx.try_send(Tick { frame, at: now }) {
                Ok(()) | Err(TrySendError::Full(_)) => {}
                Err(TrySendError::Disconnected(_)) => return,
            }
            frame += 1;

            // Fall behind rather than burst to catch up
            next += interval;
            if next < now {
                next = now + interval;
            }
        }
    }
}

impl Drop for TickerActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
