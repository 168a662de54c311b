//! Input Actor: Dedicated thread for polling terminal events.
//!
//! Polls crossterm events and forwards the ones a player cares about. The
//! thread never touches sequencer state; it only sends messages.

use super::messages::{InputEvent, KeyCode, KeyModifiers, MouseButton, MouseEvent};
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind, MouseEventKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

/// Input actor that polls terminal events.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// `poll_timeout` bounds how long a shutdown request can go unnoticed.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the input thread.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);

        let handle = thread::Builder::new()
            .name("showreel-input".to_string())
            .spawn(move || Self::run_loop(&sender, &flag, poll_timeout))
            .expect("Failed to spawn input thread");

        Self {
            handle: Some(handle),
            shutdown,
        }
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(sender: &Sender<InputEvent>, shutdown: &AtomicBool, poll_timeout: Duration) {
        while !shutdown.load(Ordering::Relaxed) {
            let next = match event::poll(poll_timeout) {
                Ok(false) => continue,
                Ok(true) => match event::read() {
                    Ok(event) => convert_event(event),
                    Err(e) => Some(InputEvent::Error(e.to_string())),
                },
                Err(e) => Some(InputEvent::Error(e.to_string())),
            };

            if let Some(event) = next {
                if sender.send(event).is_err() {
                    debug!("input receiver dropped, stopping input actor");
                    return;
                }
            }
        }
        let _ = sender.send(InputEvent::Shutdown);
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Convert a crossterm event; `None` for events players ignore.
fn convert_event(event: Event) -> Option<InputEvent> {
    match event {
        // Releases and repeats would double count a single press
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(InputEvent::Key {
            code: convert_key_code(key.code)?,
            modifiers: convert_modifiers(key.modifiers),
        }),
        Event::Key(_) => None,
        Event::Mouse(mouse) => convert_mouse(mouse),
        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        Event::FocusGained => Some(InputEvent::FocusGained),
        Event::FocusLost => Some(InputEvent::FocusLost),
        Event::Paste(text) => Some(InputEvent::Paste(text)),
    }
}

fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::F(n) => KeyCode::F(n),
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    })
}

fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: mods.contains(event::KeyModifiers::SHIFT),
        control: mods.contains(event::KeyModifiers::CONTROL),
        alt: mods.contains(event::KeyModifiers::ALT),
    }
}

fn convert_mouse(mouse: event::MouseEvent) -> Option<InputEvent> {
    let at = |button| MouseEvent {
        x: mouse.column,
        y: mouse.row,
        button,
    };

    match mouse.kind {
        MouseEventKind::Down(button) => Some(InputEvent::MouseDown(at(Some(convert_button(button))))),
        MouseEventKind::Drag(button) => Some(InputEvent::MouseMove(at(Some(convert_button(button))))),
        MouseEventKind::Moved => Some(InputEvent::MouseMove(at(None))),
        MouseEventKind::ScrollUp => Some(InputEvent::MouseScroll { delta: 1 }),
        MouseEventKind::ScrollDown => Some(InputEvent::MouseScroll { delta: -1 }),
        _ => None,
    }
}

const fn convert_button(button: event::MouseButton) -> MouseButton {
    match button {
        event::MouseButton::Left => MouseButton::Left,
        event::MouseButton::Right => MouseButton::Right,
        event::MouseButton::Middle => MouseButton::Middle,
    }
}
