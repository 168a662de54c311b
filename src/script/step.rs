//! Step: one scripted action.

use crate::typewriter::{unit_count, RevealUnit};
use std::fmt;
use std::time::Duration;

/// Identifier of a named view in the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    /// Create a view id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ViewId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Discriminant of a step's [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// Do nothing for the step's duration.
    Wait,
    /// Type text into an input, one grapheme at a time.
    TypeText,
    /// Switch the active view.
    Navigate,
    /// Stream a response, one word at a time.
    StreamText,
    /// A host-defined named effect.
    Effect,
    /// End the run.
    Finish,
}

impl StepKind {
    /// Lowercase name, used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wait => "wait",
            Self::TypeText => "type_text",
            Self::Navigate => "navigate",
            Self::StreamText => "stream_text",
            Self::Effect => "effect",
            Self::Finish => "finish",
        }
    }
}

/// Text to reveal and an optional per-step cadence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextReveal {
    /// The full text.
    pub text: String,
    /// Delay between units; `None` uses the configured default for the kind.
    pub unit_delay: Option<Duration>,
}

/// What a step does when it is dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No effect.
    Wait,
    /// Reveal text as if typed.
    TypeText(TextReveal),
    /// Reveal text as if streamed.
    StreamText(TextReveal),
    /// Make the given view active.
    Navigate(ViewId),
    /// Apply a host-defined effect such as `apply-code` or `terminal`.
    Effect {
        /// Effect name the host dispatches on.
        name: String,
        /// Optional effect data.
        payload: Option<String>,
    },
    /// Stop autoplay after this step's duration.
    Finish,
}

/// One scripted action and the time it occupies.
///
/// `duration` is how long the cursor stays on the step before advancing. It
/// is independent of any reveal the step starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    action: Action,
    duration: Duration,
}

impl Step {
    /// Create a step from an action and duration.
    pub const fn new(action: Action, duration: Duration) -> Self {
        Self { action, duration }
    }

    /// Pause for `duration`.
    pub const fn wait(duration: Duration) -> Self {
        Self::new(Action::Wait, duration)
    }

    /// Type `text`, then hold until `duration` has elapsed.
    pub fn type_text(text: impl Into<String>, duration: Duration) -> Self {
        Self::new(
            Action::TypeText(TextReveal {
                text: text.into(),
                unit_delay: None,
            }),
            duration,
        )
    }

    /// Stream `text`, then hold until `duration` has elapsed.
    pub fn stream_text(text: impl Into<String>, duration: Duration) -> Self {
        Self::new(
            Action::StreamText(TextReveal {
                text: text.into(),
                unit_delay: None,
            }),
            duration,
        )
    }

    /// Switch to `view`, then hold for `duration` while the transition plays.
    pub fn navigate(view: impl Into<ViewId>, duration: Duration) -> Self {
        Self::new(Action::Navigate(view.into()), duration)
    }

    /// Apply the named host effect.
    pub fn effect(name: impl Into<String>, payload: Option<String>, duration: Duration) -> Self {
        Self::new(
            Action::Effect {
                name: name.into(),
                payload,
            },
            duration,
        )
    }

    /// Finish the run immediately.
    pub const fn finish() -> Self {
        Self::new(Action::Finish, Duration::ZERO)
    }

    /// Override the unit delay of a reveal step. Other kinds are unchanged.
    #[must_use]
    pub fn with_unit_delay(mut self, delay: Duration) -> Self {
        if let Action::TypeText(reveal) | Action::StreamText(reveal) = &mut self.action {
            reveal.unit_delay = Some(delay);
        }
        self
    }

    /// The step's action.
    pub const fn action(&self) -> &Action {
        &self.action
    }

    /// Time the step occupies.
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// The step's kind.
    pub const fn kind(&self) -> StepKind {
        match self.action {
            Action::Wait => StepKind::Wait,
            Action::TypeText(_) => StepKind::TypeText,
            Action::StreamText(_) => StepKind::StreamText,
            Action::Navigate(_) => StepKind::Navigate,
            Action::Effect { .. } => StepKind::Effect,
            Action::Finish => StepKind::Finish,
        }
    }

    /// The text and unit granularity of a reveal step.
    pub fn reveal(&self) -> Option<(&TextReveal, RevealUnit)> {
        match &self.action {
            Action::TypeText(reveal) => Some((reveal, RevealUnit::Grapheme)),
            Action::StreamText(reveal) => Some((reveal, RevealUnit::Word)),
            _ => None,
        }
    }

    /// Number of units a reveal step shows, zero for other kinds.
    pub fn reveal_units(&self) -> usize {
        self.reveal()
            .map_or(0, |(reveal, unit)| unit_count(&reveal.text, unit))
    }
}
