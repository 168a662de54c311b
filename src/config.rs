//! Runtime configuration.
//!
//! Every knob has a default, so hosts usually start from
//! [`ShowreelConfig::default`] and override a field or two. Hosts that keep
//! settings in a file can parse the same structure from TOML:
//!
//! ```toml
//! [sequencer]
//! type_unit_delay_ms = 40
//! loop_pause_ms = 3000
//!
//! [player]
//! tick_interval_ms = 16
//! interrupt_on = "KEY | POINTER"
//! ```
//!
//! Durations are written in whole milliseconds.

use crate::actor::InputKind;
use crate::error::{ConfigError, ConfigResult};
use crate::script::{StepKind, ViewId};
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Sequencer timing and reset behavior.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequencerConfig {
    /// Delay between graphemes for `TypeText` steps without their own delay.
    #[serde(rename = "type_unit_delay_ms", deserialize_with = "millis")]
    pub type_unit_delay: Duration,
    /// Delay between words for `StreamText` steps without their own delay.
    #[serde(rename = "stream_unit_delay_ms", deserialize_with = "millis")]
    pub stream_unit_delay: Duration,
    /// Pause before replaying a finished script; `None` plays once.
    #[serde(rename = "loop_pause_ms", deserialize_with = "optional_millis")]
    pub loop_pause: Option<Duration>,
    /// View active at mount and after every replay.
    pub initial_view: Option<ViewId>,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            type_unit_delay: Duration::from_millis(50),
            stream_unit_delay: Duration::from_millis(30),
            loop_pause: None,
            initial_view: None,
        }
    }
}

impl SequencerConfig {
    /// Default unit delay for a reveal kind; `None` for other kinds.
    pub const fn unit_delay_for(&self, kind: StepKind) -> Option<Duration> {
        match kind {
            StepKind::TypeText => Some(self.type_unit_delay),
            StepKind::StreamText => Some(self.stream_unit_delay),
            _ => None,
        }
    }
}

/// Host runtime settings for [`Player`](crate::actor::Player).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Interval between sequencer ticks.
    #[serde(rename = "tick_interval_ms", deserialize_with = "millis")]
    pub tick_interval: Duration,
    /// How long the input actor waits for events before checking shutdown.
    #[serde(rename = "input_poll_timeout_ms", deserialize_with = "millis")]
    pub input_poll_timeout: Duration,
    /// Input kinds that hand control to the user.
    pub interrupt_on: InputKind,
    /// Return from the run loop once autoplay finishes. Ignored when the
    /// sequencer has a `loop_pause`, since a looping script never ends.
    pub exit_on_finish: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(16),
            input_poll_timeout: Duration::from_millis(10),
            interrupt_on: InputKind::INTERRUPTING,
            exit_on_finish: false,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShowreelConfig {
    /// Sequencer settings.
    pub sequencer: SequencerConfig,
    /// Player settings.
    pub player: PlayerConfig,
}

impl ShowreelConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the runtime cannot honour.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.player.tick_interval.is_zero() {
            return Err(ConfigError::Invalid {
                field: "player.tick_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.player.input_poll_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                field: "player.input_poll_timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

fn optional_millis<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Duration>, D::Error> {
    Option::<u64>::deserialize(deserializer).map(|ms| ms.map(Duration::from_millis))
}
