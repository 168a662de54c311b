//! Error types.
//!
//! Nothing here is ever surfaced to the person watching a demo. Step errors
//! are logged and the script keeps moving; configuration errors are reported
//! to the host when it builds its config.

use thiserror::Error;

/// Failure reported by an [`EffectHandlers`](crate::EffectHandlers) callback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EffectError {
    /// The host has no view with this identifier.
    #[error("unknown view `{0}`")]
    UnknownView(String),

    /// The host does not handle this named effect.
    #[error("unhandled effect `{0}`")]
    Unhandled(String),

    /// The host tried to apply the effect and failed.
    #[error("effect failed: {0}")]
    Failed(String),
}

/// Conditions the sequencer recovers from locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencerError {
    /// A step referenced a view or effect the host could not apply.
    ///
    /// The step is skipped and its duration still elapses.
    #[error("step {index} references `{reference}`: {source}")]
    InvalidStepReference {
        /// Cursor position of the offending step.
        index: usize,
        /// The view id or effect name that failed.
        reference: String,
        /// What the handler reported.
        #[source]
        source: EffectError,
    },

    /// A deferred continuation came due after interruption or teardown.
    #[error("late {what} ignored at step {index}")]
    SchedulingRace {
        /// Cursor position when the continuation fired.
        index: usize,
        /// Which continuation fired.
        what: &'static str,
    },
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML source did not parse or did not match the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds a value the runtime cannot use.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
