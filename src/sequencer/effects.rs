//! Effect handlers: the host's side of every scripted step.

use crate::error::EffectError;
use crate::script::ViewId;

/// Callbacks through which the sequencer changes what the user sees.
///
/// These are the only calls the sequencer makes out. A handler that returns
/// an error does not stop the script: the failure is logged and the step
/// still runs out its duration.
pub trait EffectHandlers {
    /// Make `view` the active view.
    fn on_navigate(&mut self, view: &ViewId) -> Result<(), EffectError>;

    /// Show the latest prefix of a `TypeText` step.
    fn on_text_partial(&mut self, text: &str);

    /// Show the latest prefix of a `StreamText` step.
    ///
    /// Defaults to [`on_text_partial`](Self::on_text_partial).
    fn on_stream_partial(&mut self, text: &str) {
        self.on_text_partial(text);
    }

    /// Apply a host-defined effect.
    fn on_effect(&mut self, name: &str, payload: Option<&str>) -> Result<(), EffectError> {
        let _ = payload;
        Err(EffectError::Unhandled(name.to_string()))
    }

    /// The run reached its end.
    fn on_finish(&mut self) {}

    /// A real user took over.
    fn on_interrupt(&mut self) {}
}

impl<H: EffectHandlers + ?Sized> EffectHandlers for &mut H {
    fn on_navigate(&mut self, view: &ViewId) -> Result<(), EffectError> {
        (**self).on_navigate(view)
    }

    fn on_text_partial(&mut self, text: &str) {
        (**self).on_text_partial(text);
    }

    fn on_stream_partial(&mut self, text: &str) {
        (**self).on_stream_partial(text);
    }

    fn on_effect(&mut self, name: &str, payload: Option<&str>) -> Result<(), EffectError> {
        (**self).on_effect(name, payload)
    }

    fn on_finish(&mut self) {
        (**self).on_finish();
    }

    fn on_interrupt(&mut self) {
        (**self).on_interrupt();
    }
}

impl<H: EffectHandlers + ?Sized> EffectHandlers for Box<H> {
    fn on_navigate(&mut self, view: &ViewId) -> Result<(), EffectError> {
        (**self).on_navigate(view)
    }

    fn on_text_partial(&mut self, text: &str) {
        (**self).on_text_partial(text);
    }

    fn on_stream_partial(&mut self, text: &str) {
        (**self).on_stream_partial(text);
    }

    fn on_effect(&mut self, name: &str, payload: Option<&str>) -> Result<(), EffectError> {
        (**self).on_effect(name, payload)
    }

    fn on_finish(&mut self) {
        (**self).on_finish();
    }

    fn on_interrupt(&mut self) {
        (**self).on_interrupt();
    }
}
