//! Observable sequencer state.

use crate::script::ViewId;

/// Whether the script is still in control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// The sequencer advances the script on its own.
    #[default]
    Autoplay,
    /// A real user took over; nothing advances until replay.
    Interactive,
}

/// Lifecycle phase of a sequencer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Created, not yet started.
    #[default]
    Idle,
    /// Playing the script.
    Running,
    /// Stopped by user input.
    Interactive,
    /// Reached the end of the script, or a `Finish` step.
    Finished,
}

/// Read-only snapshot the host renders from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SequencerState {
    /// Index of the current step; equals the script length once it has run out.
    pub cursor: usize,
    /// Autoplay or interactive.
    pub mode: Mode,
    /// The active view, if any has been set.
    pub view_id: Option<ViewId>,
    /// The revealed prefix while the current step is a reveal; empty otherwise.
    pub rendered_fragment: String,
}
