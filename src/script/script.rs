//! Script: the fixed, ordered list of steps for one demo run.

use super::step::{Step, StepKind};
use crate::config::SequencerConfig;
use std::ops::Index;
use std::time::Duration;
use tracing::warn;

/// A reveal step whose duration is shorter than its reveal.
///
/// The next step would start while the text is still appearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingViolation {
    /// Index of the step.
    pub index: usize,
    /// The step's kind.
    pub kind: StepKind,
    /// The authored duration.
    pub duration: Duration,
    /// `units * unit_delay` for the step's text.
    pub required: Duration,
}

/// An immutable, ordered sequence of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    /// Create a script from its steps.
    pub const fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the script has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step at `index`.
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Iterate over the steps in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Sum of all step durations, up to and including the first `Finish`.
    pub fn total_duration(&self) -> Duration {
        let mut total = Duration::ZERO;
        for step in &self.steps {
            total = total.saturating_add(step.duration());
            if step.kind() == StepKind::Finish {
                break;
            }
        }
        total
    }

    /// Reveal steps that do not leave time for their text to appear.
    ///
    /// A reveal of `n` units at delay `d` needs `duration >= n * d`. Steps
    /// without their own delay use the defaults in `config`.
    pub fn pacing_violations(&self, config: &SequencerConfig) -> Vec<PacingViolation> {
        self.steps
            .iter()
            .enumerate()
            .filter_map(|(index, step)| {
                let (reveal, _) = step.reveal()?;
                let delay = reveal
                    .unit_delay
                    .or_else(|| config.unit_delay_for(step.kind()))?;
                let units = u32::try_from(step.reveal_units()).unwrap_or(u32::MAX);
                let required = delay.saturating_mul(units);

                (step.duration() < required).then_some(PacingViolation {
                    index,
                    kind: step.kind(),
                    duration: step.duration(),
                    required,
                })
            })
            .collect()
    }

    /// Log every pacing violation as a warning and return how many there were.
    pub fn warn_pacing(&self, config: &SequencerConfig) -> usize {
        let violations = self.pacing_violations(config);
        for v in &violations {
            warn!(
                index = v.index,
                kind = v.kind.as_str(),
                duration_ms = v.duration.as_millis(),
                required_ms = v.required.as_millis(),
                "reveal outlasts its step"
            );
        }
        violations.len()
    }
}

impl Index<usize> for Script {
    type Output = Step;

    fn index(&self, index: usize) -> &Step {
        &self.steps[index]
    }
}

impl FromIterator<Step> for Script {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Step>> for Script {
    fn from(steps: Vec<Step>) -> Self {
        Self::new(steps)
    }
}

impl<'a> IntoIterator for &'a Script {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
