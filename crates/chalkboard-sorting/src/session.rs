//! Per-user sorter state.
//!
//! A [`SorterSession`] owns one stepper per algorithm. The hosting layer
//! keeps one session per logical user and may persist it with serde; the
//! session itself never touches global state.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bubble::BubbleState;
use crate::recorder::record;
use crate::replay::{Replay, ReplayStatus};
use crate::sequence::{random_sequence, SequenceConfig};
use crate::step::{Algorithm, Highlight, Step};

/// Value type of the demo bars.
pub type Value = u32;

/// Stepping state for one algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stepper {
    /// Bubble sort, resumed one action per request
    Bubble(BubbleState<Value>),
    /// Any pre-recorded sort, served from its log
    Replay(Replay<Value>),
}

/// Response to a reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetOutcome {
    pub array: Vec<Value>,
    pub highlight: Highlight,
}

/// Response to a single step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Snapshot after the step; absent once a replay is exhausted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array: Option<Vec<Value>>,
    pub highlight: Highlight,
    pub done: bool,
}

impl StepOutcome {
    fn exhausted() -> Self {
        Self {
            array: None,
            highlight: Highlight::None,
            done: true,
        }
    }

    fn frame(step: &Step<Value>) -> Self {
        Self {
            array: Some(step.snapshot.clone()),
            highlight: step.highlight,
            done: false,
        }
    }
}

/// One user's steppers, keyed by algorithm.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SorterSession {
    config: SequenceConfig,
    steppers: BTreeMap<Algorithm, Stepper>,
}

impl SorterSession {
    /// Create a session that draws lazily-initialized sequences from `config`.
    pub fn new(config: SequenceConfig) -> Self {
        Self {
            config,
            steppers: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Start `algorithm` over on the given sequence.
    ///
    /// Merge and quick sort get the unsorted input prepended as frame 0.
    /// Insertion and selection logs start at their first move, so a log for
    /// input that is already in order may be empty.
    pub fn reset(&mut self, algorithm: Algorithm, sequence: Vec<Value>) -> ResetOutcome {
        let stepper = match record(algorithm, &sequence) {
            None => Stepper::Bubble(BubbleState::new(sequence.clone())),
            Some(steps) if algorithm.shows_input_frame() => {
                let mut frames = Vec::with_capacity(steps.len() + 1);
                frames.push(Step::capture(&sequence, Highlight::None));
                frames.extend(steps);
                Stepper::Replay(Replay::new(frames))
            }
            Some(steps) => Stepper::Replay(Replay::new(steps)),
        };
        self.steppers.insert(algorithm, stepper);

        ResetOutcome {
            array: sequence,
            highlight: Highlight::None,
        }
    }

    /// Start `algorithm` over on a fresh random sequence.
    pub fn reset_random<R: Rng + ?Sized>(&mut self, algorithm: Algorithm, rng: &mut R) -> ResetOutcome {
        let sequence = random_sequence(&self.config, rng);
        self.reset(algorithm, sequence)
    }

    /// Advance `algorithm` by exactly one step.
    ///
    /// An algorithm that was never reset is initialized on the spot with a
    /// fresh random sequence, then stepped.
    pub fn step<R: Rng + ?Sized>(&mut self, algorithm: Algorithm, rng: &mut R) -> StepOutcome {
        if !self.steppers.contains_key(&algorithm) {
            tracing::debug!(%algorithm, "stepping before reset, initializing");
            self.reset_random(algorithm, rng);
        }

        match self.steppers.get_mut(&algorithm) {
            Some(Stepper::Bubble(state)) => {
                let action = state.step();
                StepOutcome {
                    array: Some(state.array().to_vec()),
                    highlight: action.highlight,
                    done: action.done,
                }
            }
            Some(Stepper::Replay(replay)) => match replay.step_forward() {
                Some(step) => StepOutcome::frame(step),
                None => StepOutcome::exhausted(),
            },
            None => StepOutcome::exhausted(),
        }
    }

    /// Rewind a recorded sort by one frame.
    ///
    /// Returns the frame now on display, or `None` for bubble sort, for an
    /// algorithm that was never reset, or when already at the start.
    pub fn step_back(&mut self, algorithm: Algorithm) -> Option<StepOutcome> {
        match self.steppers.get_mut(&algorithm)? {
            Stepper::Replay(replay) => replay.step_backward().map(StepOutcome::frame),
            Stepper::Bubble(_) => None,
        }
    }

    /// Replay status for a recorded sort.
    pub fn status(&self, algorithm: Algorithm) -> Option<ReplayStatus> {
        match self.steppers.get(&algorithm)? {
            Stepper::Replay(replay) => Some(ReplayStatus::from(replay)),
            Stepper::Bubble(_) => None,
        }
    }

    pub fn stepper(&self, algorithm: Algorithm) -> Option<&Stepper> {
        self.steppers.get(&algorithm)
    }

    /// Drop all steppers.
    pub fn clear(&mut self) {
        self.steppers.clear();
    }
}
