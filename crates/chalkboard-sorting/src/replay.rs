//! Cursor over a recorded step log.

use serde::{Deserialize, Serialize};

use crate::step::Step;

/// Where a replay stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayState {
    /// Nothing served yet
    Ready,
    /// At least one frame served, more remain
    Stepping,
    /// Every frame has been served
    Finished,
}

/// Serves one recorded frame per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replay<T> {
    steps: Vec<Step<T>>,
    cursor: usize,
}

impl<T> Replay<T> {
    /// Create a replay positioned before the first frame.
    pub fn new(steps: Vec<Step<T>>) -> Self {
        Self { steps, cursor: 0 }
    }

    /// Index of the next frame to serve.
    pub fn current_frame(&self) -> usize {
        self.cursor
    }

    pub fn total_frames(&self) -> usize {
        self.steps.len()
    }

    pub fn state(&self) -> ReplayState {
        if self.cursor >= self.steps.len() {
            ReplayState::Finished
        } else if self.cursor == 0 {
            ReplayState::Ready
        } else {
            ReplayState::Stepping
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    /// Serve the next frame and advance. `None` once exhausted.
    pub fn step_forward(&mut self) -> Option<&Step<T>> {
        let step = self.steps.get(self.cursor)?;
        self.cursor += 1;
        Some(step)
    }

    /// Move back one frame and return the frame now at the cursor's left.
    ///
    /// Returns `None` when already at the start.
    pub fn step_backward(&mut self) -> Option<&Step<T>> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.cursor.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    /// Jump to a frame, clamped to the log length.
    pub fn seek(&mut self, frame: usize) {
        self.cursor = frame.min(self.steps.len());
    }

    /// The most recently served frame.
    pub fn last_served(&self) -> Option<&Step<T>> {
        self.cursor.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    /// All recorded frames.
    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    /// Progress as a fraction in `[0.0, 1.0]`.
    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            0.0
        } else {
            self.cursor as f64 / self.steps.len() as f64
        }
    }
}

/// Replay status for sending to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayStatus {
    pub current_frame: usize,
    pub total_frames: usize,
    pub state: ReplayState,
    pub progress: f64,
}

impl<T> From<&Replay<T>> for ReplayStatus {
    fn from(replay: &Replay<T>) -> Self {
        Self {
            current_frame: replay.current_frame(),
            total_frames: replay.total_frames(),
            state: replay.state(),
            progress: replay.progress(),
        }
    }
}
