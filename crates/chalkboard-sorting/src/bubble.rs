//! Live bubble sort stepper.
//!
//! Unlike the other four sorts, bubble sort is never pre-recorded. The
//! caller holds a resumable [`BubbleState`] and asks for one action at a
//! time: either a single compare-and-maybe-swap, or a pass boundary.

use serde::{Deserialize, Serialize};

use crate::step::Highlight;

/// Resumable bubble sort state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BubbleState<T> {
    array: Vec<T>,
    outer: usize,
    inner: usize,
    swapped: bool,
    comparisons: usize,
    done: bool,
}

/// Result of a single bubble action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BubbleStep {
    /// The compared pair, or nothing when a pass boundary was crossed.
    pub highlight: Highlight,
    pub done: bool,
}

impl<T: Ord> BubbleState<T> {
    /// Start sorting `array`. Sequences shorter than two are already done.
    pub fn new(array: Vec<T>) -> Self {
        let done = array.len() < 2;
        Self {
            array,
            outer: 0,
            inner: 0,
            swapped: false,
            comparisons: 0,
            done,
        }
    }

    /// Perform exactly one action.
    ///
    /// Finishes when the outer index reaches `n - 1`, or at the end of a
    /// pass that made no swaps. Stepping a finished state does nothing.
    pub fn step(&mut self) -> BubbleStep {
        if self.done {
            return BubbleStep {
                highlight: Highlight::None,
                done: true,
            };
        }

        let n = self.array.len();
        let highlight = if self.inner < n - self.outer - 1 {
            let j = self.inner;
            if self.array[j] > self.array[j + 1] {
                self.array.swap(j, j + 1);
                self.swapped = true;
            }
            self.inner += 1;
            self.comparisons += 1;
            Highlight::Pair(j, j + 1)
        } else {
            if !self.swapped {
                self.done = true;
            }
            self.inner = 0;
            self.outer += 1;
            self.swapped = false;
            Highlight::None
        };

        if self.outer >= n - 1 {
            self.done = true;
        }

        BubbleStep {
            highlight,
            done: self.done,
        }
    }

    /// Step until done, returning how many actions were taken.
    pub fn run_to_completion(&mut self) -> usize {
        let mut actions = 0;
        while !self.done {
            self.step();
            actions += 1;
        }
        actions
    }
}

impl<T> BubbleState<T> {
    /// Current contents of the working array.
    pub fn array(&self) -> &[T] {
        &self.array
    }

    pub fn into_array(self) -> Vec<T> {
        self.array
    }

    /// Completed passes.
    pub fn outer(&self) -> usize {
        self.outer
    }

    /// Position within the current pass.
    pub fn inner(&self) -> usize {
        self.inner
    }

    /// Comparisons performed so far. Never exceeds `n * (n - 1) / 2`.
    pub fn comparisons(&self) -> usize {
        self.comparisons
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}
