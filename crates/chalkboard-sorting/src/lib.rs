//! Chalkboard Sorting
//!
//! Deterministic step recording for the classroom sorting visualizer.
//!
//! # Architecture
//!
//! - **Recorder**: insertion, selection, merge and quick sort each produce a
//!   complete log of [`Step`]s up front
//! - **Bubble**: bubble sort is stepped live through a resumable
//!   [`BubbleState`], one comparison or pass boundary per request
//! - **Replay**: a cursor that serves one recorded step per request
//! - **Session**: [`SorterSession`] owns one stepper per algorithm for a
//!   single user
//!
//! Every snapshot is a value copy of the working array, and every snapshot
//! is a permutation of the input.
//!
//! # Usage
//!
//! ```
//! use chalkboard_sorting::{Algorithm, SorterSession};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let mut session = SorterSession::default();
//! session.reset(Algorithm::Quick, vec![3, 1, 2]);
//!
//! let mut last = None;
//! loop {
//!     let outcome = session.step(Algorithm::Quick, &mut rng);
//!     if outcome.done {
//!         break;
//!     }
//!     last = outcome.array;
//! }
//! assert_eq!(last, Some(vec![1, 2, 3]));
//! ```

mod bubble;
mod error;
mod recorder;
mod replay;
mod sequence;
mod session;
mod step;

pub use bubble::{BubbleState, BubbleStep};
pub use error::{Error, Result};
pub use recorder::{insertion_steps, merge_steps, quick_steps, record, selection_steps};
pub use replay::{Replay, ReplayState, ReplayStatus};
pub use sequence::{random_sequence, SequenceConfig, DEFAULT_LEN, DEFAULT_MAX, DEFAULT_MIN};
pub use session::{ResetOutcome, SorterSession, StepOutcome, Stepper, Value};
pub use step::{Algorithm, Highlight, Step};
