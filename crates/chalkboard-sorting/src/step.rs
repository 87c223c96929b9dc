//! Step records shared by every sorting algorithm.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The five classroom sorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bubble,
    Insertion,
    Selection,
    Merge,
    Quick,
}

impl Algorithm {
    /// All algorithms, in menu order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Bubble,
        Algorithm::Insertion,
        Algorithm::Selection,
        Algorithm::Merge,
        Algorithm::Quick,
    ];

    /// Wire name of the algorithm.
    pub const fn name(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Insertion => "insertion",
            Algorithm::Selection => "selection",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
        }
    }

    /// Whether the algorithm is stepped live instead of replayed from a log.
    pub const fn is_live(&self) -> bool {
        matches!(self, Algorithm::Bubble)
    }

    /// Whether a replay opens on the unsorted input before the first move.
    pub const fn shows_input_frame(&self) -> bool {
        matches!(self, Algorithm::Merge | Algorithm::Quick)
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Indices touched by a single step.
///
/// Serialized as a JSON array of zero, one or two indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Vec<usize>", try_from = "Vec<usize>")]
pub enum Highlight {
    #[default]
    None,
    One(usize),
    Pair(usize, usize),
}

impl Highlight {
    /// The highlighted indices in recording order.
    pub fn indices(&self) -> Vec<usize> {
        match *self {
            Highlight::None => Vec::new(),
            Highlight::One(i) => vec![i],
            Highlight::Pair(i, j) => vec![i, j],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Highlight::None)
    }

    pub fn contains(&self, index: usize) -> bool {
        match *self {
            Highlight::None => false,
            Highlight::One(i) => i == index,
            Highlight::Pair(i, j) => i == index || j == index,
        }
    }
}

impl From<Highlight> for Vec<usize> {
    fn from(highlight: Highlight) -> Self {
        highlight.indices()
    }
}

impl TryFrom<Vec<usize>> for Highlight {
    type Error = String;

    fn try_from(indices: Vec<usize>) -> Result<Self, Self::Error> {
        match indices.as_slice() {
            [] => Ok(Highlight::None),
            [i] => Ok(Highlight::One(*i)),
            [i, j] => Ok(Highlight::Pair(*i, *j)),
            more => Err(format!("a step highlights at most 2 indices, got {}", more.len())),
        }
    }
}

/// One recorded frame: a value copy of the sequence and the indices it touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step<T> {
    pub snapshot: Vec<T>,
    pub highlight: Highlight,
}

impl<T: Clone> Step<T> {
    /// Record the current state of `working`. The slice is copied, never aliased.
    pub fn capture(working: &[T], highlight: Highlight) -> Self {
        Self {
            snapshot: working.to_vec(),
            highlight,
        }
    }
}
