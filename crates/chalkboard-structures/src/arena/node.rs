//! Node identity and shape.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Stable key of a node within one forest. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_prefix('n')
            .and_then(|digits| digits.parse().ok())
            .map(NodeId)
            .ok_or_else(|| Error::NodeNotFound(s.to_string()))
    }
}

/// Handle to a subtree parked outside the live forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DetachToken(pub(crate) u64);

impl fmt::Display for DetachToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Which layout every node of a forest uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Binary,
    NAry,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Binary => write!(f, "binary"),
            Shape::NAry => write!(f, "n-ary"),
        }
    }
}

/// A child slot of a binary node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// Child links of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    Binary {
        left: Option<NodeId>,
        right: Option<NodeId>,
    },
    NAry {
        children: Vec<NodeId>,
    },
}

impl NodeKind {
    pub(crate) fn empty(shape: Shape) -> Self {
        match shape {
            Shape::Binary => NodeKind::Binary { left: None, right: None },
            Shape::NAry => NodeKind::NAry { children: Vec::new() },
        }
    }

    /// Children in drawing order (left before right).
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::Binary { left, right } => left.iter().chain(right.iter()).copied().collect(),
            NodeKind::NAry { children } => children.clone(),
        }
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match (self, side) {
            (NodeKind::Binary { left, .. }, Side::Left) => *left,
            (NodeKind::Binary { right, .. }, Side::Right) => *right,
            (NodeKind::NAry { .. }, _) => None,
        }
    }

    /// Point whichever link holds `old` at `new` instead, or drop it.
    pub(crate) fn replace(&mut self, old: NodeId, new: Option<NodeId>) {
        match self {
            NodeKind::Binary { left, right } => {
                for slot in [left, right] {
                    if *slot == Some(old) {
                        *slot = new;
                    }
                }
            }
            NodeKind::NAry { children } => {
                if let Some(pos) = children.iter().position(|c| *c == old) {
                    match new {
                        Some(id) => children[pos] = id,
                        None => {
                            children.remove(pos);
                        }
                    }
                }
            }
        }
    }
}

/// A value with its links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node<V> {
    pub(crate) value: V,
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
}

impl<V> Node<V> {
    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn children(&self) -> Vec<NodeId> {
        self.kind.children()
    }
}
