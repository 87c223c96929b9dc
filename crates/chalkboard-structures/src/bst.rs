//! Binary search tree over integers, kept in a binary [`Forest`].

use std::cmp::Ordering;

use crate::arena::{DetachToken, Forest, NodeId, Side};
use crate::error::Result;

/// A binary search tree of distinct `i64` values.
///
/// The tree is the first root of its forest. Every operation keeps the
/// ordering invariant: left subtree smaller, right subtree larger.
#[derive(Debug, Clone)]
pub struct Bst {
    forest: Forest<i64>,
}

impl Default for Bst {
    fn default() -> Self {
        Self::new()
    }
}

impl Bst {
    pub fn new() -> Self {
        Self {
            forest: Forest::binary(),
        }
    }

    pub fn forest(&self) -> &Forest<i64> {
        &self.forest
    }

    pub fn root(&self) -> Option<NodeId> {
        self.forest.roots().first().copied()
    }

    pub fn len(&self) -> usize {
        self.forest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forest.is_empty()
    }

    /// Insert `value`. Returns `false` if it was already present.
    pub fn insert(&mut self, value: i64) -> bool {
        let Some(mut current) = self.root() else {
            self.forest.add_root(value);
            return true;
        };

        loop {
            let side = match self.value_at(current).cmp(&value) {
                Ordering::Equal => return false,
                Ordering::Greater => Side::Left,
                Ordering::Less => Side::Right,
            };
            match self.child(current, side) {
                Some(next) => current = next,
                None => {
                    self.forest.attach(current, side, value);
                    return true;
                }
            }
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.search(value).is_some()
    }

    /// Node holding `value`, if any.
    pub fn search(&self, value: i64) -> Option<NodeId> {
        let mut current = self.root();
        while let Some(id) = current {
            current = match self.value_at(id).cmp(&value) {
                Ordering::Equal => return Some(id),
                Ordering::Greater => self.child(id, Side::Left),
                Ordering::Less => self.child(id, Side::Right),
            };
        }
        None
    }

    pub fn max(&self) -> Option<i64> {
        self.root().map(|root| self.value_at(self.rightmost(root)))
    }

    pub fn min(&self) -> Option<i64> {
        let mut id = self.root()?;
        while let Some(next) = self.child(id, Side::Left) {
            id = next;
        }
        Some(self.value_at(id))
    }

    /// Number of nodes on the longest root-to-leaf path. Empty is 0.
    pub fn height(&self) -> usize {
        self.height_from(self.root())
    }

    /// Remove `value`, restructuring around the gap.
    ///
    /// A node with two children takes its in-order predecessor's value and
    /// the predecessor is removed instead. Returns `false` if absent.
    pub fn delete(&mut self, value: i64) -> bool {
        let Some(id) = self.search(value) else {
            return false;
        };

        match (self.child(id, Side::Left), self.child(id, Side::Right)) {
            (Some(left), Some(_)) => {
                let predecessor = self.rightmost(left);
                let replacement = self.value_at(predecessor);
                self.forest.set_value(id, replacement);
                self.forest.splice(predecessor).is_ok()
            }
            _ => self.forest.splice(id).is_ok(),
        }
    }

    /// Values in ascending order.
    pub fn values_in_order(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut current = self.root();
        while current.is_some() || !stack.is_empty() {
            while let Some(id) = current {
                stack.push(id);
                current = self.child(id, Side::Left);
            }
            if let Some(id) = stack.pop() {
                out.push(self.value_at(id));
                current = self.child(id, Side::Right);
            }
        }
        out
    }

    /// Cut the subtree rooted at `value` out of the tree.
    ///
    /// The subtree is removed whole, with no restructuring. Returns `None`
    /// if the value is absent.
    pub fn detach(&mut self, value: i64) -> Option<DetachToken> {
        let id = self.search(value)?;
        self.forest.detach(id).ok()
    }

    /// Put a detached subtree's values back by inserting each in pre-order.
    ///
    /// Values inserted since the detach are kept once. Returns the values
    /// that were actually added.
    pub fn reattach(&mut self, token: DetachToken) -> Result<Vec<i64>> {
        let subtree = self.forest.take_pending(token)?;
        let added = subtree
            .values_pre_order()
            .into_iter()
            .copied()
            .filter(|v| self.insert(*v))
            .collect();
        Ok(added)
    }

    /// Drop a detached subtree for good.
    pub fn discard(&mut self, token: DetachToken) -> Result<()> {
        self.forest.take_pending(token).map(drop)
    }

    pub fn clear(&mut self) {
        self.forest.clear();
    }

    fn value_at(&self, id: NodeId) -> i64 {
        self.forest.value(id).copied().unwrap_or_default()
    }

    fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self.forest.get(id)?.kind().child(side)
    }

    fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(next) = self.child(id, Side::Right) {
            id = next;
        }
        id
    }

    fn height_from(&self, id: Option<NodeId>) -> usize {
        match id {
            None => 0,
            Some(id) => {
                1 + self
                    .height_from(self.child(id, Side::Left))
                    .max(self.height_from(self.child(id, Side::Right)))
            }
        }
    }
}
