//! The forest arena.

use std::collections::{BTreeMap, VecDeque};
use std::fmt::Display;

use super::node::{DetachToken, Node, NodeId, NodeKind, Shape, Side};
use crate::error::{Error, Result};

/// Weight of an edge nobody has reweighted.
pub const DEFAULT_WEIGHT: u32 = 1;

type Weights = BTreeMap<(NodeId, NodeId), u32>;

/// Where a new child goes under its owner.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Side(Side),
    Append,
}

/// Read access shared by live forests and detached subtrees.
pub trait TreeView {
    type Value;

    fn tree_shape(&self) -> Shape;

    /// Tree roots in drawing order.
    fn tree_roots(&self) -> Vec<NodeId>;

    fn tree_node(&self, id: NodeId) -> Option<&Node<Self::Value>>;

    fn edge_weight(&self, parent: NodeId, child: NodeId) -> u32;
}

/// A subtree cut out of a forest, waiting to be merged back.
///
/// Holds every node of the subtree and the weights of edges between them.
/// The root's parent link is cleared on detach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedSubtree<V> {
    root: NodeId,
    nodes: BTreeMap<NodeId, Node<V>>,
    weights: Weights,
}

impl<V> DetachedSubtree<V> {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<V>> {
        self.nodes.get(&id)
    }

    /// Values in pre-order (node, then children left to right).
    pub fn values_pre_order(&self) -> Vec<&V> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(&id) {
                out.push(&node.value);
                stack.extend(node.children().into_iter().rev());
            }
        }
        out
    }
}

/// An ordered set of trees sharing one node arena.
///
/// Every node has the forest's [`Shape`]. Edge weights default to
/// [`DEFAULT_WEIGHT`] and are stored only once changed.
#[derive(Debug, Clone)]
pub struct Forest<V> {
    shape: Shape,
    nodes: BTreeMap<NodeId, Node<V>>,
    roots: Vec<NodeId>,
    weights: Weights,
    next_id: u64,
    next_token: u64,
    pending: BTreeMap<DetachToken, DetachedSubtree<V>>,
}

impl<V> Forest<V> {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            nodes: BTreeMap::new(),
            roots: Vec::new(),
            weights: BTreeMap::new(),
            next_id: 0,
            next_token: 0,
            pending: BTreeMap::new(),
        }
    }

    pub fn binary() -> Self {
        Self::new(Shape::Binary)
    }

    pub fn nary() -> Self {
        Self::new(Shape::NAry)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<V>> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn value(&self, id: NodeId) -> Option<&V> {
        self.nodes.get(&id).map(|n| &n.value)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes.get(&id).map(Node::children).unwrap_or_default()
    }

    /// Weight of the edge from `parent` to `child`.
    pub fn weight(&self, parent: NodeId, child: NodeId) -> u32 {
        self.weights.get(&(parent, child)).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// Reweight the edge from `parent` to `child`.
    pub fn set_edge_weight(&mut self, parent: NodeId, child: NodeId, weight: u32) -> Result<()> {
        match self.nodes.get(&child) {
            Some(node) if node.parent == Some(parent) => {
                if weight == DEFAULT_WEIGHT {
                    self.weights.remove(&(parent, child));
                } else {
                    self.weights.insert((parent, child), weight);
                }
                Ok(())
            }
            _ => Err(Error::NodeNotFound(format!("{parent}->{child}"))),
        }
    }

    /// Start a new tree.
    pub fn add_root(&mut self, value: V) -> NodeId {
        let id = self.spawn(value, None);
        self.roots.push(id);
        id
    }

    /// Insert `value` beneath `parent`.
    ///
    /// Binary forests fill the first free slot in level order starting at
    /// `parent`. N-ary forests append to `parent`'s children.
    pub fn insert_under(&mut self, parent: NodeId, value: V) -> Result<NodeId> {
        let (owner, slot) = self.placement(parent)?;
        let id = self.spawn(value, Some(owner));
        self.link(owner, slot, id);
        Ok(id)
    }

    /// Insert `value` on `side` of `parent` in a binary forest.
    ///
    /// When that slot is taken the value descends into the occupant's
    /// subtree and takes its first free slot in level order.
    pub fn add_child(&mut self, parent: NodeId, side: Side, value: V) -> Result<NodeId> {
        let node = self
            .nodes
            .get(&parent)
            .ok_or_else(|| Error::ParentNotFound(parent.to_string()))?;
        if self.shape != Shape::Binary {
            return Err(Error::ShapeMismatch(self.shape));
        }

        let (owner, side) = match node.kind.child(side) {
            None => (parent, side),
            Some(occupant) => self
                .first_free_slot(occupant)
                .ok_or_else(|| Error::NodeNotFound(occupant.to_string()))?,
        };
        let id = self.spawn(value, Some(owner));
        self.link(owner, Slot::Side(side), id);
        Ok(id)
    }

    /// Ids beneath `root` in breadth-first order, `root` first.
    pub fn level_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut queue = VecDeque::from([root]);
        while let Some(id) = queue.pop_front() {
            if let Some(node) = self.nodes.get(&id) {
                out.push(id);
                queue.extend(node.children());
            }
        }
        out
    }

    /// Ids beneath `root` in pre-order, `root` first.
    pub fn pre_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(&id) {
                out.push(id);
                stack.extend(node.children().into_iter().rev());
            }
        }
        out
    }

    /// Cut `id` and all of its descendants out of the live forest.
    ///
    /// Nothing is promoted into the gap. The subtree waits under the
    /// returned token until [`Forest::reattach`] or [`Forest::take_pending`].
    pub fn detach(&mut self, id: NodeId) -> Result<DetachToken> {
        let parent = self
            .nodes
            .get(&id)
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))?
            .parent;

        let members = self.pre_order(id);
        self.relink(parent, id, None);

        let mut nodes = BTreeMap::new();
        for member in members {
            if let Some(node) = self.nodes.remove(&member) {
                nodes.insert(member, node);
            }
        }
        if let Some(root) = nodes.get_mut(&id) {
            root.parent = None;
        }

        let (inside, outside): (Weights, Weights) = std::mem::take(&mut self.weights)
            .into_iter()
            .partition(|((u, v), _)| nodes.contains_key(u) && nodes.contains_key(v));
        self.weights = outside;

        self.next_token += 1;
        let token = DetachToken(self.next_token);
        tracing::debug!(%token, root = %id, size = nodes.len(), "subtree detached");
        self.pending.insert(
            token,
            DetachedSubtree {
                root: id,
                nodes,
                weights: inside,
            },
        );
        Ok(token)
    }

    /// Merge a detached subtree back, under `parent` or as a new root.
    ///
    /// A missing parent fails with [`Error::ParentNotFound`] and leaves the
    /// token pending so the caller can retry.
    pub fn reattach(&mut self, token: DetachToken, parent: Option<NodeId>) -> Result<NodeId> {
        if !self.pending.contains_key(&token) {
            return Err(Error::TokenNotFound(token));
        }
        let placement = parent.map(|p| self.placement(p)).transpose()?;
        let subtree = self.take_pending(token)?;
        let root = subtree.root;

        self.nodes.extend(subtree.nodes);
        self.weights.extend(subtree.weights);
        match placement {
            Some((owner, slot)) => self.link(owner, slot, root),
            None => self.roots.push(root),
        }

        tracing::debug!(%token, %root, parent = ?parent.map(|p| p.to_string()), "subtree reattached");
        Ok(root)
    }

    /// Claim a pending subtree without merging it.
    pub fn take_pending(&mut self, token: DetachToken) -> Result<DetachedSubtree<V>> {
        self.pending.remove(&token).ok_or(Error::TokenNotFound(token))
    }

    pub fn pending(&self, token: DetachToken) -> Option<&DetachedSubtree<V>> {
        self.pending.get(&token)
    }

    pub fn pending_tokens(&self) -> impl Iterator<Item = DetachToken> + '_ {
        self.pending.keys().copied()
    }

    /// Drop every live node. Pending subtrees survive and can still be
    /// reattached as roots.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.weights.clear();
    }

    pub(crate) fn set_value(&mut self, id: NodeId, value: V) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.value = value;
        }
    }

    /// Attach a fresh node directly into an empty `side` slot of `parent`.
    pub(crate) fn attach(&mut self, parent: NodeId, side: Side, value: V) -> NodeId {
        let id = self.spawn(value, Some(parent));
        self.link(parent, Slot::Side(side), id);
        id
    }

    /// Remove a node with at most one child, lifting that child into its place.
    pub(crate) fn splice(&mut self, id: NodeId) -> Result<()> {
        let node = self
            .nodes
            .get(&id)
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))?;
        let parent = node.parent;
        let heir = node.children().first().copied();

        if let Some(heir) = heir {
            self.weights.remove(&(id, heir));
        }
        self.relink(parent, id, heir);
        self.nodes.remove(&id);
        Ok(())
    }

    fn spawn(&mut self, value: V, parent: Option<NodeId>) -> NodeId {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.nodes.insert(
            id,
            Node {
                value,
                parent,
                kind: NodeKind::empty(self.shape),
            },
        );
        id
    }

    fn link(&mut self, owner: NodeId, slot: Slot, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(&owner) {
            match (&mut node.kind, slot) {
                (NodeKind::Binary { left, .. }, Slot::Side(Side::Left)) => *left = Some(child),
                (NodeKind::Binary { right, .. }, Slot::Side(Side::Right)) => *right = Some(child),
                (NodeKind::NAry { children }, _) => children.push(child),
                (NodeKind::Binary { .. }, Slot::Append) => return,
            }
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(owner);
        }
    }

    /// Point the link that holds `old` (a parent slot or a root position)
    /// at `new`, or remove it when `new` is `None`.
    fn relink(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            Some(p) => {
                if let Some(node) = self.nodes.get_mut(&p) {
                    node.kind.replace(old, new);
                }
                self.weights.remove(&(p, old));
            }
            None => {
                if let Some(pos) = self.roots.iter().position(|r| *r == old) {
                    match new {
                        Some(id) => self.roots[pos] = id,
                        None => {
                            self.roots.remove(pos);
                        }
                    }
                }
            }
        }
        if let Some(node) = new.and_then(|id| self.nodes.get_mut(&id)) {
            node.parent = parent;
        }
    }

    fn placement(&self, parent: NodeId) -> Result<(NodeId, Slot)> {
        let node = self
            .nodes
            .get(&parent)
            .ok_or_else(|| Error::ParentNotFound(parent.to_string()))?;
        match node.kind {
            NodeKind::NAry { .. } => Ok((parent, Slot::Append)),
            NodeKind::Binary { .. } => self
                .first_free_slot(parent)
                .map(|(owner, side)| (owner, Slot::Side(side)))
                .ok_or_else(|| Error::NodeNotFound(parent.to_string())),
        }
    }

    fn first_free_slot(&self, start: NodeId) -> Option<(NodeId, Side)> {
        let mut queue = VecDeque::from([start]);
        while let Some(id) = queue.pop_front() {
            if let NodeKind::Binary { left, right } = &self.nodes.get(&id)?.kind {
                match (left, right) {
                    (None, _) => return Some((id, Side::Left)),
                    (_, None) => return Some((id, Side::Right)),
                    (Some(l), Some(r)) => queue.extend([*l, *r]),
                }
            }
        }
        None
    }
}

impl<V: Display> Forest<V> {
    /// Look a node up by its id text (`n<id>`) or, failing that, by value.
    ///
    /// Value matches search each tree breadth-first, trees in root order.
    pub fn find(&self, key: &str) -> Option<NodeId> {
        if let Ok(id) = key.parse::<NodeId>() {
            if self.contains(id) {
                return Some(id);
            }
        }
        let key = key.trim();
        self.roots.iter().find_map(|&root| {
            self.level_order(root)
                .into_iter()
                .find(|id| self.value(*id).is_some_and(|v| v.to_string() == key))
        })
    }
}

impl<V> TreeView for DetachedSubtree<V> {
    type Value = V;

    fn tree_shape(&self) -> Shape {
        match self.nodes.get(&self.root).map(|n| &n.kind) {
            Some(NodeKind::Binary { .. }) => Shape::Binary,
            _ => Shape::NAry,
        }
    }

    fn tree_roots(&self) -> Vec<NodeId> {
        vec![self.root]
    }

    fn tree_node(&self, id: NodeId) -> Option<&Node<V>> {
        self.nodes.get(&id)
    }

    fn edge_weight(&self, parent: NodeId, child: NodeId) -> u32 {
        self.weights.get(&(parent, child)).copied().unwrap_or(DEFAULT_WEIGHT)
    }
}

impl<V> TreeView for Forest<V> {
    type Value = V;

    fn tree_shape(&self) -> Shape {
        self.shape
    }

    fn tree_roots(&self) -> Vec<NodeId> {
        self.roots.clone()
    }

    fn tree_node(&self, id: NodeId) -> Option<&Node<V>> {
        self.nodes.get(&id)
    }

    fn edge_weight(&self, parent: NodeId, child: NodeId) -> u32 {
        self.weight(parent, child)
    }
}

impl<V> Default for Forest<V> {
    fn default() -> Self {
        Self::nary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(forest: &Forest<&'static str>, ids: &[NodeId]) -> Vec<&'static str> {
        ids.iter().filter_map(|id| forest.value(*id).copied()).collect()
    }

    /// a
    /// ├─ b
    /// │  └─ d
    /// └─ c
    fn nary_sample() -> (Forest<&'static str>, [NodeId; 4]) {
        let mut f = Forest::nary();
        let a = f.add_root("a");
        let b = f.insert_under(a, "b").unwrap();
        let c = f.insert_under(a, "c").unwrap();
        let d = f.insert_under(b, "d").unwrap();
        (f, [a, b, c, d])
    }

    #[test]
    fn nary_appends_children() {
        let (f, [a, b, c, d]) = nary_sample();
        assert_eq!(f.children(a), vec![b, c]);
        assert_eq!(f.children(b), vec![d]);
        assert_eq!(values(&f, &f.level_order(a)), vec!["a", "b", "c", "d"]);
        assert_eq!(values(&f, &f.pre_order(a)), vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn binary_fills_level_order() {
        let mut f = Forest::binary();
        let root = f.add_root(1);
        let ids: Vec<NodeId> = (2..=6).map(|v| f.insert_under(root, v).unwrap()).collect();

        assert_eq!(f.children(root), vec![ids[0], ids[1]]);
        assert_eq!(f.children(ids[0]), vec![ids[2], ids[3]]);
        assert_eq!(f.children(ids[1]), vec![ids[4]]);
    }

    #[test]
    fn add_child_descends_when_side_taken() {
        let mut f = Forest::binary();
        let root = f.add_root("r");
        let l = f.add_child(root, Side::Left, "l").unwrap();
        let l2 = f.add_child(root, Side::Left, "l2").unwrap();
        let r = f.add_child(root, Side::Right, "r1").unwrap();

        assert_eq!(f.get(root).unwrap().kind().child(Side::Left), Some(l));
        assert_eq!(f.get(root).unwrap().kind().child(Side::Right), Some(r));
        assert_eq!(f.get(l2).unwrap().parent(), Some(l));
    }

    #[test]
    fn add_child_needs_binary_and_parent() {
        let (mut f, [a, ..]) = nary_sample();
        assert_eq!(f.add_child(a, Side::Left, "x"), Err(Error::ShapeMismatch(Shape::NAry)));

        let mut b: Forest<i32> = Forest::binary();
        assert!(matches!(b.add_child(NodeId(9), Side::Left, 1), Err(Error::ParentNotFound(_))));
        assert!(matches!(b.insert_under(NodeId(9), 1), Err(Error::ParentNotFound(_))));
    }

    #[test]
    fn find_by_id_then_value() {
        let (mut f, [_, b, _, d]) = nary_sample();
        let second = f.add_root("d");

        assert_eq!(f.find(&b.to_string()), Some(b));
        // The first tree is searched before the second.
        assert_eq!(f.find("d"), Some(d));
        assert_eq!(f.find(&second.to_string()), Some(second));
        assert_eq!(f.find("zzz"), None);
        assert_eq!(f.find("n999"), None);
    }

    #[test]
    fn detach_removes_whole_subtree() {
        let (mut f, [a, b, c, d]) = nary_sample();
        let token = f.detach(b).unwrap();

        assert_eq!(f.len(), 2);
        assert_eq!(f.children(a), vec![c]);
        assert!(!f.contains(b) && !f.contains(d));
        assert_eq!(f.roots(), &[a]);

        let parked = f.pending(token).unwrap();
        assert_eq!(parked.root(), b);
        assert_eq!(parked.len(), 2);
        assert_eq!(parked.values_pre_order(), vec![&"b", &"d"]);
        assert_eq!(parked.get(b).unwrap().parent(), None);
    }

    #[test]
    fn detach_root_does_not_promote() {
        let (mut f, [a, ..]) = nary_sample();
        f.detach(a).unwrap();
        assert!(f.is_empty());
        assert!(f.roots().is_empty());
    }

    #[test]
    fn reattach_under_new_parent() {
        let (mut f, [a, b, c, d]) = nary_sample();
        f.set_edge_weight(b, d, 4).unwrap();
        f.set_edge_weight(a, b, 3).unwrap();
        let token = f.detach(b).unwrap();

        let root = f.reattach(token, Some(c)).unwrap();
        assert_eq!(root, b);
        assert_eq!(f.children(c), vec![b]);
        assert_eq!(f.get(b).unwrap().parent(), Some(c));
        assert_eq!(f.weight(b, d), 4);
        assert_eq!(f.weight(c, b), DEFAULT_WEIGHT);
        assert_eq!(f.weight(a, b), DEFAULT_WEIGHT);
        assert_eq!(f.pending_tokens().count(), 0);
        assert_eq!(f.len(), 4);
        assert_eq!(values(&f, &f.pre_order(a)), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn reattach_as_root() {
        let (mut f, [a, b, ..]) = nary_sample();
        let token = f.detach(b).unwrap();
        f.reattach(token, None).unwrap();
        assert_eq!(f.roots(), &[a, b]);
    }

    #[test]
    fn reattach_missing_parent_keeps_token() {
        let (mut f, [_, b, ..]) = nary_sample();
        let token = f.detach(b).unwrap();

        assert!(matches!(f.reattach(token, Some(NodeId(99))), Err(Error::ParentNotFound(_))));
        assert!(f.pending(token).is_some());

        // A parent inside the parked subtree is not live either.
        assert!(matches!(f.reattach(token, Some(b)), Err(Error::ParentNotFound(_))));
        assert!(f.reattach(token, None).is_ok());
        assert_eq!(f.reattach(token, None), Err(Error::TokenNotFound(token)));
    }

    #[test]
    fn binary_reattach_uses_free_slot() {
        let mut f = Forest::binary();
        let root = f.add_root(1);
        let left = f.add_child(root, Side::Left, 2).unwrap();
        let right = f.add_child(root, Side::Right, 3).unwrap();
        let token = f.detach(right).unwrap();

        f.reattach(token, Some(root)).unwrap();
        assert_eq!(f.get(root).unwrap().kind().child(Side::Right), Some(right));

        let token = f.detach(left).unwrap();
        f.reattach(token, Some(right)).unwrap();
        assert_eq!(f.get(right).unwrap().kind().child(Side::Left), Some(left));
    }

    #[test]
    fn ids_are_never_reused() {
        let (mut f, [_, b, ..]) = nary_sample();
        f.detach(b).unwrap();
        let fresh = f.add_root("e");
        assert!(fresh.get() > 4);
    }

    #[test]
    fn weights_need_a_real_edge() {
        let (mut f, [a, b, c, d]) = nary_sample();
        assert!(f.set_edge_weight(a, d, 2).is_err());
        assert!(f.set_edge_weight(c, b, 2).is_err());
        f.set_edge_weight(a, c, 5).unwrap();
        assert_eq!(f.weight(a, c), 5);
        f.set_edge_weight(a, c, DEFAULT_WEIGHT).unwrap();
        assert_eq!(f.weight(a, c), DEFAULT_WEIGHT);
    }

    #[test]
    fn splice_lifts_only_child() {
        let mut f = Forest::binary();
        let root = f.add_root(5);
        let mid = f.add_child(root, Side::Left, 3).unwrap();
        let low = f.add_child(mid, Side::Right, 4).unwrap();

        f.splice(mid).unwrap();
        assert_eq!(f.get(root).unwrap().kind().child(Side::Left), Some(low));
        assert_eq!(f.get(low).unwrap().parent(), Some(root));

        f.splice(root).unwrap();
        assert_eq!(f.roots(), &[low]);
        assert_eq!(f.get(low).unwrap().parent(), None);
    }

    #[test]
    fn clear_keeps_pending() {
        let (mut f, [_, b, ..]) = nary_sample();
        let token = f.detach(b).unwrap();
        f.clear();
        assert!(f.is_empty());
        assert_eq!(f.reattach(token, None), Ok(b));
        assert_eq!(f.len(), 2);
    }
}
