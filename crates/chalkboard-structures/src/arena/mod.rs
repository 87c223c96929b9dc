//! Arena-backed trees with detach and reattach.
//!
//! Nodes live in a map keyed by [`NodeId`] and refer to each other by id,
//! never by ownership. A detached subtree is moved out whole into a
//! [`DetachedSubtree`] slice and parked under a [`DetachToken`] until it is
//! merged back.

mod forest;
mod node;

pub use forest::{DetachedSubtree, Forest, TreeView, DEFAULT_WEIGHT};
pub use node::{DetachToken, Node, NodeId, NodeKind, Shape, Side};
