//! Chalkboard Structures
//!
//! The editable boards behind the classroom data-structure widgets.
//!
//! # Boards
//!
//! - [`Stack`] and [`Queue`]: linear boards of labels
//! - [`Forest`]: an arena of binary or n-ary trees whose subtrees can be
//!   detached under a [`DetachToken`] and reattached later
//! - [`Bst`]: an integer binary search tree on a binary forest
//! - [`GraphBoard`]: vertices on a circle joined by weighted edges
//!
//! Every board has a matching pure SVG renderer in [`render`].

pub mod arena;
mod bst;
mod error;
mod graph_board;
mod linear;
pub mod render;

pub use arena::{DetachToken, DetachedSubtree, Forest, Node, NodeId, NodeKind, Shape, Side, TreeView};
pub use bst::Bst;
pub use error::{Error, Result};
pub use graph_board::{GraphBoard, Vertex, VertexId};
pub use linear::{Queue, Stack};
pub use render::{render_forest, render_graph, render_queue, render_stack};

/// Trim `value`, rejecting it if nothing is left.
pub fn require_value(value: &str) -> Result<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::EmptyValue)
    } else {
        Ok(trimmed)
    }
}
