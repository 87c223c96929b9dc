//! Per-session board state.
//!
//! A [`Workbench`] owns every board one visitor edits. Its methods are
//! synchronous and return the JSON bodies the HTTP layer sends back, so the
//! whole request flow can be tested without a server.

use std::collections::VecDeque;
use std::fmt;

use chalkboard_sorting::{
    Algorithm, Highlight, ReplayStatus, ResetOutcome, SequenceConfig, SorterSession, StepOutcome,
};
use chalkboard_structures::{
    render_forest, render_graph, render_queue, render_stack, require_value, Bst, DetachToken,
    Forest, GraphBoard, NodeId, Queue, Side, Stack, VertexId,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Detached subtrees kept per session. Parking one more drops the oldest.
pub const MAX_PENDING: usize = 32;

/// A JSON scalar sent as a board value. Forms post strings, scripts post
/// numbers; both are accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Text(String),
}

impl Scalar {
    /// The value as an integer, for the search tree.
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Scalar::Int(n) => Ok(*n),
            Scalar::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| Error::InvalidInput(format!("numeric only: {text:?}"))),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Text(text) => f.write_str(text),
        }
    }
}

/// Which tree board a detached subtree came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Board {
    Tree,
    BinaryTree,
    Bst,
}

/// A board redrawn after an edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub ok: bool,
    pub svg: String,

    /// Value removed by a pop or dequeue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Whether a delete found its target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<bool>,

    /// Id of a freshly created vertex.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl BoardView {
    fn new(svg: String) -> Self {
        Self {
            ok: true,
            svg,
            value: None,
            found: None,
            id: None,
        }
    }
}

/// A tree board after a detach, plus the parked subtree if one was cut.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetachView {
    pub ok: bool,
    pub svg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detached_svg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detached_root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detached_root_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    pub ok: bool,
    pub found: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaxView {
    pub ok: bool,
    pub max: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeightView {
    pub ok: bool,
    pub height: usize,
}

/// Result of rewinding a sort by one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array: Option<Vec<u32>>,
    pub highlight: Highlight,
    pub status: Option<ReplayStatus>,
}

/// A subtree waiting under its public token.
#[derive(Debug, Clone)]
struct Parked {
    token: String,
    board: Board,
    inner: DetachToken,
}

/// Every board owned by one session.
#[derive(Debug, Clone)]
pub struct Workbench {
    sorting: SorterSession,
    stack: Stack<String>,
    queue: Queue<String>,
    tree: Forest<String>,
    binary: Forest<String>,
    bst: Bst,
    graph: GraphBoard,
    /// Oldest first.
    pending: VecDeque<Parked>,
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new(SequenceConfig::default())
    }
}

impl Workbench {
    pub fn new(sequence: SequenceConfig) -> Self {
        Self {
            sorting: SorterSession::new(sequence),
            stack: Stack::new(),
            queue: Queue::new(),
            tree: Forest::nary(),
            binary: Forest::binary(),
            bst: Bst::new(),
            graph: GraphBoard::new(),
            pending: VecDeque::new(),
        }
    }

    // Sorting

    pub fn sort_reset<R: Rng + ?Sized>(&mut self, algorithm: Algorithm, rng: &mut R) -> ResetOutcome {
        self.sorting.reset_random(algorithm, rng)
    }

    /// One step of `algorithm`. A sort that was never reset starts on a
    /// fresh random sequence.
    pub fn sort_step<R: Rng + ?Sized>(&mut self, algorithm: Algorithm, rng: &mut R) -> StepOutcome {
        self.sorting.step(algorithm, rng)
    }

    pub fn sort_back(&mut self, algorithm: Algorithm) -> BackView {
        let frame = self.sorting.step_back(algorithm);
        BackView {
            array: frame.as_ref().and_then(|f| f.array.clone()),
            highlight: frame.map(|f| f.highlight).unwrap_or_default(),
            status: self.sorting.status(algorithm),
        }
    }

    // Stack and queue

    pub fn push(&mut self, value: &str) -> Result<BoardView> {
        self.stack.push(require_value(value)?.to_string());
        Ok(BoardView::new(render_stack(&self.stack)))
    }

    pub fn pop(&mut self) -> BoardView {
        let value = self.stack.pop();
        BoardView {
            value,
            ..BoardView::new(render_stack(&self.stack))
        }
    }

    pub fn enqueue(&mut self, value: &str) -> Result<BoardView> {
        self.queue.enqueue(require_value(value)?.to_string());
        Ok(BoardView::new(render_queue(&self.queue)))
    }

    pub fn dequeue(&mut self) -> BoardView {
        let value = self.queue.dequeue();
        BoardView {
            value,
            ..BoardView::new(render_queue(&self.queue))
        }
    }

    // General tree

    /// Insert under the node named by `parent`, or start a new tree when no
    /// parent is given or it cannot be found.
    pub fn tree_insert(&mut self, value: &str, parent: Option<&str>) -> Result<BoardView> {
        let value = require_value(value)?.to_string();
        match non_blank(parent).and_then(|key| self.tree.find(key)) {
            Some(parent) => {
                self.tree.insert_under(parent, value)?;
            }
            None => {
                self.tree.add_root(value);
            }
        }
        Ok(BoardView::new(render_forest(&self.tree)))
    }

    pub fn tree_delete<R: Rng + ?Sized>(&mut self, id: &str, rng: &mut R) -> Result<DetachView> {
        self.detach_node(Board::Tree, id, rng)
    }

    /// Label the edge into `child` with `weight`. Weight 1 clears the label.
    pub fn tree_set_weight(&mut self, parent: &str, child: &str, weight: u32) -> Result<BoardView> {
        self.set_edge_weight(Board::Tree, parent, child, weight)
    }

    pub fn tree_reset(&mut self) -> BoardView {
        self.tree.clear();
        BoardView::new(render_forest(&self.tree))
    }

    // Binary tree

    pub fn bt_add_root(&mut self, value: &str) -> Result<BoardView> {
        self.binary.add_root(require_value(value)?.to_string());
        Ok(BoardView::new(render_forest(&self.binary)))
    }

    /// Add `value` on `side` of `parent`.
    ///
    /// Without a parent the value takes that side of the first root when it
    /// is free. An unknown parent, or a taken slot on the first root, starts
    /// a new tree instead.
    pub fn bt_add(&mut self, side: Side, value: &str, parent: Option<&str>) -> Result<BoardView> {
        let value = require_value(value)?.to_string();
        let target = match non_blank(parent) {
            Some(key) => self.binary.find(key),
            None => self.binary.roots().first().copied().filter(|&root| {
                self.binary
                    .get(root)
                    .is_some_and(|node| node.kind().child(side).is_none())
            }),
        };
        match target {
            Some(parent) => {
                self.binary.add_child(parent, side, value)?;
            }
            None => {
                self.binary.add_root(value);
            }
        }
        Ok(BoardView::new(render_forest(&self.binary)))
    }

    pub fn bt_delete<R: Rng + ?Sized>(&mut self, id: &str, rng: &mut R) -> Result<DetachView> {
        self.detach_node(Board::BinaryTree, id, rng)
    }

    pub fn bt_set_weight(&mut self, parent: &str, child: &str, weight: u32) -> Result<BoardView> {
        self.set_edge_weight(Board::BinaryTree, parent, child, weight)
    }

    pub fn bt_reset(&mut self) -> BoardView {
        self.binary.clear();
        BoardView::new(render_forest(&self.binary))
    }

    // Binary search tree

    pub fn bst_insert(&mut self, value: &Scalar) -> Result<BoardView> {
        self.bst.insert(value.as_int()?);
        Ok(BoardView::new(render_forest(self.bst.forest())))
    }

    pub fn bst_search(&self, value: &Scalar) -> Result<SearchView> {
        Ok(SearchView {
            ok: true,
            found: self.bst.contains(value.as_int()?),
        })
    }

    pub fn bst_max(&self) -> MaxView {
        MaxView {
            ok: true,
            max: self.bst.max(),
        }
    }

    pub fn bst_height(&self) -> HeightView {
        HeightView {
            ok: true,
            height: self.bst.height(),
        }
    }

    /// Remove one value, restructuring around the gap.
    pub fn bst_delete(&mut self, value: &Scalar) -> Result<BoardView> {
        let found = self.bst.delete(value.as_int()?);
        Ok(BoardView {
            found: Some(found),
            ..BoardView::new(render_forest(self.bst.forest()))
        })
    }

    /// Cut out the whole subtree rooted at `value` and park it under a token.
    pub fn bst_detach<R: Rng + ?Sized>(&mut self, value: &Scalar, rng: &mut R) -> Result<DetachView> {
        let value = value.as_int()?;
        let parked = self.bst.detach(value).map(|token| {
            let preview = self.bst.forest().pending(token).map(render_forest);
            (token, preview)
        });

        let mut view = DetachView {
            ok: true,
            svg: render_forest(self.bst.forest()),
            token: None,
            detached_svg: None,
            detached_root: None,
            detached_root_id: None,
        };
        if let Some((token, preview)) = parked {
            view.token = Some(self.park(Board::Bst, token, rng));
            view.detached_svg = preview;
            view.detached_root = Some(value.to_string());
        }
        Ok(view)
    }

    // Reattach

    /// Merge a parked subtree back into the board it came from.
    ///
    /// Tree boards hang it under `parent`, or start a new tree without one.
    /// The search tree reinserts its values and ignores `parent`. The token
    /// stays valid when the parent cannot be found.
    pub fn reattach(&mut self, token: &str, parent: Option<&str>) -> Result<BoardView> {
        let slot = self
            .pending
            .iter()
            .position(|p| p.token == token)
            .ok_or_else(|| Error::NotFound(format!("token {token}")))?;
        let (board, inner) = (self.pending[slot].board, self.pending[slot].inner);

        let svg = match board {
            Board::Tree => {
                let parent = resolve_parent(&self.tree, parent)?;
                self.tree.reattach(inner, parent)?;
                render_forest(&self.tree)
            }
            Board::BinaryTree => {
                let parent = resolve_parent(&self.binary, parent)?;
                self.binary.reattach(inner, parent)?;
                render_forest(&self.binary)
            }
            Board::Bst => {
                self.bst.reattach(inner)?;
                render_forest(self.bst.forest())
            }
        };

        self.pending.remove(slot);
        tracing::debug!(token, ?board, "subtree merged back");
        Ok(BoardView::new(svg))
    }

    /// Tokens still waiting to be reattached.
    pub fn pending_tokens(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(|p| p.token.as_str())
    }

    // Graph

    pub fn graph_svg(&self) -> BoardView {
        BoardView::new(render_graph(&self.graph))
    }

    pub fn graph_add_vertex(&mut self, label: &str) -> Result<BoardView> {
        let id = self.graph.add_vertex(label)?;
        Ok(BoardView {
            id: Some(id.to_string()),
            ..self.graph_svg()
        })
    }

    pub fn graph_delete_vertex(&mut self, id: &str) -> Result<BoardView> {
        self.graph.delete_vertex(id.parse()?)?;
        Ok(self.graph_svg())
    }

    pub fn graph_add_edge(&mut self, u: &str, v: &str, directed: bool) -> Result<BoardView> {
        let (u, v): (VertexId, VertexId) = (u.parse()?, v.parse()?);
        self.graph.add_edge(u, v, directed)?;
        Ok(self.graph_svg())
    }

    pub fn graph_set_weight(&mut self, u: &str, v: &str, weight: u32) -> Result<BoardView> {
        if weight == 0 {
            return Err(Error::InvalidInput("weight must be positive".into()));
        }
        let (u, v): (VertexId, VertexId) = (u.parse()?, v.parse()?);
        self.graph.set_weight(u, v, weight)?;
        Ok(self.graph_svg())
    }

    pub fn graph_reset(&mut self) -> BoardView {
        self.graph.clear();
        self.graph_svg()
    }

    fn forest_mut(&mut self, board: Board) -> &mut Forest<String> {
        match board {
            Board::BinaryTree => &mut self.binary,
            _ => &mut self.tree,
        }
    }

    fn set_edge_weight(&mut self, board: Board, parent: &str, child: &str, weight: u32) -> Result<BoardView> {
        if weight == 0 {
            return Err(Error::InvalidInput("weight must be positive".into()));
        }
        let forest = self.forest_mut(board);
        let parent = resolve_node(forest, parent)?;
        let key = child.trim();
        let child = forest
            .children(parent)
            .into_iter()
            .find(|&id| id.to_string() == key || forest.value(id).is_some_and(|v| v.as_str() == key))
            .ok_or_else(|| chalkboard_structures::Error::NodeNotFound(format!("{parent}->{key}")))?;
        forest.set_edge_weight(parent, child, weight)?;
        Ok(BoardView::new(render_forest(&*forest)))
    }

    fn detach_node<R: Rng + ?Sized>(&mut self, board: Board, id: &str, rng: &mut R) -> Result<DetachView> {
        let forest = self.forest_mut(board);
        let node = resolve_node(forest, id)?;
        let token = forest.detach(node)?;

        let svg = render_forest(&*forest);
        let (detached_svg, detached_root) = match forest.pending(token) {
            Some(subtree) => (
                Some(render_forest(subtree)),
                subtree.get(subtree.root()).map(|n| n.value().clone()),
            ),
            None => (None, None),
        };

        Ok(DetachView {
            ok: true,
            svg,
            token: Some(self.park(board, token, rng)),
            detached_svg,
            detached_root,
            detached_root_id: Some(node.to_string()),
        })
    }

    /// Mint an opaque public token for a parked subtree.
    fn park<R: Rng + ?Sized>(&mut self, board: Board, token: DetachToken, rng: &mut R) -> String {
        while self.pending.len() >= MAX_PENDING {
            self.drop_oldest_pending();
        }
        let public = format!("{:032x}", rng.gen::<u128>());
        tracing::debug!(token = %public, ?board, "subtree parked");
        self.pending.push_back(Parked {
            token: public.clone(),
            board,
            inner: token,
        });
        public
    }

    fn drop_oldest_pending(&mut self) {
        let Some(oldest) = self.pending.pop_front() else {
            return;
        };
        let freed = match oldest.board {
            Board::Bst => self.bst.discard(oldest.inner),
            board => self.forest_mut(board).take_pending(oldest.inner).map(drop),
        };
        match freed {
            Ok(()) => tracing::debug!(token = %oldest.token, board = ?oldest.board, "oldest parked subtree dropped"),
            Err(e) => tracing::warn!(token = %oldest.token, error = %e, "expired token had no subtree"),
        }
    }
}

fn non_blank(key: Option<&str>) -> Option<&str> {
    key.map(str::trim).filter(|k| !k.is_empty())
}

/// Resolve a node by id text or value.
fn resolve_node(forest: &Forest<String>, key: &str) -> Result<NodeId> {
    let key = require_value(key)?;
    forest
        .find(key)
        .ok_or_else(|| chalkboard_structures::Error::NodeNotFound(key.to_string()).into())
}

/// Resolve a reattach parent. A blank or missing key means a new root.
fn resolve_parent(
    forest: &Forest<String>,
    key: Option<&str>,
) -> Result<Option<NodeId>> {
    match non_blank(key) {
        None => Ok(None),
        Some(key) => forest
            .find(key)
            .map(Some)
            .ok_or_else(|| chalkboard_structures::Error::ParentNotFound(key.to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn text(s: &str) -> Scalar {
        Scalar::Text(s.to_string())
    }

    #[test]
    fn scalar_accepts_numbers_and_text() {
        let n: Scalar = serde_json::from_str("12").unwrap();
        let t: Scalar = serde_json::from_str("\" 12 \"").unwrap();
        assert_eq!(n.as_int().unwrap(), 12);
        assert_eq!(t.as_int().unwrap(), 12);
        assert!(matches!(text("twelve").as_int(), Err(Error::InvalidInput(_))));
        assert_eq!(Scalar::Int(-3).to_string(), "-3");
    }

    #[test]
    fn stack_and_queue_round() {
        let mut bench = Workbench::default();
        bench.push("a").unwrap();
        let view = bench.push("b").unwrap();
        assert!(view.svg.contains(">b</text>"));
        assert_eq!(bench.pop().value.as_deref(), Some("b"));
        assert!(bench.push("   ").is_err());

        bench.enqueue("x").unwrap();
        bench.enqueue("y").unwrap();
        assert_eq!(bench.dequeue().value.as_deref(), Some("x"));
        assert_eq!(bench.dequeue().value.as_deref(), Some("y"));
        assert_eq!(bench.dequeue().value, None);
    }

    #[test]
    fn tree_insert_falls_back_to_new_root() {
        let mut bench = Workbench::default();
        bench.tree_insert("root", None).unwrap();
        bench.tree_insert("child", Some("root")).unwrap();
        bench.tree_insert("orphan", Some("nobody")).unwrap();

        assert_eq!(bench.tree.roots().len(), 2);
        let root = bench.tree.roots()[0];
        assert_eq!(bench.tree.children(root).len(), 1);
    }

    #[test]
    fn bt_add_without_parent_uses_first_root() {
        let mut bench = Workbench::default();
        bench.bt_add(Side::Left, "a", None).unwrap();
        bench.bt_add(Side::Left, "b", None).unwrap();
        assert_eq!(bench.binary.roots().len(), 1);

        bench.bt_add(Side::Left, "c", None).unwrap();
        assert_eq!(bench.binary.roots().len(), 2);

        bench.bt_add(Side::Right, "d", Some("a")).unwrap();
        let a = bench.binary.roots()[0];
        let right = bench.binary.get(a).unwrap().kind().child(Side::Right);
        assert_eq!(right.and_then(|id| bench.binary.value(id)).map(String::as_str), Some("d"));
    }

    #[test]
    fn tree_detach_and_reattach_by_token() {
        let mut rng = rng();
        let mut bench = Workbench::default();
        bench.tree_insert("root", None).unwrap();
        bench.tree_insert("branch", Some("root")).unwrap();
        bench.tree_insert("leaf", Some("branch")).unwrap();
        bench.tree_insert("other", None).unwrap();

        let view = bench.tree_delete("branch", &mut rng).unwrap();
        let token = view.token.unwrap();
        assert_eq!(token.len(), 32);
        assert_eq!(view.detached_root.as_deref(), Some("branch"));
        assert!(view.detached_svg.unwrap().contains("data-val=\"leaf\""));
        assert!(!view.svg.contains("data-val=\"leaf\""));

        let err = bench.reattach(&token, Some("missing")).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
        assert_eq!(bench.pending_tokens().count(), 1);

        let view = bench.reattach(&token, Some("other")).unwrap();
        assert!(view.svg.contains("data-val=\"leaf\""));
        assert_eq!(bench.pending_tokens().count(), 0);
        assert!(matches!(bench.reattach(&token, None), Err(Error::NotFound(_))));
    }

    #[test]
    fn pending_tokens_are_capped() {
        let mut rng = rng();
        let mut bench = Workbench::default();
        let mut tokens = Vec::new();
        for i in 0..MAX_PENDING + 5 {
            let value = format!("v{i}");
            bench.tree_insert(&value, None).unwrap();
            tokens.push(bench.tree_delete(&value, &mut rng).unwrap().token.unwrap());
        }

        assert_eq!(bench.pending_tokens().count(), MAX_PENDING);
        assert_eq!(bench.tree.pending_tokens().count(), MAX_PENDING);
        assert!(matches!(bench.reattach(&tokens[0], None), Err(Error::NotFound(_))));
        bench.reattach(tokens.last().unwrap(), None).unwrap();
        assert_eq!(bench.tree.roots().len(), 1);
    }

    #[test]
    fn expired_bst_tokens_free_their_subtree() {
        let mut rng = rng();
        let mut bench = Workbench::default();
        for v in 0..(MAX_PENDING as i64 + 1) {
            bench.bst_insert(&Scalar::Int(v)).unwrap();
            bench.bst_detach(&Scalar::Int(v), &mut rng).unwrap();
        }
        assert_eq!(bench.pending_tokens().count(), MAX_PENDING);
        assert_eq!(bench.bst.forest().pending_tokens().count(), MAX_PENDING);
    }

    #[test]
    fn tree_edges_take_weight_labels() {
        let mut bench = Workbench::default();
        bench.tree_insert("root", None).unwrap();
        bench.tree_insert("leaf", Some("root")).unwrap();

        let view = bench.tree_set_weight("root", "leaf", 4).unwrap();
        assert!(view.svg.contains("stroke-width=\"4\""));
        assert!(view.svg.contains(">4</text>"));

        let view = bench.tree_set_weight("root", "leaf", 1).unwrap();
        assert!(!view.svg.contains(">4</text>"));

        assert!(matches!(bench.tree_set_weight("root", "leaf", 0), Err(Error::InvalidInput(_))));
        let err = bench.tree_set_weight("leaf", "root", 2).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn bt_edge_weight_by_node_id() {
        let mut bench = Workbench::default();
        bench.bt_add_root("a").unwrap();
        bench.bt_add(Side::Right, "b", Some("a")).unwrap();
        let root = bench.binary.roots()[0];
        let child = bench.binary.children(root)[0];

        bench.bt_set_weight(&root.to_string(), &child.to_string(), 6).unwrap();
        assert_eq!(bench.binary.weight(root, child), 6);
        assert!(bench.bt_set_weight("a", "zzz", 2).is_err());
    }

    #[test]
    fn bt_delete_unknown_node() {
        let mut bench = Workbench::default();
        bench.bt_add_root("a").unwrap();
        let err = bench.bt_delete("zzz", &mut rng()).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn bst_detach_then_reattach_keeps_order() {
        let mut rng = rng();
        let mut bench = Workbench::default();
        for v in [50, 30, 70, 20, 40] {
            bench.bst_insert(&Scalar::Int(v)).unwrap();
        }

        let view = bench.bst_detach(&text("30"), &mut rng).unwrap();
        assert_eq!(view.detached_root.as_deref(), Some("30"));
        assert!(!bench.bst_search(&Scalar::Int(20)).unwrap().found);

        bench.reattach(&view.token.unwrap(), Some("ignored")).unwrap();
        assert_eq!(bench.bst.values_in_order(), vec![20, 30, 40, 50, 70]);
        assert_eq!(bench.bst_max().max, Some(70));
        assert_eq!(bench.bst_height().height, 3);
    }

    #[test]
    fn bst_detach_missing_value_parks_nothing() {
        let mut bench = Workbench::default();
        bench.bst_insert(&Scalar::Int(1)).unwrap();
        let view = bench.bst_detach(&Scalar::Int(2), &mut rng()).unwrap();
        assert!(view.token.is_none());
        assert_eq!(bench.pending_tokens().count(), 0);
    }

    #[test]
    fn bst_delete_restructures() {
        let mut bench = Workbench::default();
        for v in [8, 4, 12] {
            bench.bst_insert(&Scalar::Int(v)).unwrap();
        }
        assert_eq!(bench.bst_delete(&Scalar::Int(8)).unwrap().found, Some(true));
        assert_eq!(bench.bst_delete(&Scalar::Int(8)).unwrap().found, Some(false));
        assert_eq!(bench.bst.values_in_order(), vec![4, 12]);
    }

    #[test]
    fn graph_edits_by_vertex_id() {
        let mut bench = Workbench::default();
        let a = bench.graph_add_vertex("A").unwrap().id.unwrap();
        let b = bench.graph_add_vertex("B").unwrap().id.unwrap();

        bench.graph_add_edge(&a, &b, false).unwrap();
        let view = bench.graph_add_edge(&a, &b, false).unwrap();
        assert!(view.svg.contains(">2</text>"));

        assert!(bench.graph_set_weight(&a, &b, 0).is_err());
        assert!(bench.graph_add_edge(&a, "v99", false).is_err());
        assert!(bench.graph_delete_vertex("bogus").is_err());

        bench.graph_delete_vertex(&b).unwrap();
        assert_eq!(bench.graph.edge_count(), 0);
        bench.graph_reset();
        assert_eq!(bench.graph.vertex_count(), 0);
    }

    #[test]
    fn sort_back_on_bubble_has_no_status() {
        let mut rng = rng();
        let mut bench = Workbench::default();
        bench.sort_reset(Algorithm::Bubble, &mut rng);
        bench.sort_step(Algorithm::Bubble, &mut rng);
        let back = bench.sort_back(Algorithm::Bubble);
        assert!(back.status.is_none());
        assert!(back.array.is_none());

        bench.sort_reset(Algorithm::Merge, &mut rng);
        bench.sort_step(Algorithm::Merge, &mut rng);
        bench.sort_step(Algorithm::Merge, &mut rng);
        let back = bench.sort_back(Algorithm::Merge);
        assert!(back.array.is_some());
        assert!(back.status.is_some());
    }
}
