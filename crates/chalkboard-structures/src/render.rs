//! SVG renderers for the boards.
//!
//! Each renderer is a pure function of the board it draws. Node circles
//! carry `data-id` and `data-val` so a client can bind click handlers.

use std::f64::consts::TAU;
use std::fmt::Display;

use chalkboard_svg::{Element, Point, SvgDocument};

use crate::arena::{NodeId, Shape, Side, TreeView, DEFAULT_WEIGHT};
use crate::graph_board::{GraphBoard, VertexId};
use crate::linear::{Queue, Stack};

const NODE_RADIUS: i64 = 25;
const LEVEL_GAP: i64 = 100;
const FOREST_WIDTH: i64 = 1000;

/// Stack boxes, top of the stack first.
pub fn render_stack<T: Display>(stack: &Stack<T>) -> String {
    let len = stack.len() as i64;
    let mut doc = SvgDocument::new(200, (80 * len + 20).max(120));
    for (i, value) in stack.iter().enumerate() {
        let y = 20 + i as i64 * 80;
        doc.push(boxed(Point::new(40, y), 120, "#90f1a9"));
        doc.push(label(Point::new(100, y + 36), value));
    }
    doc.finish()
}

/// Queue boxes, front of the queue on the left.
pub fn render_queue<T: Display>(queue: &Queue<T>) -> String {
    let len = queue.len().max(1) as i64;
    let mut doc = SvgDocument::new((120 * len).max(300), 120);
    for (i, value) in queue.iter().enumerate() {
        let x = 20 + i as i64 * 120;
        doc.push(boxed(Point::new(x, 30), 100, "#4cc9ff"));
        doc.push(label(Point::new(x + 50, 65), value));
    }
    doc.finish()
}

fn boxed(corner: Point, width: i64, fill: &str) -> Element {
    Element::rect(corner, width, 60)
        .attr("rx", 8)
        .attr("fill", fill)
        .attr("stroke", "#fff")
}

fn label(at: Point, value: impl Display) -> Element {
    Element::text(at, value.to_string())
        .attr("font-size", 18)
        .attr("text-anchor", "middle")
        .attr("fill", "#000")
}

/// Every tree of a forest or detached subtree, stacked top to bottom.
///
/// Binary trees place children at a horizontal spread that halves each
/// level. N-ary trees share a span evenly between children, halving it
/// per level down to a floor of 60.
pub fn render_forest<T>(trees: &T) -> String
where
    T: TreeView,
    T::Value: Display,
{
    let roots = trees.tree_roots();
    if roots.is_empty() {
        return SvgDocument::new(FOREST_WIDTH, 200).finish();
    }

    let shape = trees.tree_shape();
    let (top, band) = match shape {
        Shape::Binary => (50, 300),
        Shape::NAry => (40, 260),
    };

    let mut painter = ForestPainter {
        trees,
        doc: SvgDocument::new(FOREST_WIDTH, band * roots.len() as i64),
    };
    for (i, &root) in roots.iter().enumerate() {
        let at = Point::new(FOREST_WIDTH / 2, top + i as i64 * band);
        match shape {
            Shape::Binary => painter.binary(root, at, 200),
            Shape::NAry => painter.nary(root, at, 200),
        }
    }
    painter.doc.finish()
}

/// Colors and text metrics for one forest shape.
struct NodeStyle {
    fill: &'static str,
    stroke: &'static str,
    ink: &'static str,
    baseline: i64,
    font_size: u32,
}

const BINARY_STYLE: NodeStyle = NodeStyle {
    fill: "#ff6b6b",
    stroke: "white",
    ink: "black",
    baseline: 6,
    font_size: 18,
};

const NARY_STYLE: NodeStyle = NodeStyle {
    fill: "#f8c537",
    stroke: "#fff",
    ink: "#000",
    baseline: 5,
    font_size: 20,
};

struct ForestPainter<'a, T> {
    trees: &'a T,
    doc: SvgDocument,
}

impl<T> ForestPainter<'_, T>
where
    T: TreeView,
    T::Value: Display,
{
    fn binary(&mut self, id: NodeId, at: Point, spread: i64) {
        let trees = self.trees;
        let Some(node) = trees.tree_node(id) else {
            return;
        };
        for (side, dx) in [(Side::Left, -spread), (Side::Right, spread)] {
            if let Some(child) = node.kind().child(side) {
                let to = at.offset(dx, LEVEL_GAP);
                self.edge(id, child, at, to, &BINARY_STYLE);
                self.binary(child, to, spread / 2);
            }
        }
        self.node(id, node.value(), at, &BINARY_STYLE);
    }

    fn nary(&mut self, id: NodeId, at: Point, span: i64) {
        let trees = self.trees;
        let Some(node) = trees.tree_node(id) else {
            return;
        };
        let children = node.children();
        let n = children.len() as i64;
        let gap = span / n.max(1);
        for (i, &child) in children.iter().enumerate() {
            // Children are centred under the parent.
            let x = (2 * at.x - gap * (n - 1) + 2 * i as i64 * gap) / 2;
            let to = Point::new(x, at.y + LEVEL_GAP);
            self.edge(id, child, at, to, &NARY_STYLE);
            self.nary(child, to, (span / 2).max(60));
        }
        self.node(id, node.value(), at, &NARY_STYLE);
    }

    fn edge(&mut self, parent: NodeId, child: NodeId, from: Point, to: Point, style: &NodeStyle) {
        let weight = self.trees.edge_weight(parent, child);
        self.doc.push(
            Element::line(from, to)
                .attr("stroke", style.stroke)
                .attr("stroke-width", weight),
        );
        if weight > DEFAULT_WEIGHT {
            self.doc.push(weight_label(from.midpoint(&to), weight));
        }
    }

    fn node(&mut self, id: NodeId, value: &T::Value, at: Point, style: &NodeStyle) {
        let text = value.to_string();
        self.doc.push(
            Element::circle(at, NODE_RADIUS)
                .attr("fill", style.fill)
                .attr("stroke", style.stroke)
                .attr("data-id", id)
                .attr("data-val", &text),
        );
        self.doc.push(
            Element::text(at.offset(0, style.baseline), text)
                .attr("text-anchor", "middle")
                .attr("font-size", style.font_size)
                .attr("fill", style.ink),
        );
    }
}

fn weight_label(at: Point, weight: u32) -> Element {
    Element::text(at, weight.to_string())
        .attr("font-size", 14)
        .attr("text-anchor", "middle")
        .attr("fill", "#fff")
}

/// Vertices on a circle, edges as straight lines.
pub fn render_graph(graph: &GraphBoard) -> String {
    let (width, height) = (800, 400);
    let mut doc = SvgDocument::new(width, height);
    if graph.vertices().is_empty() {
        return doc.finish();
    }

    let center = Point::new(width / 2, height / 2);
    let radius = (center.x.min(center.y) - 80) as f64 * 0.9;
    let n = graph.vertices().len() as f64;
    let positions: Vec<_> = graph
        .vertices()
        .iter()
        .enumerate()
        .map(|(i, vertex)| {
            let angle = TAU * i as f64 / n;
            let at = Point::new(
                center.x + (radius * angle.cos()) as i64,
                center.y + (radius * angle.sin()) as i64,
            );
            (vertex, at)
        })
        .collect();
    let position = |id: VertexId| positions.iter().find(|(v, _)| v.id == id).map(|(_, at)| *at);

    for (u, v, weight) in graph.edges() {
        let (Some(from), Some(to)) = (position(u), position(v)) else {
            continue;
        };
        doc.push(
            Element::line(from, to)
                .attr("stroke", "#fff")
                .attr("stroke-width", weight),
        );
        if weight > 1 {
            doc.push(weight_label(from.midpoint(&to), weight));
        }
    }

    for (vertex, at) in &positions {
        doc.push(
            Element::circle(*at, 20)
                .attr("fill", "#7bd389")
                .attr("stroke", "#fff")
                .attr("data-id", vertex.id)
                .attr("data-val", &vertex.label),
        );
        doc.push(
            Element::text(at.offset(0, 6), vertex.label.clone())
                .attr("text-anchor", "middle")
                .attr("font-size", 14)
                .attr("fill", "#000"),
        );
    }
    doc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Forest;

    fn count(svg: &str, needle: &str) -> usize {
        svg.matches(needle).count()
    }

    #[test]
    fn stack_grows_downward() {
        let mut stack = Stack::new();
        assert!(render_stack(&stack).contains("height=\"120\""));

        for v in ["a", "b", "c"] {
            stack.push(v);
        }
        let svg = render_stack(&stack);
        assert!(svg.contains("height=\"260\""));
        assert_eq!(count(&svg, "<rect"), 3);
        // Top of the stack is drawn first.
        let c = svg.find(">c<").unwrap();
        let a = svg.find(">a<").unwrap();
        assert!(c < a);
    }

    #[test]
    fn queue_widens_with_length() {
        let mut queue = Queue::new();
        assert!(render_queue(&queue).contains("width=\"300\""));
        for v in 0..4 {
            queue.enqueue(v);
        }
        let svg = render_queue(&queue);
        assert!(svg.contains("width=\"480\""));
        assert!(svg.contains("x=\"380\""));
    }

    #[test]
    fn values_are_escaped() {
        let mut stack = Stack::new();
        stack.push("<b>&");
        let svg = render_stack(&stack);
        assert!(svg.contains("&lt;b&gt;&amp;"));
        assert!(!svg.contains("<b>"));
    }

    #[test]
    fn empty_forest() {
        let forest: Forest<String> = Forest::nary();
        let svg = render_forest(&forest);
        assert!(svg.contains("width=\"1000\" height=\"200\""));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn binary_layout() {
        let mut forest = Forest::binary();
        let root = forest.add_root("r");
        forest.add_child(root, Side::Left, "l").unwrap();
        forest.add_child(root, Side::Right, "x").unwrap();
        let svg = render_forest(&forest);

        assert!(svg.contains("height=\"300\""));
        assert!(svg.contains("<circle cx=\"500\" cy=\"50\""));
        assert!(svg.contains("<circle cx=\"300\" cy=\"150\""));
        assert!(svg.contains("<circle cx=\"700\" cy=\"150\""));
        assert!(svg.contains(&format!("data-id=\"{root}\"")));
        assert!(svg.contains("data-val=\"x\""));
    }

    #[test]
    fn nary_layout_centres_children() {
        let mut forest = Forest::nary();
        let root = forest.add_root(1);
        for v in 2..=4 {
            forest.insert_under(root, v).unwrap();
        }
        let svg = render_forest(&forest);
        // Span 200 over three children gives a gap of 66.
        for x in [434, 500, 566] {
            assert!(svg.contains(&format!("<circle cx=\"{x}\" cy=\"140\"")), "{x}");
        }
    }

    #[test]
    fn forests_stack_vertically() {
        let mut forest = Forest::nary();
        forest.add_root("a");
        forest.add_root("b");
        let svg = render_forest(&forest);
        assert!(svg.contains("height=\"520\""));
        assert!(svg.contains("<circle cx=\"500\" cy=\"300\""));
    }

    #[test]
    fn heavy_edges_get_labels() {
        let mut forest = Forest::nary();
        let root = forest.add_root("a");
        let child = forest.insert_under(root, "b").unwrap();
        assert!(!render_forest(&forest).contains("font-size=\"14\""));

        forest.set_edge_weight(root, child, 3).unwrap();
        let svg = render_forest(&forest);
        assert!(svg.contains("stroke-width=\"3\""));
        assert!(svg.contains(">3</text>"));
    }

    #[test]
    fn detached_subtree_renders_alone() {
        let mut forest = Forest::binary();
        let root = forest.add_root("r");
        let left = forest.add_child(root, Side::Left, "l").unwrap();
        forest.add_child(left, Side::Right, "lr").unwrap();
        let token = forest.detach(left).unwrap();

        let svg = render_forest(forest.pending(token).unwrap());
        assert!(svg.contains("height=\"300\""));
        assert!(svg.contains("<circle cx=\"500\" cy=\"50\""));
        assert!(svg.contains("<circle cx=\"700\" cy=\"150\""));
        assert!(!svg.contains("data-val=\"r\""));
    }

    #[test]
    fn graph_circle_layout() {
        let mut graph = GraphBoard::new();
        assert!(!render_graph(&graph).contains("<circle"));

        let a = graph.add_vertex("A").unwrap();
        let b = graph.add_vertex("B").unwrap();
        graph.add_edge(a, b, true).unwrap();
        graph.add_edge(a, b, true).unwrap();
        let svg = render_graph(&graph);

        assert_eq!(count(&svg, "<circle"), 2);
        // First vertex sits at angle zero, 108 units right of centre.
        assert!(svg.contains("<circle cx=\"508\" cy=\"200\""));
        assert!(svg.contains("stroke-width=\"2\""));
        assert!(svg.contains(">2</text>"));
        assert!(svg.contains(&format!("data-id=\"{a}\"")));
    }

    #[test]
    fn rendering_is_repeatable() {
        let mut graph = GraphBoard::new();
        for label in ["p", "q", "r"] {
            graph.add_vertex(label).unwrap();
        }
        assert_eq!(render_graph(&graph), render_graph(&graph));
    }
}
