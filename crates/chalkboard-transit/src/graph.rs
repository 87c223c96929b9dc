//! Undirected weighted graph with time and distance on every edge.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use serde::{Deserialize, Serialize};

/// Cost of travelling one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Edge {
    pub minutes: u32,
    pub meters: u32,
}

impl Edge {
    pub const fn new(minutes: u32, meters: u32) -> Self {
        Self { minutes, meters }
    }
}

impl std::ops::Add for Edge {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            minutes: self.minutes.saturating_add(other.minutes),
            meters: self.meters.saturating_add(other.meters),
        }
    }
}

/// Answer to a shortest-path query.
///
/// An empty path with zero totals means no route exists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Route {
    pub path: Vec<String>,
    pub minutes: u32,
    pub meters: u32,
}

impl Route {
    /// The "no route" answer.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// A priority-queue entry carrying the complete path so far.
///
/// Ordered by time, then station name, then path, so ties resolve the same
/// way on every run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Frontier {
    minutes: u32,
    station: String,
    path: Vec<String>,
}

/// A simple undirected graph keyed by station name.
///
/// Both directions of an edge always hold the same weights. Re-adding a
/// pair overwrites its weights instead of adding a parallel edge.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: BTreeMap<String, BTreeMap<String, Edge>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station with no connections. No-op if it already exists.
    pub fn add_station(&mut self, name: impl Into<String>) {
        self.adjacency.entry(name.into()).or_default();
    }

    /// Connect `u` and `v` in both directions, creating either station as needed.
    pub fn add_edge(&mut self, u: &str, v: &str, edge: Edge) {
        self.adjacency
            .entry(u.to_string())
            .or_default()
            .insert(v.to_string(), edge);
        self.adjacency
            .entry(v.to_string())
            .or_default()
            .insert(u.to_string(), edge);
    }

    pub fn contains(&self, station: &str) -> bool {
        self.adjacency.contains_key(station)
    }

    /// Weights of the edge between `u` and `v`, if they are adjacent.
    pub fn edge(&self, u: &str, v: &str) -> Option<Edge> {
        self.adjacency.get(u)?.get(v).copied()
    }

    /// Station names in sorted order.
    pub fn stations(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn station_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum::<usize>() / 2
    }

    /// Neighbors of `station` with the connecting edge, in name order.
    pub fn neighbors<'a>(&'a self, station: &str) -> impl Iterator<Item = (&'a str, Edge)> + 'a {
        self.adjacency
            .get(station)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(name, edge)| (name.as_str(), *edge)))
    }

    /// Total weights along `path`, or `None` if two consecutive stations
    /// are not adjacent. A single-station path costs nothing.
    pub fn path_cost<S: AsRef<str>>(&self, path: &[S]) -> Option<Edge> {
        path.windows(2).try_fold(Edge::default(), |total, pair| {
            self.edge(pair[0].as_ref(), pair[1].as_ref())
                .map(|edge| total + edge)
        })
    }

    /// Fastest route from `src` to `dst` by total minutes.
    ///
    /// The distance reported is the distance along that fastest route, not
    /// the shortest distance overall. Unknown stations and disconnected
    /// pairs yield [`Route::none`].
    pub fn shortest_path(&self, src: &str, dst: &str) -> Route {
        if !self.contains(src) || !self.contains(dst) {
            tracing::debug!(src, dst, "unknown station in route query");
            return Route::none();
        }

        let mut heap = BinaryHeap::new();
        heap.push(Reverse(Frontier {
            minutes: 0,
            station: src.to_string(),
            path: vec![src.to_string()],
        }));
        let mut visited: BTreeSet<String> = BTreeSet::new();

        while let Some(Reverse(Frontier { minutes, station, path })) = heap.pop() {
            if station == dst {
                let meters = self.path_cost(&path).map_or(0, |cost| cost.meters);
                tracing::debug!(src, dst, minutes, meters, hops = path.len() - 1, "route found");
                return Route { path, minutes, meters };
            }

            if visited.contains(&station) {
                continue;
            }

            for (neighbor, edge) in self.neighbors(&station) {
                if visited.contains(neighbor) {
                    continue;
                }
                let mut next = path.clone();
                next.push(neighbor.to_string());
                heap.push(Reverse(Frontier {
                    minutes: minutes.saturating_add(edge.minutes),
                    station: neighbor.to_string(),
                    path: next,
                }));
            }

            visited.insert(station);
        }

        tracing::debug!(src, dst, "no route");
        Route::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph {
        // a --1-- b --1-- d
        //  \             /
        //   ----5-- c --1
        let mut g = Graph::new();
        g.add_edge("a", "b", Edge::new(1, 900));
        g.add_edge("b", "d", Edge::new(1, 900));
        g.add_edge("a", "c", Edge::new(5, 100));
        g.add_edge("c", "d", Edge::new(1, 100));
        g
    }

    #[test]
    fn edges_are_symmetric() {
        let g = diamond();
        assert_eq!(g.edge("a", "b"), Some(Edge::new(1, 900)));
        assert_eq!(g.edge("b", "a"), Some(Edge::new(1, 900)));
        assert_eq!(g.edge("a", "d"), None);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.station_count(), 4);
    }

    #[test]
    fn re_adding_overwrites() {
        let mut g = diamond();
        g.add_edge("b", "a", Edge::new(7, 7));
        assert_eq!(g.edge("a", "b"), Some(Edge::new(7, 7)));
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn fastest_not_shortest() {
        let route = diamond().shortest_path("a", "d");
        assert_eq!(route.path, vec!["a", "b", "d"]);
        assert_eq!(route.minutes, 2);
        // Distance follows the fastest path even though a-c-d is shorter.
        assert_eq!(route.meters, 1800);
    }

    #[test]
    fn same_station_is_free() {
        let route = diamond().shortest_path("c", "c");
        assert_eq!(route.path, vec!["c"]);
        assert_eq!((route.minutes, route.meters), (0, 0));
    }

    #[test]
    fn unknown_station_is_no_route() {
        let g = diamond();
        assert_eq!(g.shortest_path("a", "zz"), Route::none());
        assert_eq!(g.shortest_path("zz", "a"), Route::none());
        assert!(!Route::none().is_found());
    }

    #[test]
    fn disconnected_is_no_route() {
        let mut g = diamond();
        g.add_station("island");
        g.add_station("island");
        assert!(g.contains("island"));
        assert_eq!(g.shortest_path("a", "island"), Route::none());
    }

    #[test]
    fn ties_break_by_station_name() {
        // Two equal-time routes from s to t: via "m" and via "n".
        let mut g = Graph::new();
        g.add_edge("s", "n", Edge::new(1, 10));
        g.add_edge("n", "t", Edge::new(1, 10));
        g.add_edge("s", "m", Edge::new(1, 20));
        g.add_edge("m", "t", Edge::new(1, 20));

        for _ in 0..5 {
            let route = g.shortest_path("s", "t");
            assert_eq!(route.path, vec!["s", "m", "t"]);
            assert_eq!(route.meters, 40);
        }
    }

    #[test]
    fn path_cost_checks_adjacency() {
        let g = diamond();
        assert_eq!(g.path_cost(&["a", "b", "d"]), Some(Edge::new(2, 1800)));
        assert_eq!(g.path_cost(&["a"]), Some(Edge::default()));
        assert_eq!(g.path_cost(&["a", "d"]), None);
    }

    #[test]
    fn neighbors_in_name_order() {
        let g = diamond();
        let names: Vec<&str> = g.neighbors("a").map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "c"]);
        assert_eq!(g.neighbors("missing").count(), 0);
    }

    #[test]
    fn route_serializes() {
        let route = diamond().shortest_path("a", "b");
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["path"], serde_json::json!(["a", "b"]));
        assert_eq!(json["minutes"], 1);
        assert_eq!(json["meters"], 900);
    }
}
