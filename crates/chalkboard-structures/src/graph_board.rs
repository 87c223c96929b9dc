//! Free-form graph editor.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::require_value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(u64);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl FromStr for VertexId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .strip_prefix('v')
            .and_then(|digits| digits.parse().ok())
            .map(VertexId)
            .ok_or_else(|| Error::VertexNotFound(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    pub label: String,
}

/// Vertices in insertion order plus weighted directed edges.
///
/// An undirected edge is stored as two directed ones. Adding an edge that
/// already exists bumps its weight instead of duplicating it.
#[derive(Debug, Clone, Default)]
pub struct GraphBoard {
    vertices: Vec<Vertex>,
    edges: BTreeMap<(VertexId, VertexId), u32>,
    next_id: u64,
}

impl GraphBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a labelled vertex. Blank labels are rejected.
    pub fn add_vertex(&mut self, label: &str) -> Result<VertexId> {
        let label = require_value(label)?;
        self.next_id += 1;
        let id = VertexId(self.next_id);
        self.vertices.push(Vertex {
            id,
            label: label.to_string(),
        });
        Ok(id)
    }

    /// Remove a vertex and every edge touching it.
    pub fn delete_vertex(&mut self, id: VertexId) -> Result<()> {
        let pos = self.position(id)?;
        self.vertices.remove(pos);
        self.edges.retain(|(u, v), _| *u != id && *v != id);
        Ok(())
    }

    /// Connect `u` to `v`, and `v` to `u` unless `directed`.
    ///
    /// Returns the resulting weight of `u -> v`.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, directed: bool) -> Result<u32> {
        self.position(u)?;
        self.position(v)?;

        let weight = self.bump(u, v);
        if !directed && u != v {
            self.bump(v, u);
        }
        Ok(weight)
    }

    /// Overwrite the weight of `u -> v`, creating the edge if needed.
    pub fn set_weight(&mut self, u: VertexId, v: VertexId, weight: u32) -> Result<()> {
        self.position(u)?;
        self.position(v)?;
        self.edges.insert((u, v), weight);
        Ok(())
    }

    pub fn weight(&self, u: VertexId, v: VertexId) -> Option<u32> {
        self.edges.get(&(u, v)).copied()
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.id == id)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Directed edges with their weights, ordered by endpoint ids.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId, u32)> + '_ {
        self.edges.iter().map(|(&(u, v), &w)| (u, v, w))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
    }

    fn position(&self, id: VertexId) -> Result<usize> {
        self.vertices
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| Error::VertexNotFound(id.to_string()))
    }

    fn bump(&mut self, u: VertexId, v: VertexId) -> u32 {
        let weight = self.edges.entry((u, v)).or_insert(0);
        *weight += 1;
        *weight
    }
}
