//! Directed multigraph assembly from extracted entity pairs.

mod dot;

use std::collections::HashMap;

use serde::Serialize;

use crate::extract::EntityPair;

/// A directed multigraph of entity relations.
///
/// Node identity is the literal entity text (case-sensitive,
/// whitespace-preserving); nodes are stored in first-seen order and edges
/// in insertion order. Self-loops and parallel edges are kept as-is.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlowGraph {
    nodes: Vec<String>,
    #[serde(skip)]
    node_index: HashMap<String, usize>,
    /// (source index, target index) per extracted pair
    edges: Vec<(usize, usize)>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node if unseen and return its index. Idempotent.
    fn add_node(&mut self, text: &str) -> usize {
        if let Some(&idx) = self.node_index.get(text) {
            return idx;
        }

        let idx = self.nodes.len();
        self.nodes.push(text.to_string());
        self.node_index.insert(text.to_string(), idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node texts in insertion order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Edges as (source-text, target-text), in insertion order. This is the
    /// contract surface for renderers.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges
            .iter()
            .map(move |&(s, t)| (self.nodes[s].as_str(), self.nodes[t].as_str()))
    }
}

/// Assemble a directed multigraph from an ordered pair sequence.
///
/// Each pair inserts both endpoints (no-op when already present) and
/// appends one edge, duplicates included. Pairs with an empty subject or
/// object are skipped; nothing else can fail, and an empty input yields an
/// empty graph rather than an error.
pub fn assemble(pairs: &[EntityPair]) -> FlowGraph {
    let mut graph = FlowGraph::new();

    for pair in pairs {
        if pair.subject.is_empty() || pair.object.is_empty() {
            continue;
        }
        let source = graph.add_node(&pair.subject);
        let target = graph.add_node(&pair.object);
        graph.edges.push((source, target));
    }

    graph
}
