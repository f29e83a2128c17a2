//! Graphviz DOT serialization of a flow graph.

use super::FlowGraph;

/// Escape a node ID for a quoted DOT string.
fn escape(id: &str) -> String {
    id.replace('\\', "\\\\").replace('"', "\\\"")
}

impl FlowGraph {
    /// Render the graph as Graphviz `digraph` source: one statement per
    /// distinct node, one per edge (parallel edges repeat). An empty graph
    /// renders as an empty digraph.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph {\n");

        for node in self.nodes() {
            out.push_str(&format!("    \"{}\"\n", escape(node)));
        }
        for (source, target) in self.edges() {
            out.push_str(&format!(
                "    \"{}\" -> \"{}\"\n",
                escape(source),
                escape(target)
            ));
        }

        out.push_str("}\n");
        out
    }
}
