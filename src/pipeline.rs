//! End-to-end pipeline: parse → extract pairs → assemble graph, with
//! wall-clock timing wrapped around the whole step, plus the independent
//! named-entity lister.

use std::time::{Duration, Instant};

use crate::annotate::{Annotator, NamedEntity};
use crate::error::Result;
use crate::extract::extract_entity_pairs;
use crate::graph::{assemble, FlowGraph};

/// Result of one flowchart build: the assembled graph and how long the
/// parse + extract + assemble step took.
#[derive(Debug)]
pub struct Flowchart {
    pub graph: FlowGraph,
    pub elapsed: Duration,
}

impl Flowchart {
    /// Elapsed time as fractional seconds. Presentation layers round this
    /// to two decimals for display.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Build a flowchart graph from raw text.
///
/// The annotator call is the single expensive, blocking step; extraction
/// and assembly are pure and synchronous. A parser failure aborts the
/// invocation with no partial graph. Each call is a fresh computation:
/// nothing is cached or retained across invocations.
pub async fn build_flowchart(annotator: &dyn Annotator, text: &str) -> Result<Flowchart> {
    let start = Instant::now();

    let doc = annotator.parse(text).await?;
    let pairs = extract_entity_pairs(&doc);
    let graph = assemble(&pairs);

    let elapsed = start.elapsed();
    log::debug!(
        "Built flowchart: {} tokens, {} pairs, {} nodes, {} edges in {:?}",
        doc.len(),
        pairs.len(),
        graph.node_count(),
        graph.edge_count(),
        elapsed
    );

    Ok(Flowchart { graph, elapsed })
}

/// List named entities from the leading `window_chars` characters of the
/// text, in document order.
///
/// Truncation is by character count, not token or sentence boundary;
/// mid-word cuts are expected on long input.
pub async fn list_entities(
    annotator: &dyn Annotator,
    text: &str,
    window_chars: usize,
) -> Result<Vec<NamedEntity>> {
    annotator.entities(truncate_chars(text, window_chars)).await
}

/// Leading `max_chars` characters of `text`, always on a UTF-8 boundary.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
