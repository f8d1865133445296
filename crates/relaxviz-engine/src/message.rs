//! Status line text for each step.
//!
//! The wording is fixed: golden traces compare these strings verbatim.

use crate::distance::{Distance, UNREACHABLE_MARKER};
use crate::graph::{Edge, VertexId};

pub(crate) fn init(source: VertexId) -> String {
    format!("Initialize: Source node {source} = 0, all others = {UNREACHABLE_MARKER}")
}

pub(crate) fn iteration_start(iteration: usize, max_iterations: usize) -> String {
    format!("Iteration {iteration} of {max_iterations}: Relaxing all edges...")
}

pub(crate) fn check_edge(edge: &Edge) -> String {
    format!("Checking edge {} → {} (weight {})", edge.from, edge.to, edge.weight)
}

pub(crate) fn relax(edge: &Edge, new_distance: Distance) -> String {
    format!(
        "Relaxing edge {} → {}. Distance to {} updated to {}.",
        edge.from, edge.to, edge.to, new_distance
    )
}

pub(crate) fn set_predecessor(edge: &Edge) -> String {
    format!(
        "Setting prev[{v}] = {u}. Node {u} is now predecessor of {v}.",
        u = edge.from,
        v = edge.to
    )
}

pub(crate) fn no_relax(edge: &Edge) -> String {
    format!(
        "No relaxation: dist[{}] + {} ≥ dist[{}]",
        edge.from, edge.weight, edge.to
    )
}

pub(crate) fn early_stop(iteration: usize) -> String {
    format!("No changes in iteration {iteration}. Algorithm can stop early.")
}

pub(crate) const NEGATIVE_CYCLE: &str = "⚠️ Negative cycle detected! Shortest paths are undefined.";

pub(crate) const COMPLETE: &str = "✓ Algorithm complete! Shortest paths found.";

/// Shown when stepping backward from the first step.
pub const AT_START: &str = "Already at the beginning of the algorithm.";
