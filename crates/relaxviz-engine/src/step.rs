//! Algorithm steps recorded by the trace generator.

use crate::distance::Distance;
use crate::graph::VertexId;

/// What happened at a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    /// Distances initialized from the source.
    #[cfg_attr(feature = "serde", serde(rename = "init"))]
    Init,
    /// A pass over all edges begins.
    #[cfg_attr(feature = "serde", serde(rename = "iteration-start"))]
    IterationStart,
    /// An edge is about to be tested.
    #[cfg_attr(feature = "serde", serde(rename = "check"))]
    CheckEdge,
    /// The tested edge shortened `dist[v]`.
    #[cfg_attr(feature = "serde", serde(rename = "relax"))]
    Relax,
    /// `prev[v]` now points at the edge's source.
    #[cfg_attr(feature = "serde", serde(rename = "set-prev"))]
    SetPredecessor,
    /// The tested edge did not improve anything.
    #[cfg_attr(feature = "serde", serde(rename = "no-relax"))]
    NoRelax,
    /// A full pass relaxed nothing; iteration stops.
    #[cfg_attr(feature = "serde", serde(rename = "early-stop"))]
    EarlyStop,
    /// Terminal: a reachable negative cycle exists.
    #[cfg_attr(feature = "serde", serde(rename = "negative-cycle"))]
    NegativeCycle,
    /// Terminal: shortest paths are final.
    #[cfg_attr(feature = "serde", serde(rename = "complete"))]
    Complete,
}

/// How the status line should be coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MessageTone {
    Info,
    Success,
    Warning,
}

/// Pseudocode listing for the code walkthrough panel.
pub const PSEUDOCODE: [&str; 10] = [
    "const dist = Array(V).fill(Infinity);",
    "dist[source] = 0;",
    "for (let i = 0; i < V - 1; i++) {",
    "  for (const { u, v, w } of edges) {",
    "    if (dist[u] !== Infinity && dist[u] + w < dist[v]) {",
    "      dist[v] = dist[u] + w;",
    "      prev[v] = u;",
    "    }",
    "  }",
    "}",
];

impl StepKind {
    /// Whether this kind ends a trace.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, StepKind::NegativeCycle | StepKind::Complete)
    }

    pub const fn tone(&self) -> MessageTone {
        match self {
            StepKind::Relax | StepKind::Complete => MessageTone::Success,
            StepKind::NegativeCycle => MessageTone::Warning,
            _ => MessageTone::Info,
        }
    }

    /// 1-based lines of [`PSEUDOCODE`] to highlight.
    pub const fn code_lines(&self) -> &'static [usize] {
        match self {
            StepKind::Init => &[2],
            StepKind::IterationStart | StepKind::EarlyStop => &[3],
            StepKind::CheckEdge | StepKind::NoRelax => &[5],
            StepKind::Relax => &[6],
            StepKind::SetPredecessor => &[7],
            StepKind::Complete => &[10],
            StepKind::NegativeCycle => &[],
        }
    }
}

/// One discrete moment of a run.
///
/// `distances` and `predecessors` are full snapshots owned by the step;
/// later mutation of the generator's working vectors never reaches them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub kind: StepKind,
    pub distances: Vec<Distance>,
    /// Absent on `NoRelax`, `EarlyStop` and `NegativeCycle`.
    pub predecessors: Option<Vec<Option<VertexId>>>,
    pub active_edge: Option<usize>,
    pub active_vertices: Vec<VertexId>,
    pub updated_vertex: Option<VertexId>,
    /// 1-based pass number; `None` outside the relaxation loop.
    pub iteration: Option<usize>,
    pub relaxation_count: usize,
    pub message: String,
}

impl Step {
    /// Distance of `v` at this step.
    pub fn distance(&self, v: VertexId) -> Distance {
        self.distances.get(v.0).copied().unwrap_or_default()
    }

    /// Predecessor of `v`, if this step carries a snapshot.
    pub fn predecessor(&self, v: VertexId) -> Option<Option<VertexId>> {
        self.predecessors
            .as_ref()
            .map(|prev| prev.get(v.0).copied().flatten())
    }
}
