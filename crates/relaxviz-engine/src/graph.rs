//! Directed weighted graph fed to the trace generator.
//!
//! Vertices are dense ids in `[0, V)`. Edges keep their insertion order:
//! relaxation walks them in exactly this order, so step numbering and
//! messages depend on it. Parallel edges and self-loops are accepted.

use std::fmt;

use crate::error::InvalidGraph;

/// A vertex identifier in `[0, V)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexId(pub usize);

impl VertexId {
    /// Get the raw index.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for VertexId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Edge weight. Negative weights are allowed.
pub type Weight = i64;

/// A directed edge `from → to` with a weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: Weight,
}

impl Edge {
    /// Create an edge from raw vertex indices.
    pub const fn new(from: usize, to: usize, weight: Weight) -> Self {
        Self {
            from: VertexId(from),
            to: VertexId(to),
            weight,
        }
    }
}

/// A validated graph plus the source vertex the run starts from.
///
/// Invariants: `vertex_count >= 1`, `source < vertex_count`, and both
/// endpoints of every edge are `< vertex_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGraph"))]
pub struct Graph {
    vertex_count: usize,
    edges: Vec<Edge>,
    source: VertexId,
}

impl Graph {
    /// Validate and build a graph.
    pub fn new(
        vertex_count: usize,
        edges: Vec<Edge>,
        source: impl Into<VertexId>,
    ) -> Result<Self, InvalidGraph> {
        let source = source.into();

        if vertex_count == 0 {
            return Err(InvalidGraph::Empty);
        }
        if source.0 >= vertex_count {
            return Err(InvalidGraph::SourceOutOfRange {
                vertex: source.0,
                vertex_count,
            });
        }
        if let Some((index, edge)) = edges
            .iter()
            .enumerate()
            .find(|(_, e)| e.from.0 >= vertex_count || e.to.0 >= vertex_count)
        {
            return Err(InvalidGraph::EdgeOutOfRange {
                index,
                from: edge.from.0,
                to: edge.to.0,
                vertex_count,
            });
        }

        Ok(Self {
            vertex_count,
            edges,
            source,
        })
    }

    /// Build from `(u, v, w)` triples.
    pub fn from_triples(
        vertex_count: usize,
        triples: &[(usize, usize, Weight)],
        source: usize,
    ) -> Result<Self, InvalidGraph> {
        let edges = triples.iter().map(|&(u, v, w)| Edge::new(u, v, w)).collect();
        Self::new(vertex_count, edges, source)
    }

    /// The same graph with a different source vertex.
    pub fn with_source(&self, source: impl Into<VertexId>) -> Result<Self, InvalidGraph> {
        Self::new(self.vertex_count, self.edges.clone(), source)
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Edges in relaxation order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Source vertex.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// All vertex ids in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertex_count).map(VertexId)
    }

    /// `V × E`, the bound on relaxation checks shown in the analysis panel.
    pub fn complexity(&self) -> usize {
        self.vertex_count * self.edges.len()
    }
}

/// Unvalidated wire form of [`Graph`].
#[cfg(feature = "serde")]
#[derive(Debug, Clone, serde::Deserialize)]
struct RawGraph {
    vertex_count: usize,
    edges: Vec<Edge>,
    source: VertexId,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGraph> for Graph {
    type Error = InvalidGraph;

    fn try_from(raw: RawGraph) -> Result<Self, Self::Error> {
        Graph::new(raw.vertex_count, raw.edges, raw.source)
    }
}

/// Incremental graph assembly for the manual builder.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    vertex_count: usize,
    edges: Vec<Edge>,
    source: VertexId,
}

impl GraphBuilder {
    /// Start a graph with `vertex_count` vertices and source 0.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: Vec::new(),
            source: VertexId(0),
        }
    }

    /// Append an edge. Order of calls is relaxation order.
    pub fn edge(mut self, from: usize, to: usize, weight: Weight) -> Self {
        self.edges.push(Edge::new(from, to, weight));
        self
    }

    /// Set the source vertex.
    pub fn source(mut self, source: usize) -> Self {
        self.source = VertexId(source);
        self
    }

    /// Validate and finish.
    pub fn build(self) -> Result<Graph, InvalidGraph> {
        Graph::new(self.vertex_count, self.edges, self.source)
    }
}
