//! The recorded sequence of steps for one run.

use crate::distance::Distance;
use crate::graph::VertexId;
use crate::step::{Step, StepKind};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Distances and predecessors are final.
    ShortestPaths,
    /// A negative cycle is reachable from the source.
    NegativeCycle,
}

/// An immutable, ordered record of one generator run.
///
/// Always starts with `Init` and ends with exactly one terminal step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    vertex_count: usize,
    source: VertexId,
    steps: Vec<Step>,
}

impl Trace {
    pub(crate) fn new(vertex_count: usize, source: VertexId, steps: Vec<Step>) -> Self {
        Self {
            vertex_count,
            source,
            steps,
        }
    }

    /// All steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Step at `index`.
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Vertex count of the graph this trace was generated for.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Source vertex of the run.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// The terminal step.
    pub fn final_step(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// How the run ended.
    pub fn outcome(&self) -> Outcome {
        match self.final_step().map(|s| s.kind) {
            Some(StepKind::NegativeCycle) => Outcome::NegativeCycle,
            _ => Outcome::ShortestPaths,
        }
    }

    /// Number of relaxation passes started.
    pub fn iterations(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.kind == StepKind::IterationStart)
            .count()
    }

    /// Total successful relaxations.
    pub fn relaxations(&self) -> usize {
        self.final_step().map_or(0, |s| s.relaxation_count)
    }

    /// Distances before any step is applied.
    pub fn initial_distances(&self) -> Vec<Distance> {
        (0..self.vertex_count)
            .map(|v| {
                if v == self.source.0 {
                    Distance::Finite(0)
                } else {
                    Distance::Unreachable
                }
            })
            .collect()
    }

    /// Predecessor table in effect at step `index`.
    ///
    /// Steps without a snapshot inherit the nearest earlier one.
    pub fn predecessors_at(&self, index: usize) -> Vec<Option<VertexId>> {
        let end = index.saturating_add(1).min(self.steps.len());
        self.steps[..end]
            .iter()
            .rev()
            .find_map(|s| s.predecessors.clone())
            .unwrap_or_else(|| vec![None; self.vertex_count])
    }

    /// Shortest path from the source to `target`, source first.
    ///
    /// `None` when `target` is unreachable or the run found a negative cycle.
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        if self.outcome() == Outcome::NegativeCycle || target.0 >= self.vertex_count {
            return None;
        }
        let last = self.final_step()?;
        if !last.distance(target).is_finite() {
            return None;
        }
        let prev = last.predecessors.as_ref()?;

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = prev.get(current.0).copied().flatten()?;
            path.push(current);
            // A well-formed table reaches the source in fewer than V hops.
            if path.len() > self.vertex_count {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
