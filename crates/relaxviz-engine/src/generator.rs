//! Bellman-Ford with step recording.
//!
//! The recorder mirrors the textbook loop:
//!
//! 1. `dist[source] = 0`, everything else unreachable
//! 2. up to `V - 1` passes over the edges in input order, stopping early after
//!    a pass that relaxes nothing
//! 3. one check-only pass; any edge that still relaxes means a negative cycle
//!
//! Every observable moment becomes a [`Step`] carrying its own copy of the
//! distance (and usually predecessor) vectors.

use crate::distance::Distance;
use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, VertexId};
use crate::message;
use crate::step::{Step, StepKind};
use crate::trace::Trace;

/// Run Bellman-Ford over `graph` and record every step.
///
/// Deterministic: the same graph always yields an identical trace.
pub fn generate(graph: &Graph) -> Result<Trace> {
    let mut recorder = Recorder::new(graph);
    recorder.run()?;
    let trace = recorder.finish();

    tracing::debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        steps = trace.len(),
        iterations = trace.iterations(),
        relaxations = trace.relaxations(),
        outcome = ?trace.outcome(),
        "generated trace"
    );

    Ok(trace)
}

/// Validate raw parts and generate, failing before any step on a bad graph.
pub fn try_generate(
    vertex_count: usize,
    edges: Vec<Edge>,
    source: impl Into<VertexId>,
) -> Result<Trace> {
    let graph = Graph::new(vertex_count, edges, source)?;
    generate(&graph)
}

/// Working state of one run.
struct Recorder<'g> {
    graph: &'g Graph,
    dist: Vec<Distance>,
    prev: Vec<Option<VertexId>>,
    relaxations: usize,
    steps: Vec<Step>,
}

impl<'g> Recorder<'g> {
    fn new(graph: &'g Graph) -> Self {
        let mut dist = vec![Distance::Unreachable; graph.vertex_count()];
        dist[graph.source().0] = Distance::Finite(0);

        Self {
            graph,
            dist,
            prev: vec![None; graph.vertex_count()],
            relaxations: 0,
            steps: Vec::new(),
        }
    }

    fn run(&mut self) -> Result<()> {
        let graph = self.graph;
        let source = graph.source();
        let edges = graph.edges();
        let max_iterations = graph.vertex_count() - 1;

        let mut init = self.snapshot(StepKind::Init, message::init(source));
        init.active_vertices = vec![source];
        self.steps.push(init);

        for iteration in 1..=max_iterations {
            let mut start = self.snapshot(
                StepKind::IterationStart,
                message::iteration_start(iteration, max_iterations),
            );
            start.iteration = Some(iteration);
            self.steps.push(start);

            // Nothing can ever relax without edges.
            if edges.is_empty() {
                break;
            }

            let mut relaxed = false;
            for (index, edge) in edges.iter().enumerate() {
                let mut check = self.snapshot(StepKind::CheckEdge, message::check_edge(edge));
                self.focus(&mut check, iteration, index, edge);
                self.steps.push(check);

                match self.improvement(index, edge)? {
                    Some(shorter) => {
                        self.dist[edge.to.0] = shorter;
                        self.relaxations += 1;
                        relaxed = true;

                        let mut relax = self.snapshot(StepKind::Relax, message::relax(edge, shorter));
                        self.focus(&mut relax, iteration, index, edge);
                        relax.updated_vertex = Some(edge.to);
                        self.steps.push(relax);

                        self.prev[edge.to.0] = Some(edge.from);
                        let mut set_prev =
                            self.snapshot(StepKind::SetPredecessor, message::set_predecessor(edge));
                        self.focus(&mut set_prev, iteration, index, edge);
                        set_prev.updated_vertex = Some(edge.to);
                        self.steps.push(set_prev);
                    }
                    None => {
                        let mut no_relax = self.snapshot(StepKind::NoRelax, message::no_relax(edge));
                        self.focus(&mut no_relax, iteration, index, edge);
                        no_relax.predecessors = None;
                        self.steps.push(no_relax);
                    }
                }
            }

            if !relaxed {
                let mut stop = self.snapshot(StepKind::EarlyStop, message::early_stop(iteration));
                stop.iteration = Some(iteration);
                stop.predecessors = None;
                self.steps.push(stop);
                break;
            }
        }

        let mut negative_cycle = false;
        for (index, edge) in edges.iter().enumerate() {
            if self.improvement(index, edge)?.is_some() {
                negative_cycle = true;
                break;
            }
        }

        let terminal = if negative_cycle {
            let mut step = self.snapshot(StepKind::NegativeCycle, message::NEGATIVE_CYCLE.to_string());
            step.predecessors = None;
            step
        } else {
            self.snapshot(StepKind::Complete, message::COMPLETE.to_string())
        };
        self.steps.push(terminal);

        Ok(())
    }

    fn finish(self) -> Trace {
        Trace::new(self.graph.vertex_count(), self.graph.source(), self.steps)
    }

    /// The shorter distance `edge` offers its target, if any.
    ///
    /// Never adds a weight to an unreachable estimate.
    fn improvement(&self, index: usize, edge: &Edge) -> Result<Option<Distance>> {
        let Distance::Finite(from) = self.dist[edge.from.0] else {
            return Ok(None);
        };
        let through = from
            .checked_add(edge.weight)
            .ok_or(Error::DistanceOverflow { edge: index })?;
        let candidate = Distance::Finite(through);
        Ok((candidate < self.dist[edge.to.0]).then_some(candidate))
    }

    /// A step holding copies of the current vectors and nothing highlighted.
    fn snapshot(&self, kind: StepKind, message: String) -> Step {
        Step {
            kind,
            distances: self.dist.clone(),
            predecessors: Some(self.prev.clone()),
            active_edge: None,
            active_vertices: Vec::new(),
            updated_vertex: None,
            iteration: None,
            relaxation_count: self.relaxations,
            message,
        }
    }

    fn focus(&self, step: &mut Step, iteration: usize, index: usize, edge: &Edge) {
        step.iteration = Some(iteration);
        step.active_edge = Some(index);
        step.active_vertices = vec![edge.from, edge.to];
    }
}
