//! Forward/backward navigation over a recorded trace.

use crate::distance::Distance;
use crate::graph::VertexId;
use crate::step::Step;
use crate::trace::Trace;

/// Result of [`PlaybackCursor::step_forward`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forward<'a> {
    /// The step just applied.
    Step(&'a Step),
    /// Nothing left to apply.
    EndOfTrace,
}

/// Result of [`PlaybackCursor::step_backward`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backward<'a> {
    /// The step now displayed.
    Step(&'a Step),
    /// Already at the start; nothing changed.
    AtStart,
}

/// Highlight class of a vertex in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VertexStatus {
    Default,
    Source,
    Active,
    Updated,
}

/// What the renderer should show after the most recent cursor move.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservableState {
    pub distances: Vec<Distance>,
    pub predecessors: Vec<Option<VertexId>>,
    pub vertices: Vec<VertexStatus>,
    pub active_edge: Option<usize>,
    pub updated_vertex: Option<VertexId>,
    pub relaxation_count: usize,
}

impl ObservableState {
    /// State before the first step is applied.
    pub fn initial(trace: &Trace) -> Self {
        Self {
            distances: trace.initial_distances(),
            predecessors: vec![None; trace.vertex_count()],
            vertices: classify(trace.vertex_count(), trace.source(), &[], None),
            active_edge: None,
            updated_vertex: None,
            relaxation_count: 0,
        }
    }

    /// State after applying step `index` of `trace`.
    pub fn at(trace: &Trace, index: usize) -> Option<Self> {
        let step = trace.get(index)?;
        Some(Self {
            distances: step.distances.clone(),
            predecessors: trace.predecessors_at(index),
            vertices: classify(
                trace.vertex_count(),
                trace.source(),
                &step.active_vertices,
                step.updated_vertex,
            ),
            active_edge: step.active_edge,
            updated_vertex: step.updated_vertex,
            relaxation_count: step.relaxation_count,
        })
    }
}

/// Default everywhere, source tagged, active endpoints (except the source)
/// marked, then the updated vertex overrides.
fn classify(
    vertex_count: usize,
    source: VertexId,
    active: &[VertexId],
    updated: Option<VertexId>,
) -> Vec<VertexStatus> {
    let mut statuses: Vec<_> = (0..vertex_count)
        .map(|v| {
            if v == source.0 {
                VertexStatus::Source
            } else {
                VertexStatus::Default
            }
        })
        .collect();

    for v in active.iter().filter(|v| **v != source) {
        if let Some(status) = statuses.get_mut(v.0) {
            *status = VertexStatus::Active;
        }
    }
    if let Some(status) = updated.and_then(|v| statuses.get_mut(v.0)) {
        *status = VertexStatus::Updated;
    }

    statuses
}

/// A position in a trace.
///
/// `position` counts applied steps: 0 means nothing applied yet.
#[derive(Debug, Clone, Default)]
pub struct PlaybackCursor {
    trace: Option<Trace>,
    position: usize,
    current: Option<usize>,
    is_complete: bool,
}

impl PlaybackCursor {
    /// Cursor over `trace`, before the first step.
    pub fn new(trace: Trace) -> Self {
        Self {
            trace: Some(trace),
            ..Self::default()
        }
    }

    /// Replace the trace and rewind.
    pub fn load(&mut self, trace: Trace) {
        *self = Self::new(trace);
    }

    /// Rewind and drop the trace; it must be regenerated before stepping again.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    /// The loaded trace, or a fresh one from `load` installed at position 0.
    pub fn trace_or_load<E>(
        &mut self,
        load: impl FnOnce() -> Result<Trace, E>,
    ) -> Result<&Trace, E> {
        let trace = match self.trace.take() {
            Some(trace) => trace,
            None => {
                let trace = load()?;
                *self = Self::default();
                trace
            }
        };
        Ok(&*self.trace.insert(trace))
    }

    pub fn has_trace(&self) -> bool {
        self.trace.is_some()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of steps in the trace (0 without one).
    pub fn len(&self) -> usize {
        self.trace.as_ref().map_or(0, Trace::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set once a forward step ran past the end.
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Apply the next step.
    pub fn step_forward(&mut self) -> Forward<'_> {
        let Some(trace) = self.trace.as_ref() else {
            self.is_complete = true;
            return Forward::EndOfTrace;
        };
        match trace.get(self.position) {
            Some(step) => {
                self.current = Some(self.position);
                self.position += 1;
                Forward::Step(step)
            }
            None => {
                self.is_complete = true;
                Forward::EndOfTrace
            }
        }
    }

    /// Undo one step and re-display `trace[position]`.
    pub fn step_backward(&mut self) -> Backward<'_> {
        let Some(trace) = self.trace.as_ref() else {
            return Backward::AtStart;
        };
        if self.position == 0 {
            return Backward::AtStart;
        }
        self.position -= 1;
        self.current = Some(self.position);
        match trace.get(self.position) {
            Some(step) => Backward::Step(step),
            None => Backward::AtStart,
        }
    }

    /// Jump so that `position` steps are applied, clamped to the trace.
    ///
    /// Landing before the end clears `is_complete`.
    pub fn seek(&mut self, position: usize) {
        self.position = position.min(self.len());
        self.current = self.position.checked_sub(1);
        if self.position < self.len() {
            self.is_complete = false;
        }
    }

    /// The step most recently returned, if any.
    pub fn current_step(&self) -> Option<&Step> {
        self.trace.as_ref()?.get(self.current?)
    }

    /// State derived from the most recently returned step.
    pub fn current_observable_state(&self) -> Option<ObservableState> {
        let trace = self.trace.as_ref()?;
        match self.current {
            Some(index) => ObservableState::at(trace, index),
            None => Some(ObservableState::initial(trace)),
        }
    }

    /// Fraction of the trace applied, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        match self.len() {
            0 => 0.0,
            len => self.position as f64 / len as f64,
        }
    }
}
