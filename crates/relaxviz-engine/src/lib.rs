//! Relaxviz Engine
//!
//! Step-by-step Bellman-Ford for teaching: the generator records every
//! observable moment of a run, the cursor replays them in both directions.
//!
//! # Pipeline
//!
//! ```text
//! Graph ──generate──▶ Trace ──PlaybackCursor──▶ Step / ObservableState ──▶ renderer
//! ```
//!
//! - **Graph**: validated vertex count, ordered edge list, source vertex
//! - **Trace**: `Init`, up to `V - 1` iterations of edge checks, then exactly
//!   one of `NegativeCycle` or `Complete`
//! - **PlaybackCursor**: position in a trace with forward/backward stepping
//!
//! # Usage
//!
//! ```
//! use relaxviz_engine::{generate, Distance, Graph, PlaybackCursor, Forward};
//!
//! let graph = Graph::from_triples(3, &[(0, 1, 4), (0, 2, 5), (1, 2, -2)], 0).unwrap();
//! let trace = generate(&graph).unwrap();
//!
//! let mut cursor = PlaybackCursor::new(trace);
//! while let Forward::Step(step) = cursor.step_forward() {
//!     println!("{}", step.message);
//! }
//!
//! let state = cursor.current_observable_state().unwrap();
//! assert_eq!(state.distances, vec![Distance::Finite(0), Distance::Finite(4), Distance::Finite(2)]);
//! ```

mod cursor;
mod distance;
mod error;
mod generator;
mod graph;
mod message;
mod step;
mod trace;

pub use cursor::{Backward, Forward, ObservableState, PlaybackCursor, VertexStatus};
pub use distance::{predecessor_label, Distance, NO_PREDECESSOR_MARKER, UNREACHABLE_MARKER};
pub use error::{Error, InvalidGraph, Result};
pub use generator::{generate, try_generate};
pub use graph::{Edge, Graph, GraphBuilder, VertexId, Weight};
pub use message::AT_START;
pub use step::{MessageTone, Step, StepKind, PSEUDOCODE};
pub use trace::{Outcome, Trace};

/// Vertex range the teaching UI accepts. The engine itself takes any `V >= 1`.
pub const UI_MIN_VERTICES: usize = 3;

/// Upper end of the UI vertex range.
pub const UI_MAX_VERTICES: usize = 7;

const _: () = assert!(UI_MIN_VERTICES <= UI_MAX_VERTICES);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_range_is_accepted_by_engine() {
        for v in UI_MIN_VERTICES..=UI_MAX_VERTICES {
            let g = Graph::new(v, vec![], 0).unwrap();
            assert!(generate(&g).is_ok());
        }
    }
}
