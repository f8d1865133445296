//! One graph, its trace and a cursor, shared by the API and autoplay.

use relaxviz_engine::{
    generate, Backward, Forward, Graph, MessageTone, ObservableState, PlaybackCursor, Step, Trace,
    AT_START,
};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::error::Result;
use crate::playback::{PlaybackSpeed, PlaybackState, PlaybackStatus};

/// Status text after a graph or source change.
pub const READY_MESSAGE: &str = "Graph applied. Press Play to run Bellman-Ford algorithm.";

/// Status text after an explicit reset.
pub const RESET_MESSAGE: &str = "Reset. Press Play to run Bellman-Ford algorithm.";

/// Autoplay updates buffered per subscriber before it starts lagging.
const UPDATE_CAPACITY: usize = 1024;

/// Pushed to subscribers for every autoplay tick that changes something.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackUpdate {
    /// A step was applied; `status` is the state right after it.
    Step { step: Step, status: PlaybackStatus },
    /// The trace ran out or the run failed.
    Finished { status: PlaybackStatus },
}

/// Result of a manual step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepOutcome {
    Applied { step: Step },
    EndOfTrace,
    AtStart,
}

/// Result of an autoplay tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A step was applied; keep going.
    Applied,
    /// The trace ran out; playback is finished.
    Finished,
    /// The tick belongs to a cancelled run and was dropped.
    Stale,
}

/// Playback session for a single graph.
///
/// The trace is generated lazily and dropped whenever the graph, the source
/// or the run is reset. `epoch` moves on every cancellation so autoplay ticks
/// scheduled for an older run can recognise themselves as stale.
#[derive(Debug)]
pub struct Session {
    graph: Graph,
    cursor: PlaybackCursor,
    state: PlaybackState,
    speed: PlaybackSpeed,
    epoch: u64,
    message: String,
    tone: MessageTone,
    updates: broadcast::Sender<PlaybackUpdate>,
}

impl Session {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            cursor: PlaybackCursor::default(),
            state: PlaybackState::Stopped,
            speed: PlaybackSpeed::default(),
            epoch: 0,
            message: READY_MESSAGE.to_string(),
            tone: MessageTone::Info,
            updates: broadcast::channel(UPDATE_CAPACITY).0,
        }
    }

    /// Receive every step autoplay applies from now on, in order.
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackUpdate> {
        self.updates.subscribe()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn cursor(&self) -> &PlaybackCursor {
        &self.cursor
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The step most recently applied or re-displayed.
    pub fn current_step(&self) -> Option<&Step> {
        self.cursor.current_step()
    }

    /// Replace the graph. Any running playback is cancelled.
    pub fn set_graph(&mut self, graph: Graph) {
        tracing::info!(
            "Graph replaced: {} vertices, {} edges, source {}",
            graph.vertex_count(),
            graph.edge_count(),
            graph.source()
        );
        self.graph = graph;
        self.invalidate(READY_MESSAGE);
    }

    /// Move the source vertex. The graph is left untouched on error.
    pub fn set_source(&mut self, source: usize) -> Result<()> {
        let graph = self.graph.with_source(source)?;
        self.set_graph(graph);
        Ok(())
    }

    /// Rewind to before the first step and drop the trace.
    pub fn reset(&mut self) {
        self.invalidate(RESET_MESSAGE);
    }

    fn invalidate(&mut self, message: &str) {
        self.cursor.reset();
        self.state = PlaybackState::Stopped;
        self.epoch = self.epoch.wrapping_add(1);
        self.announce(message.to_string(), MessageTone::Info);
    }

    /// The current trace, generated from the graph if there is none.
    pub fn trace(&mut self) -> Result<&Trace> {
        let graph = &self.graph;
        let trace = self.cursor.trace_or_load(|| {
            let trace = generate(graph)?;
            tracing::info!(
                "Generated trace: {} steps, {} iterations, {:?}",
                trace.len(),
                trace.iterations(),
                trace.outcome()
            );
            Ok::<_, relaxviz_engine::Error>(trace)
        })?;
        Ok(trace)
    }

    /// Apply the next step by hand. Pauses autoplay first.
    pub fn step_forward(&mut self) -> Result<StepOutcome> {
        self.pause();
        let outcome = self.advance()?;
        if matches!(outcome, StepOutcome::Applied { .. }) {
            self.state = PlaybackState::Paused;
        }
        Ok(outcome)
    }

    /// Undo one step. Pauses autoplay first.
    pub fn step_backward(&mut self) -> StepOutcome {
        self.pause();
        let step = match self.cursor.step_backward() {
            Backward::Step(step) => step.clone(),
            Backward::AtStart => {
                self.announce(AT_START.to_string(), MessageTone::Info);
                return StepOutcome::AtStart;
            }
        };
        self.state = PlaybackState::Paused;
        self.announce_step(&step);
        StepOutcome::Applied { step }
    }

    fn advance(&mut self) -> Result<StepOutcome> {
        self.trace()?;
        let step = match self.cursor.step_forward() {
            Forward::Step(step) => step.clone(),
            Forward::EndOfTrace => {
                self.state = PlaybackState::Finished;
                return Ok(StepOutcome::EndOfTrace);
            }
        };
        tracing::debug!(
            "Step {}/{}: {:?}",
            self.cursor.position(),
            self.cursor.len(),
            step.kind
        );
        self.announce_step(&step);
        Ok(StepOutcome::Applied { step })
    }

    /// One autoplay tick for the run started at `epoch`.
    pub fn tick(&mut self, epoch: u64) -> Tick {
        if epoch != self.epoch || self.state != PlaybackState::Playing {
            return Tick::Stale;
        }
        match self.advance() {
            Ok(StepOutcome::Applied { step }) => {
                let status = self.status();
                self.publish(PlaybackUpdate::Step { step, status });
                return Tick::Applied;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Autoplay stopped: {}", e);
                self.state = PlaybackState::Stopped;
                self.announce(e.to_string(), MessageTone::Warning);
            }
        }
        let status = self.status();
        self.publish(PlaybackUpdate::Finished { status });
        Tick::Finished
    }

    fn publish(&self, update: PlaybackUpdate) {
        // Nobody listening is fine.
        let _ = self.updates.send(update);
    }

    /// Enter `Playing` and return the epoch autoplay ticks must carry.
    ///
    /// A finished or reset run is regenerated from the start; a paused one
    /// resumes where it stopped.
    pub fn begin_play(&mut self) -> Result<u64> {
        if self.cursor.is_complete() {
            self.cursor.reset();
        }
        self.trace()?;
        self.epoch = self.epoch.wrapping_add(1);
        self.state = PlaybackState::Playing;
        Ok(self.epoch)
    }

    /// Stop autoplay, keeping the position.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
            self.epoch = self.epoch.wrapping_add(1);
        }
    }

    /// Jump to `position` applied steps (clamped). Pauses autoplay first.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        self.pause();
        self.trace()?;
        self.cursor.seek(position);
        self.state = if self.cursor.position() == 0 {
            PlaybackState::Stopped
        } else {
            PlaybackState::Paused
        };
        match self.cursor.current_step().cloned() {
            Some(step) => self.announce_step(&step),
            None => self.announce(READY_MESSAGE.to_string(), MessageTone::Info),
        }
        Ok(())
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
    }

    /// What the renderer should draw now.
    pub fn observable_state(&mut self) -> Result<ObservableState> {
        match self.cursor.current_observable_state() {
            Some(state) => Ok(state),
            None => Ok(ObservableState::initial(self.trace()?)),
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            position: self.cursor.position(),
            total_steps: self.cursor.len(),
            state: self.state,
            speed: self.speed,
            progress: self.cursor.progress(),
            is_complete: self.cursor.is_complete(),
            message: self.message.clone(),
            tone: self.tone,
        }
    }

    fn announce_step(&mut self, step: &Step) {
        self.announce(step.message.clone(), step.kind.tone());
    }

    fn announce(&mut self, message: String, tone: MessageTone) {
        self.message = message;
        self.tone = tone;
    }
}
