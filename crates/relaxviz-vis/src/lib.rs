//! Relaxviz Visualization Server
//!
//! Playback sessions over Bellman-Ford traces, driven by a rendering
//! frontend through JSON and WebSocket.
//!
//! # Architecture
//!
//! - **Session**: one graph, its lazily generated trace and a cursor
//! - **Autoplay**: a tokio task stepping the session on a timer
//! - **REST API**: replace the graph, move the source, control playback
//! - **WebSocket**: the same controls as JSON commands
//!
//! # Usage
//!
//! ```ignore
//! let graph = Graph::from_triples(3, &[(0, 1, 4), (0, 2, 5), (1, 2, -2)], 0)?;
//! let server = VisServer::new(graph, VisConfig::from_env()?)?;
//! server.serve().await?;
//! ```

mod autoplay;
mod config;
mod error;
mod playback;
mod server;
mod session;

pub use autoplay::{Autoplay, SharedSession};
pub use config::{VisConfig, DEFAULT_BASE_INTERVAL};
pub use error::{Error, Result};
pub use playback::{PlaybackSpeed, PlaybackState, PlaybackStatus};
pub use server::VisServer;
pub use session::{PlaybackUpdate, Session, StepOutcome, Tick, READY_MESSAGE, RESET_MESSAGE};

use relaxviz_engine::{Graph, InvalidGraph};

/// Graph shown when nothing else is configured.
pub fn demo_graph() -> std::result::Result<Graph, InvalidGraph> {
    Graph::from_triples(
        5,
        &[
            (0, 1, 6),
            (0, 2, 7),
            (1, 2, 8),
            (1, 3, 5),
            (1, 4, -4),
            (2, 3, -3),
            (2, 4, 9),
            (3, 1, -2),
            (4, 3, 7),
        ],
        0,
    )
}
