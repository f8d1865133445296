//! Relaxviz Visualization Server
//!
//! Load a graph and serve step-by-step Bellman-Ford playback.
//!
//! Usage: `relaxviz [graph.json] [port]`

use std::env;
use std::path::PathBuf;

use relaxviz_engine::generate;
use relaxviz_vis::{demo_graph, VisConfig, VisServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relaxviz=info,relaxviz_vis=info,relaxviz_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = VisConfig::from_env()?;

    // Positional args override the environment
    let args: Vec<String> = env::args().collect();
    if let Some(path) = args.get(1) {
        config.graph_path = Some(PathBuf::from(path));
    }
    if let Some(port) = args.get(2) {
        config.addr.set_port(port.parse()?);
    }

    let graph = match config.load_graph()? {
        Some(graph) => graph,
        None => {
            tracing::info!("No graph configured, using the demo graph");
            demo_graph()?
        }
    };

    let trace = generate(&graph)?;
    tracing::info!(
        "Graph: {} vertices, {} edges, source {} ({} steps, {:?})",
        graph.vertex_count(),
        graph.edge_count(),
        graph.source(),
        trace.len(),
        trace.outcome()
    );

    let server = VisServer::new(graph, config)?;
    server.serve().await?;

    Ok(())
}
