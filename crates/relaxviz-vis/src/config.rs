//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use relaxviz_engine::{Graph, UI_MAX_VERTICES, UI_MIN_VERTICES};

use crate::error::{Error, Result};

/// Default autoplay interval at normal speed.
pub const DEFAULT_BASE_INTERVAL: Duration = Duration::from_millis(700);

/// Configuration for the visualization server.
#[derive(Debug, Clone)]
pub struct VisConfig {
    /// HTTP listen address
    pub addr: SocketAddr,

    /// Autoplay interval at normal speed
    pub base_interval: Duration,

    /// Smallest graph accepted from the frontend
    pub min_vertices: usize,

    /// Largest graph accepted from the frontend
    pub max_vertices: usize,

    /// Graph to load at startup (JSON)
    pub graph_path: Option<PathBuf>,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            base_interval: DEFAULT_BASE_INTERVAL,
            min_vertices: UI_MIN_VERTICES,
            max_vertices: UI_MAX_VERTICES,
            graph_path: None,
        }
    }
}

impl VisConfig {
    /// Create config from environment variables with defaults for anything unset.
    ///
    /// - `RELAXVIZ_ADDR`
    /// - `RELAXVIZ_BASE_INTERVAL_MS`
    /// - `RELAXVIZ_MIN_VERTICES` / `RELAXVIZ_MAX_VERTICES`
    /// - `RELAXVIZ_GRAPH`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`VisConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let addr = parse_var(&lookup, "RELAXVIZ_ADDR")?.unwrap_or(defaults.addr);
        let base_interval = parse_var::<u64>(&lookup, "RELAXVIZ_BASE_INTERVAL_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.base_interval);
        let min_vertices =
            parse_var(&lookup, "RELAXVIZ_MIN_VERTICES")?.unwrap_or(defaults.min_vertices);
        let max_vertices =
            parse_var(&lookup, "RELAXVIZ_MAX_VERTICES")?.unwrap_or(defaults.max_vertices);
        let graph_path = lookup("RELAXVIZ_GRAPH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        if base_interval.is_zero() {
            return Err(Error::Config("RELAXVIZ_BASE_INTERVAL_MS must be positive".into()));
        }
        if min_vertices == 0 || min_vertices > max_vertices {
            return Err(Error::Config(format!(
                "vertex range {}..={} is empty",
                min_vertices, max_vertices
            )));
        }

        Ok(Self {
            addr,
            base_interval,
            min_vertices,
            max_vertices,
            graph_path,
        })
    }

    /// Reject graphs outside the configured vertex range.
    pub fn check_vertex_count(&self, graph: &Graph) -> Result<()> {
        let count = graph.vertex_count();
        if (self.min_vertices..=self.max_vertices).contains(&count) {
            Ok(())
        } else {
            Err(Error::VertexCount {
                count,
                min: self.min_vertices,
                max: self.max_vertices,
            })
        }
    }

    /// Load the startup graph, if one is configured.
    pub fn load_graph(&self) -> Result<Option<Graph>> {
        let Some(path) = &self.graph_path else {
            return Ok(None);
        };
        let text = std::fs::read_to_string(path)?;
        let graph: Graph = serde_json::from_str(&text)?;
        self.check_vertex_count(&graph)?;
        tracing::info!(
            "Loaded graph from {}: {} vertices, {} edges",
            path.display(),
            graph.vertex_count(),
            graph.edge_count()
        );
        Ok(Some(graph))
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("{key}={raw:?}: {e}"))),
    }
}
