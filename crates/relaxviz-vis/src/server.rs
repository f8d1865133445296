//! Axum web server exposing the playback session as JSON and WebSocket.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use relaxviz_engine::{Graph, ObservableState, Step, Trace};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::autoplay::{Autoplay, SharedSession};
use crate::config::VisConfig;
use crate::error::Result;
use crate::playback::{PlaybackSpeed, PlaybackStatus};
use crate::session::{PlaybackUpdate, Session, StepOutcome};

/// Shared application state.
pub struct AppState {
    session: SharedSession,
    autoplay: Autoplay,
    config: VisConfig,
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    /// Create a server for `graph`. The vertex range is checked here too.
    pub fn new(graph: Graph, config: VisConfig) -> Result<Self> {
        config.check_vertex_count(&graph)?;
        let session = Arc::new(RwLock::new(Session::new(graph)));
        let autoplay = Autoplay::new(Arc::clone(&session), config.base_interval);
        Ok(Self {
            state: Arc::new(AppState {
                session,
                autoplay,
                config,
            }),
        })
    }

    pub fn session(&self) -> &SharedSession {
        &self.state.session
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/status", get(status_handler))
            .route("/api/graph", get(graph_handler).post(set_graph_handler))
            .route("/api/graph/source", post(source_handler))
            .route("/api/trace", get(trace_handler))
            .route("/api/state", get(state_handler))
            .route("/api/playback", get(playback_status_handler))
            .route("/api/playback/play", post(play_handler))
            .route("/api/playback/pause", post(pause_handler))
            .route("/api/playback/reset", post(reset_handler))
            .route("/api/playback/step", post(step_handler))
            .route("/api/playback/seek", post(seek_handler))
            .route("/api/playback/speed", post(speed_handler))
            // WebSocket command channel
            .route("/ws", get(ws_handler))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the configured address.
    pub async fn serve(self) -> Result<()> {
        let addr = self.state.config.addr;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Visualization server running on http://{}", addr);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

/// Server status response.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    vertex_count: usize,
    edge_count: usize,
    source: usize,
    complexity: usize,
    trace_steps: usize,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let session = state.session.read().await;
    let graph = session.graph();
    Json(StatusResponse {
        status: "ok",
        vertex_count: graph.vertex_count(),
        edge_count: graph.edge_count(),
        source: graph.source().index(),
        complexity: graph.complexity(),
        trace_steps: session.cursor().len(),
    })
}

async fn graph_handler(State(state): State<Arc<AppState>>) -> Json<Graph> {
    Json(state.session.read().await.graph().clone())
}

async fn set_graph_handler(
    State(state): State<Arc<AppState>>,
    Json(graph): Json<Graph>,
) -> Result<Json<PlaybackStatus>> {
    state.config.check_vertex_count(&graph)?;
    state.autoplay.cancel().await;
    let mut session = state.session.write().await;
    session.set_graph(graph);
    Ok(Json(session.status()))
}

#[derive(Deserialize)]
struct SourceRequest {
    source: usize,
}

async fn source_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SourceRequest>,
) -> Result<Json<PlaybackStatus>> {
    state.autoplay.cancel().await;
    let mut session = state.session.write().await;
    session.set_source(req.source)?;
    Ok(Json(session.status()))
}

async fn trace_handler(State(state): State<Arc<AppState>>) -> Result<Json<Trace>> {
    let mut session = state.session.write().await;
    Ok(Json(session.trace()?.clone()))
}

/// Everything the renderer needs for one frame.
#[derive(Serialize)]
struct StateResponse {
    state: ObservableState,
    step: Option<Step>,
    code_lines: &'static [usize],
    status: PlaybackStatus,
}

async fn current_state(state: &AppState) -> Result<StateResponse> {
    let mut session = state.session.write().await;
    let observable = session.observable_state()?;
    let step = session.current_step().cloned();
    Ok(StateResponse {
        state: observable,
        code_lines: step
            .as_ref()
            .map(|step| step.kind.code_lines())
            .unwrap_or_default(),
        step,
        status: session.status(),
    })
}

async fn state_handler(State(state): State<Arc<AppState>>) -> Result<Json<StateResponse>> {
    Ok(Json(current_state(&state).await?))
}

async fn playback_status_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    Json(state.session.read().await.status())
}

async fn play_handler(State(state): State<Arc<AppState>>) -> Result<Json<PlaybackStatus>> {
    Ok(Json(state.autoplay.play().await?))
}

async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    Json(state.autoplay.pause().await)
}

async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    state.autoplay.cancel().await;
    let mut session = state.session.write().await;
    session.reset();
    Json(session.status())
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum StepDirection {
    Forward,
    Backward,
}

#[derive(Deserialize)]
struct StepRequest {
    direction: StepDirection,
}

#[derive(Serialize)]
struct StepResponse {
    outcome: StepOutcome,
    status: PlaybackStatus,
}

async fn step(state: &AppState, direction: StepDirection) -> Result<StepResponse> {
    state.autoplay.cancel().await;
    let mut session = state.session.write().await;
    let outcome = match direction {
        StepDirection::Forward => session.step_forward()?,
        StepDirection::Backward => session.step_backward(),
    };
    Ok(StepResponse {
        outcome,
        status: session.status(),
    })
}

async fn step_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StepRequest>,
) -> Result<Json<StepResponse>> {
    Ok(Json(step(&state, req.direction).await?))
}

#[derive(Deserialize)]
struct SeekRequest {
    position: usize,
}

async fn seek(state: &AppState, position: usize) -> Result<PlaybackStatus> {
    state.autoplay.cancel().await;
    let mut session = state.session.write().await;
    session.seek(position)?;
    Ok(session.status())
}

async fn seek_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeekRequest>,
) -> Result<Json<PlaybackStatus>> {
    Ok(Json(seek(&state, req.position).await?))
}

#[derive(Deserialize)]
struct SpeedRequest {
    speed: PlaybackSpeed,
}

async fn speed_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeedRequest>,
) -> Result<Json<PlaybackStatus>> {
    Ok(Json(state.autoplay.set_speed(req.speed).await?))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    tracing::debug!("WebSocket client connected");

    // Subscribe first so no autoplay step slips in after the initial frame
    let mut updates = state.session.read().await.subscribe();

    let initial = handle_ws_command(&state, WsCommand::GetState).await;
    if !send_response(&mut socket, &initial).await {
        return;
    }

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let text = match msg {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => continue,
                };
                let response = match serde_json::from_str::<WsCommand>(&text) {
                    Ok(cmd) => handle_ws_command(&state, cmd).await,
                    Err(e) => WsResponse::Error {
                        message: e.to_string(),
                    },
                };
                if !send_response(&mut socket, &response).await {
                    break;
                }
            }
            update = updates.recv() => {
                match update {
                    Ok(update) => {
                        if !send_response(&mut socket, &update.into()).await {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("WebSocket client lagged, {} playback updates dropped", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("WebSocket client disconnected");
}

async fn send_response(socket: &mut WebSocket, response: &WsResponse) -> bool {
    let json = match serde_json::to_string(response) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("Failed to encode WebSocket response: {}", e);
            return true;
        }
    };
    socket.send(Message::Text(json.into())).await.is_ok()
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    GetState,
    GetStatus,
    Step { direction: StepDirection },
    Seek { position: usize },
    Play,
    Pause,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsResponse {
    State(StateResponse),
    Status(PlaybackStatus),
    Step(StepResponse),
    /// Pushed by autoplay, one per applied step.
    Played { step: Step, status: PlaybackStatus },
    /// Pushed when autoplay stops on its own.
    Finished { status: PlaybackStatus },
    Error { message: String },
}

impl<T: Into<WsResponse>> From<Result<T>> for WsResponse {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(response) => response.into(),
            Err(e) => WsResponse::Error {
                message: e.to_string(),
            },
        }
    }
}

impl From<StateResponse> for WsResponse {
    fn from(response: StateResponse) -> Self {
        WsResponse::State(response)
    }
}

impl From<PlaybackStatus> for WsResponse {
    fn from(status: PlaybackStatus) -> Self {
        WsResponse::Status(status)
    }
}

impl From<StepResponse> for WsResponse {
    fn from(response: StepResponse) -> Self {
        WsResponse::Step(response)
    }
}

impl From<PlaybackUpdate> for WsResponse {
    fn from(update: PlaybackUpdate) -> Self {
        match update {
            PlaybackUpdate::Step { step, status } => WsResponse::Played { step, status },
            PlaybackUpdate::Finished { status } => WsResponse::Finished { status },
        }
    }
}

async fn handle_ws_command(state: &AppState, cmd: WsCommand) -> WsResponse {
    match cmd {
        WsCommand::GetState => current_state(state).await.into(),
        WsCommand::GetStatus => state.session.read().await.status().into(),
        WsCommand::Step { direction } => step(state, direction).await.into(),
        WsCommand::Seek { position } => seek(state, position).await.into(),
        WsCommand::Play => state.autoplay.play().await.into(),
        WsCommand::Pause => state.autoplay.pause().await.into(),
    }
}
