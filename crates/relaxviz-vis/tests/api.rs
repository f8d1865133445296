//! HTTP API tests for the visualization server.
//!
//! Requests go straight to the router through `tower::ServiceExt::oneshot`;
//! no socket is bound.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use relaxviz_engine::Graph;
use relaxviz_vis::{VisConfig, VisServer};

const BASE: Duration = Duration::from_millis(100);

fn test_app() -> Router {
    test_app_with(VisConfig::default())
}

/// App with a short autoplay interval, for paused-clock tests.
fn timed_app() -> Router {
    test_app_with(VisConfig {
        base_interval: BASE,
        ..VisConfig::default()
    })
}

fn test_app_with(config: VisConfig) -> Router {
    let graph = Graph::from_triples(3, &[(0, 1, 4), (0, 2, 5), (1, 2, -2)], 0).unwrap();
    VisServer::new(graph, config).unwrap().router()
}

async fn request_json(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&v).unwrap())),
        None => builder.body(Body::empty()),
    };

    let response = app.clone().oneshot(request.unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(json!(null));
    (status, json)
}

async fn get_json(app: &Router, path: &str) -> (StatusCode, Value) {
    request_json(app, Method::GET, path, None).await
}

async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    request_json(app, Method::POST, path, Some(body)).await
}

async fn step(app: &Router, direction: &str) -> Value {
    let (status, json) = post_json(
        app,
        "/api/playback/step",
        json!({ "direction": direction }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json
}

#[tokio::test]
async fn status_reports_graph_shape() {
    let app = test_app();
    let (status, json) = get_json(&app, "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["vertex_count"], 3);
    assert_eq!(json["edge_count"], 3);
    assert_eq!(json["complexity"], 9);
    assert_eq!(json["trace_steps"], 0);
}

#[tokio::test]
async fn state_before_play_is_initial() {
    let app = test_app();
    let (status, json) = get_json(&app, "/api/state").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["state"]["distances"], json!([0, null, null]));
    assert_eq!(json["state"]["vertices"], json!(["source", "default", "default"]));
    assert_eq!(json["step"], Value::Null);
    assert_eq!(json["code_lines"], json!([]));
}

#[tokio::test]
async fn stepping_walks_the_trace() {
    let app = test_app();

    let json = step(&app, "forward").await;
    assert_eq!(json["outcome"]["step"]["kind"], "init");
    assert_eq!(
        json["status"]["message"],
        "Initialize: Source node 0 = 0, all others = ∞"
    );

    step(&app, "forward").await;
    let json = step(&app, "forward").await;
    assert_eq!(json["outcome"]["step"]["kind"], "check");
    assert_eq!(json["outcome"]["step"]["active_edge"], 0);

    let (_, state) = get_json(&app, "/api/state").await;
    assert_eq!(state["code_lines"], json!([5]));
    assert_eq!(state["state"]["vertices"], json!(["source", "active", "default"]));

    let json = step(&app, "backward").await;
    assert_eq!(json["outcome"]["step"]["kind"], "check");
    assert_eq!(json["status"]["position"], 2);
}

#[tokio::test]
async fn backward_at_start_is_reported() {
    let app = test_app();
    let json = step(&app, "backward").await;
    assert_eq!(json["outcome"]["type"], "at_start");
    assert_eq!(
        json["status"]["message"],
        "Already at the beginning of the algorithm."
    );
}

#[tokio::test]
async fn trace_endpoint_returns_full_run() {
    let app = test_app();
    let (status, json) = get_json(&app, "/api/trace").await;
    assert_eq!(status, StatusCode::OK);

    let steps = json["steps"].as_array().unwrap();
    assert_eq!(steps.first().unwrap()["kind"], "init");
    assert_eq!(steps.last().unwrap()["kind"], "complete");
    assert_eq!(steps.last().unwrap()["distances"], json!([0, 4, 2]));
}

#[tokio::test]
async fn replacing_graph_invalidates_trace() {
    let app = test_app();
    step(&app, "forward").await;

    let graph = json!({
        "vertex_count": 4,
        "edges": [
            { "from": 0, "to": 1, "weight": 1 },
            { "from": 1, "to": 2, "weight": -1 },
            { "from": 2, "to": 1, "weight": -1 }
        ],
        "source": 0
    });
    let (status, json) = post_json(&app, "/api/graph", graph).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["position"], 0);
    assert_eq!(json["total_steps"], 0);
    assert_eq!(json["state"], "Stopped");

    let (_, trace) = get_json(&app, "/api/trace").await;
    let last = trace["steps"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["kind"], "negative-cycle");
    assert_eq!(last["predecessors"], Value::Null);
}

#[tokio::test]
async fn rejects_graphs_outside_range_or_invalid() {
    let app = test_app();

    let too_big = json!({ "vertex_count": 8, "edges": [], "source": 0 });
    let (status, json) = post_json(&app, "/api/graph", too_big).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "Number of vertices must be between 3 and 7 (got 8)"
    );

    let dangling = json!({
        "vertex_count": 3,
        "edges": [{ "from": 0, "to": 5, "weight": 1 }],
        "source": 0
    });
    let (status, _) = post_json(&app, "/api/graph", dangling).await;
    assert!(status.is_client_error());

    let (_, graph) = get_json(&app, "/api/graph").await;
    assert_eq!(graph["vertex_count"], 3);
}

#[tokio::test]
async fn source_change() {
    let app = test_app();

    let (status, _) = post_json(&app, "/api/graph/source", json!({ "source": 2 })).await;
    assert_eq!(status, StatusCode::OK);
    let (_, state) = get_json(&app, "/api/state").await;
    assert_eq!(state["state"]["distances"], json!([null, null, 0]));

    let (status, json) = post_json(&app, "/api/graph/source", json!({ "source": 3 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("source vertex 3"));
}

#[tokio::test]
async fn seek_and_reset() {
    let app = test_app();

    let (status, json) = post_json(&app, "/api/playback/seek", json!({ "position": 4 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["position"], 4);
    assert_eq!(json["state"], "Paused");
    assert_eq!(json["tone"], "success");

    let (status, json) = post_json(&app, "/api/playback/reset", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["position"], 0);
    assert_eq!(
        json["message"],
        "Reset. Press Play to run Bellman-Ford algorithm."
    );
}

#[tokio::test]
async fn play_pause_and_speed() {
    let app = test_app();

    let (status, json) =
        post_json(&app, "/api/playback/speed", json!({ "speed": "Quadruple" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["speed"], "Quadruple");

    let (status, json) = post_json(&app, "/api/playback/play", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["state"], "Playing");

    let (status, json) = post_json(&app, "/api/playback/pause", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["state"], "Paused");

    let (_, json) = get_json(&app, "/api/playback").await;
    assert_eq!(json["state"], "Paused");
}

#[tokio::test(start_paused = true)]
async fn graph_upload_stops_running_autoplay() {
    let app = timed_app();
    post_json(&app, "/api/playback/play", json!({})).await;
    tokio::time::sleep(BASE * 2 + BASE / 2).await;
    let (_, json) = get_json(&app, "/api/playback").await;
    assert_eq!(json["position"], 2);

    let graph = json!({
        "vertex_count": 3,
        "edges": [{ "from": 0, "to": 1, "weight": 1 }],
        "source": 0
    });
    let (status, _) = post_json(&app, "/api/graph", graph).await;
    assert_eq!(status, StatusCode::OK);
    tokio::time::sleep(BASE * 5).await;

    let (_, json) = get_json(&app, "/api/playback").await;
    assert_eq!(json["position"], 0);
    assert_eq!(json["total_steps"], 0);
    assert_eq!(json["state"], "Stopped");
}

#[tokio::test(start_paused = true)]
async fn source_change_stops_running_autoplay() {
    let app = timed_app();
    post_json(&app, "/api/playback/play", json!({})).await;
    tokio::time::sleep(BASE * 2 + BASE / 2).await;

    let (status, _) = post_json(&app, "/api/graph/source", json!({ "source": 1 })).await;
    assert_eq!(status, StatusCode::OK);
    tokio::time::sleep(BASE * 5).await;

    let (_, json) = get_json(&app, "/api/playback").await;
    assert_eq!(json["position"], 0);
    assert_eq!(json["state"], "Stopped");
    let (_, state) = get_json(&app, "/api/state").await;
    assert_eq!(state["state"]["distances"], json!([null, 0, null]));
}

#[tokio::test(start_paused = true)]
async fn repeated_play_requests_share_one_timer() {
    let app = timed_app();
    for _ in 0..3 {
        let (status, json) = post_json(&app, "/api/playback/play", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], "Playing");
    }

    tokio::time::sleep(BASE * 3 + BASE / 2).await;
    let (_, json) = get_json(&app, "/api/playback").await;
    assert_eq!(json["position"], 3);
}
