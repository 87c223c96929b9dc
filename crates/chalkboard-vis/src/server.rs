//! Axum web server exposing every board over JSON.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chalkboard_sorting::{Algorithm, ResetOutcome, StepOutcome};
use chalkboard_structures::Side;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::VisConfig;
use crate::error::Result;
use crate::state::AppState;
use crate::workbench::{
    BackView, BoardView, DetachView, HeightView, MaxView, Scalar, SearchView, Workbench,
};

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    pub fn new(config: VisConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(config)),
        }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/api/status", get(status_handler))
            // Sorting
            .route("/api/sessions/{session}/sorting/{algorithm}/reset", post(sort_reset))
            .route("/api/sessions/{session}/sorting/{algorithm}/step", post(sort_step))
            .route("/api/sessions/{session}/sorting/{algorithm}/back", post(sort_back))
            // Stack and queue
            .route("/api/sessions/{session}/stack/push", post(stack_push))
            .route("/api/sessions/{session}/stack/pop", post(stack_pop))
            .route("/api/sessions/{session}/queue/enqueue", post(queue_enqueue))
            .route("/api/sessions/{session}/queue/dequeue", post(queue_dequeue))
            // General tree
            .route("/api/sessions/{session}/tree/insert", post(tree_insert))
            .route("/api/sessions/{session}/tree/delete", post(tree_delete))
            .route("/api/sessions/{session}/tree/set-weight", post(tree_set_weight))
            .route("/api/sessions/{session}/tree/reset", post(tree_reset))
            // Binary tree
            .route("/api/sessions/{session}/bt/add-root", post(bt_add_root))
            .route("/api/sessions/{session}/bt/add-left", post(bt_add_left))
            .route("/api/sessions/{session}/bt/add-right", post(bt_add_right))
            .route("/api/sessions/{session}/bt/delete", post(bt_delete))
            .route("/api/sessions/{session}/bt/set-weight", post(bt_set_weight))
            .route("/api/sessions/{session}/bt/reset", post(bt_reset))
            // Binary search tree
            .route("/api/sessions/{session}/bst/insert", post(bst_insert))
            .route("/api/sessions/{session}/bst/search", post(bst_search))
            .route("/api/sessions/{session}/bst/delete", post(bst_delete))
            .route("/api/sessions/{session}/bst/detach", post(bst_detach))
            .route("/api/sessions/{session}/bst/max", get(bst_max))
            .route("/api/sessions/{session}/bst/height", get(bst_height))
            .route("/api/sessions/{session}/reattach/{token}", post(reattach))
            // Graph editor
            .route("/api/sessions/{session}/graph/svg", get(graph_svg))
            .route("/api/sessions/{session}/graph/add-vertex", post(graph_add_vertex))
            .route("/api/sessions/{session}/graph/delete-vertex", post(graph_delete_vertex))
            .route("/api/sessions/{session}/graph/add-edge", post(graph_add_edge))
            .route("/api/sessions/{session}/graph/set-weight", post(graph_set_weight))
            .route("/api/sessions/{session}/graph/reset", post(graph_reset))
            // Transit map
            .route("/api/atlas/svg", get(atlas_svg))
            .route("/api/atlas/route", post(atlas_route))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind the configured address and serve until the process stops.
    pub async fn serve(self) -> Result<()> {
        let addr = self.state.config.addr;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(%addr, stations = self.state.network.graph().station_count(), "chalkboard server listening");
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

/// Run `f` against the session's workbench under the write lock.
async fn with_bench<T>(
    state: &AppState,
    session: &str,
    f: impl FnOnce(&mut Workbench, &mut StdRng) -> Result<T>,
) -> Result<Json<T>> {
    let mut sessions = state.sessions.write().await;
    let (bench, rng) = sessions.open(session)?;
    f(bench, rng).map(Json)
}

async fn health() -> &'static str {
    "OK"
}

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    sessions: usize,
    stations: usize,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let sessions = state.sessions.read().await;
    Json(StatusResponse {
        status: "ok",
        sessions: sessions.len(),
        stations: state.network.graph().station_count(),
    })
}

// Sorting

async fn sort_reset(
    State(state): State<Arc<AppState>>,
    Path((session, algorithm)): Path<(String, String)>,
) -> Result<Json<ResetOutcome>> {
    let algorithm: Algorithm = algorithm.parse()?;
    with_bench(&state, &session, |bench, rng| Ok(bench.sort_reset(algorithm, rng))).await
}

async fn sort_step(
    State(state): State<Arc<AppState>>,
    Path((session, algorithm)): Path<(String, String)>,
) -> Result<Json<StepOutcome>> {
    let algorithm: Algorithm = algorithm.parse()?;
    with_bench(&state, &session, |bench, rng| Ok(bench.sort_step(algorithm, rng))).await
}

async fn sort_back(
    State(state): State<Arc<AppState>>,
    Path((session, algorithm)): Path<(String, String)>,
) -> Result<Json<BackView>> {
    let algorithm: Algorithm = algorithm.parse()?;
    with_bench(&state, &session, |bench, _| Ok(bench.sort_back(algorithm))).await
}

// Stack and queue

#[derive(Deserialize)]
struct ValueRequest {
    value: Scalar,
}

async fn stack_push(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<ValueRequest>,
) -> Result<Json<BoardView>> {
    with_bench(&state, &session, |bench, _| bench.push(&req.value.to_string())).await
}

async fn stack_pop(State(state): State<Arc<AppState>>, Path(session): Path<String>) -> Result<Json<BoardView>> {
    with_bench(&state, &session, |bench, _| Ok(bench.pop())).await
}

async fn queue_enqueue(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<ValueRequest>,
) -> Result<Json<BoardView>> {
    with_bench(&state, &session, |bench, _| bench.enqueue(&req.value.to_string())).await
}

async fn queue_dequeue(State(state): State<Arc<AppState>>, Path(session): Path<String>) -> Result<Json<BoardView>> {
    with_bench(&state, &session, |bench, _| Ok(bench.dequeue())).await
}

// Trees

#[derive(Deserialize)]
struct InsertRequest {
    value: Scalar,
    #[serde(default)]
    parent: Option<Scalar>,
}

impl InsertRequest {
    fn parent(&self) -> Option<String> {
        self.parent.as_ref().map(Scalar::to_string)
    }
}

/// Names a node by id (`n3`) or by value.
#[derive(Deserialize)]
struct NodeRequest {
    id: Scalar,
}

/// Names a tree edge by its two ends, each an id or a value.
#[derive(Deserialize)]
struct EdgeWeightRequest {
    parent: Scalar,
    child: Scalar,
    #[serde(default = "default_weight")]
    weight: u32,
}

async fn tree_insert(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<InsertRequest>,
) -> Result<Json<BoardView>> {
    let parent = req.parent();
    with_bench(&state, &session, |bench, _| {
        bench.tree_insert(&req.value.to_string(), parent.as_deref())
    })
    .await
}

async fn tree_delete(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<NodeRequest>,
) -> Result<Json<DetachView>> {
    with_bench(&state, &session, |bench, rng| bench.tree_delete(&req.id.to_string(), rng)).await
}

async fn tree_set_weight(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<EdgeWeightRequest>,
) -> Result<Json<BoardView>> {
    with_bench(&state, &session, |bench, _| {
        bench.tree_set_weight(&req.parent.to_string(), &req.child.to_string(), req.weight)
    })
    .await
}

async fn tree_reset(State(state): State<Arc<AppState>>, Path(session): Path<String>) -> Result<Json<BoardView>> {
    with_bench(&state, &session, |bench, _| Ok(bench.tree_reset())).await
}

async fn bt_add_root(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<ValueRequest>,
) -> Result<Json<BoardView>> {
    with_bench(&state, &session, |bench, _| bench.bt_add_root(&req.value.to_string())).await
}

async fn bt_add_left(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<InsertRequest>,
) -> Result<Json<BoardView>> {
    bt_add(&state, &session, Side::Left, req).await
}

async fn bt_add_right(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<InsertRequest>,
) -> Result<Json<BoardView>> {
    bt_add(&state, &session, Side::Right, req).await
}

async fn bt_add(state: &AppState, session: &str, side: Side, req: InsertRequest) -> Result<Json<BoardView>> {
    let parent = req.parent();
    with_bench(state, session, |bench, _| {
        bench.bt_add(side, &req.value.to_string(), parent.as_deref())
    })
    .await
}

async fn bt_delete(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<NodeRequest>,
) -> Result<Json<DetachView>> {
    with_bench(&state, &session, |bench, rng| bench.bt_delete(&req.id.to_string(), rng)).await
}

async fn bt_set_weight(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<EdgeWeightRequest>,
) -> Result<Json<BoardView>> {
    with_bench(&state, &session, |bench, _| {
        bench.bt_set_weight(&req.parent.to_string(), &req.child.to_string(), req.weight)
    })
    .await
}

async fn bt_reset(State(state): State<Arc<AppState>>, Path(session): Path<String>) -> Result<Json<BoardView>> {
    with_bench(&state, &session, |bench, _| Ok(bench.bt_reset())).await
}

// Binary search tree

async fn bst_insert(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<ValueRequest>,
) -> Result<Json<BoardView>> {
    with_bench(&state, &session, |bench, _| bench.bst_insert(&req.value)).await
}

async fn bst_search(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<ValueRequest>,
) -> Result<Json<SearchView>> {
    with_bench(&state, &session, |bench, _| bench.bst_search(&req.value)).await
}

async fn bst_delete(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<ValueRequest>,
) -> Result<Json<BoardView>> {
    with_bench(&state, &session, |bench, _| bench.bst_delete(&req.value)).await
}

async fn bst_detach(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<ValueRequest>,
) -> Result<Json<DetachView>> {
    with_bench(&state, &session, |bench, rng| bench.bst_detach(&req.value, rng)).await
}

async fn bst_max(State(state): State<Arc<AppState>>, Path(session): Path<String>) -> Result<Json<MaxView>> {
    with_bench(&state, &session, |bench, _| Ok(bench.bst_max())).await
}

async fn bst_height(State(state): State<Arc<AppState>>, Path(session): Path<String>) -> Result<Json<HeightView>> {
    with_bench(&state, &session, |bench, _| Ok(bench.bst_height())).await
}

#[derive(Deserialize, Default)]
struct ReattachRequest {
    #[serde(default)]
    parent: Option<Scalar>,
}

/// A request without a JSON body reattaches as a new root.
async fn reattach(
    State(state): State<Arc<AppState>>,
    Path((session, token)): Path<(String, String)>,
    body: Option<Json<ReattachRequest>>,
) -> Result<Json<BoardView>> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let parent = req.parent.as_ref().map(Scalar::to_string);
    with_bench(&state, &session, |bench, _| bench.reattach(&token, parent.as_deref())).await
}

// Graph editor

#[derive(Deserialize)]
struct LabelRequest {
    label: String,
}

#[derive(Deserialize)]
struct VertexRequest {
    id: String,
}

#[derive(Deserialize)]
struct EdgeRequest {
    u: String,
    v: String,
    #[serde(default)]
    directed: bool,
}

fn default_weight() -> u32 {
    1
}

#[derive(Deserialize)]
struct WeightRequest {
    u: String,
    v: String,
    #[serde(default = "default_weight")]
    weight: u32,
}

async fn graph_svg(State(state): State<Arc<AppState>>, Path(session): Path<String>) -> Result<Json<BoardView>> {
    with_bench(&state, &session, |bench, _| Ok(bench.graph_svg())).await
}

async fn graph_add_vertex(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<LabelRequest>,
) -> Result<Json<BoardView>> {
    with_bench(&state, &session, |bench, _| bench.graph_add_vertex(&req.label)).await
}

async fn graph_delete_vertex(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<VertexRequest>,
) -> Result<Json<BoardView>> {
    with_bench(&state, &session, |bench, _| bench.graph_delete_vertex(&req.id)).await
}

async fn graph_add_edge(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<EdgeRequest>,
) -> Result<Json<BoardView>> {
    with_bench(&state, &session, |bench, _| bench.graph_add_edge(&req.u, &req.v, req.directed)).await
}

async fn graph_set_weight(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<WeightRequest>,
) -> Result<Json<BoardView>> {
    with_bench(&state, &session, |bench, _| bench.graph_set_weight(&req.u, &req.v, req.weight)).await
}

async fn graph_reset(State(state): State<Arc<AppState>>, Path(session): Path<String>) -> Result<Json<BoardView>> {
    with_bench(&state, &session, |bench, _| Ok(bench.graph_reset())).await
}

// Transit map

async fn atlas_svg(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], state.network.render())
}

#[derive(Deserialize)]
struct RouteRequest {
    src: String,
    dst: String,
}

#[derive(Debug, Serialize)]
struct RouteResponse {
    path: Vec<String>,
    minutes: u32,
    meters: u32,
    svg: String,
}

async fn atlas_route(State(state): State<Arc<AppState>>, Json(req): Json<RouteRequest>) -> Json<RouteResponse> {
    let route = state.network.shortest_path(&req.src, &req.dst);
    let svg = state.network.render_with_path(&route.path);
    Json(RouteResponse {
        path: route.path,
        minutes: route.minutes,
        meters: route.meters,
        svg,
    })
}
