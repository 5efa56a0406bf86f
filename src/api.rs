use crate::error::GameError;
use crate::game::player::PlayerId;
use crate::game::replay::Projection;
use crate::game::{Command, GameOptions, RandomMoves, Snapshot};
use crate::session::{EventPage, SessionManager};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

type Manager = State<&'static SessionManager>;

pub fn make_router(manager: &'static SessionManager) -> Router {
    Router::new()
        .route("/sessions", get(get_sessions))
        .route("/games", post(create_game))
        .route("/games/:id/players", post(join_game))
        .route("/games/:id/snapshot", get(get_snapshot))
        .route("/games/:id/events", get(get_events))
        .route("/games/:id/replay", get(get_replay))
        .route("/games/:id/commands", post(submit_command))
        .route("/games/:id/agents/step", post(step_agents))
        .with_state(manager)
}

pub async fn listen(port: u16) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    log::info!("API listening on {}", listener.local_addr()?);
    Ok(listener)
}

/// A [GameError] rendered as an HTTP response.
struct ApiError(GameError);

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use GameError::*;
        let status = match self.0 {
            GameNotFound | PlayerNotFound => StatusCode::NOT_FOUND,
            NotYourTurn | StateMismatch | GameAlreadyEnded | AlreadyAssigned | CannotJoinStartedGame => {
                StatusCode::CONFLICT
            }
            Aborted(_) => StatusCode::INTERNAL_SERVER_ERROR,
            InvalidGameOptions | UnsupportedPlayerCount | IllegalTarget | InvalidCard | InvalidDiscard => {
                StatusCode::BAD_REQUEST
            }
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[derive(Deserialize)]
struct ViewerQuery {
    viewer: Option<usize>,
    #[serde(default)]
    since: u64,
}

#[derive(Deserialize)]
struct JoinRequest {
    name: String,
    #[serde(default)]
    human: bool,
}

#[derive(Deserialize)]
struct CommandRequest {
    actor: PlayerId,
    command: Command,
}

#[derive(Deserialize)]
struct StepRequest {
    #[serde(default)]
    seed: u64,
    #[serde(default = "default_max_moves")]
    max_moves: usize,
}

fn default_max_moves() -> usize {
    100
}

/// Upper bound on agent moves applied by a single request.
const MAX_AGENT_MOVES: usize = 500;

impl StepRequest {
    fn move_limit(&self) -> usize {
        self.max_moves.min(MAX_AGENT_MOVES)
    }
}

async fn get_sessions(State(manager): Manager) -> Json<Value> {
    Json(json!({
        "num_sessions": manager.num_games()
    }))
}

async fn create_game(State(manager): Manager, Json(options): Json<GameOptions>) -> Result<Json<Value>, ApiError> {
    let session = manager.create_game(options)?;
    Ok(Json(json!({ "game_id": session.id() })))
}

async fn join_game(
    State(manager): Manager,
    Path(id): Path<String>,
    Json(req): Json<JoinRequest>,
) -> Result<Json<Value>, ApiError> {
    let player = manager.find_game(&id)?.join(&req.name, req.human)?;
    Ok(Json(json!({ "player_id": player })))
}

async fn get_snapshot(
    State(manager): Manager,
    Path(id): Path<String>,
    Query(query): Query<ViewerQuery>,
) -> Result<Json<Snapshot>, ApiError> {
    let snapshot = manager.find_game(&id)?.snapshot(query.viewer.map(PlayerId))?;
    Ok(Json(snapshot))
}

async fn get_events(
    State(manager): Manager,
    Path(id): Path<String>,
    Query(query): Query<ViewerQuery>,
) -> Result<Json<EventPage>, ApiError> {
    let page = manager.find_game(&id)?.events(query.since, query.viewer.map(PlayerId))?;
    Ok(Json(page))
}

async fn get_replay(State(manager): Manager, Path(id): Path<String>) -> Result<Json<Projection>, ApiError> {
    Ok(Json(manager.find_game(&id)?.replay()?))
}

async fn submit_command(
    State(manager): Manager,
    Path(id): Path<String>,
    Json(req): Json<CommandRequest>,
) -> Result<Json<Value>, ApiError> {
    let session = manager.find_game(&id)?;
    match session.apply(req.actor, req.command) {
        Ok(next_sequence) => Ok(Json(json!({ "next_sequence": next_sequence }))),
        Err(err) => {
            log::warn!("[{}] rejected command from {}: {}", id, req.actor, err);
            Err(err.into())
        }
    }
}

async fn step_agents(
    State(manager): Manager,
    Path(id): Path<String>,
    Json(req): Json<StepRequest>,
) -> Result<Json<Value>, ApiError> {
    let session = manager.find_game(&id)?;
    let mut provider = RandomMoves::new(req.seed);
    let applied = session.step_agents(&mut provider, req.move_limit())?;
    Ok(Json(json!({ "applied": applied })))
}
