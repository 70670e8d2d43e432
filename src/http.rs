//! A thin HTTP/JSON wrapper over the core API: one in-memory game per
//! process, guarded by a `parking_lot::Mutex`. Demonstrates the shape of
//! the core API over HTTP; not a production game server (no sessions, no
//! auth, no persistence).

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::search::{self, Evaluator};
use crate::{IllegalMoveError, Move, PieceKind, Position};

#[derive(Clone)]
pub struct AppState {
    game: Arc<Mutex<Position>>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        AppState {
            game: Arc::new(Mutex::new(Position::startpos_tracked())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
pub struct BoardResponse {
    fen: String,
    turn: String,
    in_check: bool,
}

impl BoardResponse {
    fn from_position(pos: &Position) -> Self {
        BoardResponse {
            fen: pos.to_fen(),
            turn: pos.turn().to_string(),
            in_check: pos.in_check(pos.turn()),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
pub struct GameEndResponse {
    end: String,
}

#[derive(Deserialize)]
pub struct LoadFenRequest {
    fen: String,
}

#[derive(Deserialize)]
pub struct MakeMoveRequest {
    from: String,
    to: String,
    promotion: Option<char>,
}

#[derive(Serialize)]
pub struct LegalMovesResponse {
    moves: Vec<String>,
}

#[derive(Deserialize)]
pub struct BestMoveQuery {
    depth: Option<u32>,
}

#[derive(Serialize)]
pub struct BestMoveResponse {
    best_move: Option<String>,
}

/// Builds the router with one handler per core operation: `/new_game`,
/// `/load_fen`, `/make_move`, `/legal_moves`, `/best_move`.
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route("/new_game", post(new_game))
        .route("/load_fen", post(load_fen))
        .route("/make_move", post(make_move))
        .route("/legal_moves", get(legal_moves))
        .route("/best_move", get(best_move))
        .with_state(AppState::new())
}

async fn new_game(State(state): State<AppState>) -> Json<BoardResponse> {
    let mut game = state.game.lock();
    *game = Position::startpos_tracked();
    Json(BoardResponse::from_position(&game))
}

async fn load_fen(
    State(state): State<AppState>,
    Json(body): Json<LoadFenRequest>,
) -> Result<Json<BoardResponse>, (StatusCode, Json<ErrorResponse>)> {
    let pos = Position::from_fen(&body.fen).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: e.to_string() }),
        )
    })?;
    let mut game = state.game.lock();
    *game = pos.with_repetition_tracking();
    Ok(Json(BoardResponse::from_position(&game)))
}

async fn make_move(
    State(state): State<AppState>,
    Json(body): Json<MakeMoveRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let from = body.from.parse().map_err(|_| bad_request("invalid from square"))?;
    let to = body.to.parse().map_err(|_| bad_request("invalid to square"))?;
    let promotion = match body.promotion {
        Some(ch) => Some(
            PieceKind::from_char(ch.to_ascii_lowercase())
                .ok_or_else(|| bad_request("invalid promotion piece"))?,
        ),
        None => None,
    };

    let m = match promotion {
        Some(kind) => Move::promoting(from, to, kind),
        None => Move::new(from, to),
    };

    let mut game = state.game.lock();
    game.make_safe_move(m).map_err(|e: IllegalMoveError| {
        (
            StatusCode::CONFLICT,
            Json(ErrorResponse { error: e.to_string() }),
        )
    })?;

    if let Err(end) = game.raise_if_game_over() {
        return Ok(Json(
            serde_json::to_value(GameEndResponse { end: end.to_string() }).unwrap(),
        ));
    }
    Ok(Json(
        serde_json::to_value(BoardResponse::from_position(&game)).unwrap(),
    ))
}

async fn legal_moves(State(state): State<AppState>) -> Json<LegalMovesResponse> {
    let game = state.game.lock();
    Json(LegalMovesResponse {
        moves: game.legal_moves().iter().map(Move::to_string).collect(),
    })
}

async fn best_move(
    State(state): State<AppState>,
    Query(query): Query<BestMoveQuery>,
) -> Json<BestMoveResponse> {
    let depth = query.depth.unwrap_or(3).max(1);
    let mut game = state.game.lock();
    let best = search::best_move(&mut game, depth, Evaluator::Weighted).map(|(m, _)| m.to_string());
    Json(BestMoveResponse { best_move: best })
}

fn bad_request(msg: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: msg.to_string() }),
    )
}
