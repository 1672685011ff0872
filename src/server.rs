use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::config::EngineConfig;
use crate::errors::GatewayError;
use crate::rules::{self, MoveRejection};
use crate::uci;

/// Shared immutable state: one engine config for the process lifetime.
pub type SharedConfig = Arc<EngineConfig>;

/// Build the gateway's HTTP surface.
///
/// Three GET routes over JSON, with permissive CORS so browser clients can
/// call the gateway directly. All engine work happens behind
/// `spawn_blocking`, one independent task per request.
pub fn router(config: SharedConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/test", get(test_engine))
        .route("/bestmove", get(best_move))
        .with_state(config)
        .layer(cors)
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Serialize)]
struct TestResponse {
    status: String,
    message: String,
    response: String,
}

#[derive(Serialize)]
struct BestMoveResponse {
    best_move: String,
    new_fen: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    status: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    best_move: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_response: Option<String>,
}

/// The two shapes a successful `/bestmove` call can take.
#[derive(Serialize)]
#[serde(untagged)]
enum BestMoveReply {
    Move(BestMoveResponse),
    Error(ErrorResponse),
}

#[derive(Deserialize)]
struct BestMoveParams {
    fen: Option<String>,
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Stockfish API is running".to_string(),
    })
}

async fn test_engine(
    State(config): State<SharedConfig>,
) -> Result<Json<TestResponse>, (StatusCode, String)> {
    let response = run_engine_task(config, |cfg| uci::probe_engine(cfg)).await?;
    Ok(Json(TestResponse {
        status: "success".to_string(),
        message: "Connected to Stockfish successfully".to_string(),
        response,
    }))
}

async fn best_move(
    State(config): State<SharedConfig>,
    Query(params): Query<BestMoveParams>,
) -> Result<Json<BestMoveReply>, (StatusCode, String)> {
    // Reject before any socket is opened.
    let fen = match params.fen {
        Some(fen) if !fen.is_empty() => fen,
        _ => {
            return Err(map_error(GatewayError::Validation(
                "Missing 'fen' parameter".to_string(),
            )))
        }
    };

    let output = {
        let fen = fen.clone();
        run_engine_task(config, move |cfg| uci::query_best_move(cfg, &fen)).await?
    };

    let Some(token) = uci::extract_best_move(&output) else {
        return Ok(Json(BestMoveReply::Error(ErrorResponse {
            status: "error".to_string(),
            message: "Could not find best move in response".to_string(),
            best_move: None,
            raw_response: Some(output),
        })));
    };

    let reply = match rules::apply_best_move(&fen, token) {
        Ok(new_fen) => {
            info!(fen = %fen, best_move = token, "best move served");
            BestMoveReply::Move(BestMoveResponse {
                best_move: token.to_string(),
                new_fen,
            })
        }
        // An unparseable token is a fortiori not legal; both cases get the
        // same body so clients see one shape for "engine move rejected".
        Err(MoveRejection::Illegal) | Err(MoveRejection::UnparseableMove(_)) => {
            BestMoveReply::Error(ErrorResponse {
                status: "error".to_string(),
                message: "Best move is not legal in the given position".to_string(),
                best_move: Some(token.to_string()),
                raw_response: None,
            })
        }
        Err(MoveRejection::InvalidFen(e)) => BestMoveReply::Error(ErrorResponse {
            status: "error".to_string(),
            message: format!("Invalid FEN: {}", e),
            best_move: Some(token.to_string()),
            raw_response: None,
        }),
    };

    Ok(Json(reply))
}

/// Run one blocking engine sequence on its own executor thread.
///
/// Each request gets an independent execution unit; the only shared state
/// is the immutable config behind the `Arc`.
async fn run_engine_task<T, F>(config: SharedConfig, task: F) -> Result<T, (StatusCode, String)>
where
    T: Send + 'static,
    F: FnOnce(&EngineConfig) -> crate::errors::Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || task(config.as_ref())).await {
        Ok(result) => result.map_err(map_error),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Engine task failed: {}", e),
        )),
    }
}

/// Translate error kinds into status codes at the HTTP boundary only.
fn map_error(err: GatewayError) -> (StatusCode, String) {
    let status = match err {
        GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
        GatewayError::Connection(_) | GatewayError::Transport(_) | GatewayError::Timeout { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    if status.is_server_error() {
        error!(%err, "engine request failed");
    }
    (status, err.to_string())
}
