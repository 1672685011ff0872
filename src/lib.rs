//! # Stockfish Gateway
//!
//! An HTTP adapter that exposes a UCI chess engine's best-move search as a
//! small JSON API. The gateway accepts a position in Forsyth-Edwards
//! Notation, drives the engine through the UCI handshake and search
//! sequence over a TCP socket, validates the returned move against chess
//! rules, and answers with the move plus the updated position.
//!
//! ## How it works
//!
//! - **Session driver** ([`session::EngineSession`]): one transient TCP
//!   connection per request, newline-terminated commands out, and
//!   marker-bounded accumulation of the engine's asynchronous output under
//!   an overall timeout.
//! - **Sequencer** ([`uci`]): the fixed `uci` → `isready` → `position fen`
//!   → `go depth` sequence, waiting on `uciok`, `readyok`, and `bestmove`.
//! - **Rules validation** ([`rules`]): legality and resulting-FEN
//!   computation via the `chess` crate.
//! - **HTTP surface** ([`server`]): three axum routes (`/`, `/test`,
//!   `/bestmove`) with structured error bodies.
//!
//! ## Quick Start
//!
//! ```rust
//! use stockfish_gateway::uci::extract_best_move;
//!
//! let output = "info depth 20 score cp 34 pv e2e4\nbestmove e2e4 ponder e7e5\n";
//! assert_eq!(extract_best_move(output), Some("e2e4"));
//! ```
//!
//! Engine failures (unreachable, handshake timeout, broken socket) map to
//! HTTP 500 with the error text; a missing `fen` parameter maps to 400
//! before any socket is opened; an engine move the rules library rejects is
//! a structured `"status": "error"` body on HTTP 200, because the call
//! itself succeeded.

// Core modules
pub mod config;
pub mod errors;
pub mod rules;
pub mod server;
pub mod session;
pub mod uci;

// Re-export commonly used types
pub use config::EngineConfig;
pub use errors::{GatewayError, Result};
pub use server::router;
pub use session::EngineSession;
