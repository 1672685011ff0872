use std::str::FromStr;

use chess::{Board, ChessMove};

/// Why a candidate move was rejected.
///
/// These are shaped into structured response bodies rather than HTTP
/// failures — by the time validation runs, the engine round-trip already
/// succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveRejection {
    /// The caller's FEN does not describe a valid position
    InvalidFen(String),
    /// The engine's token is not a syntactically valid UCI move
    UnparseableMove(String),
    /// Syntactically valid, but not legal in the given position
    Illegal,
}

/// Validate the engine's candidate move and compute the resulting position.
///
/// Both inputs come from outside (the FEN from the caller, the token from
/// the engine), so nothing is trusted: the position is re-parsed, the token
/// re-parsed, and legality checked against full move generation before the
/// move is applied. On success the returned string is the FEN of the
/// position after the move.
pub fn apply_best_move(fen: &str, token: &str) -> Result<String, MoveRejection> {
    let board = Board::from_str(fen).map_err(|e| MoveRejection::InvalidFen(e.to_string()))?;
    let candidate =
        ChessMove::from_str(token).map_err(|e| MoveRejection::UnparseableMove(e.to_string()))?;

    if !board.legal(candidate) {
        return Err(MoveRejection::Illegal);
    }

    Ok(board.make_move_new(candidate).to_string())
}
