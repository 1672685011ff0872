use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::config::EngineConfig;
use crate::errors::Result;
use crate::session::EngineSession;

/// Terminal tokens for each UCI exchange.
const UCIOK: &str = "uciok";
const READYOK: &str = "readyok";
const BESTMOVE: &str = "bestmove";

/// Connect and run the identification handshake only.
///
/// Backs the `/test` route: proves the engine is reachable and speaks UCI,
/// returning its raw identification output.
pub fn probe_engine(config: &EngineConfig) -> Result<String> {
    let mut session = EngineSession::connect(config)?;
    session.send("uci")?;
    session.receive_until(UCIOK)
}

/// Run the fixed command sequence for one best-move search.
///
/// Each step blocks on the prior step's terminal marker before proceeding.
/// The one exception is `position`/`go`: both are sent back to back with no
/// intervening wait, because the next marker to watch for is the final
/// `bestmove` line. The returned text is the entire accumulated search
/// output, info lines included. The connection is closed when this function
/// returns, success or failure alike.
pub fn query_best_move(config: &EngineConfig, fen: &str) -> Result<String> {
    let mut session = EngineSession::connect(config)?;

    session.send("uci")?;
    session.receive_until(UCIOK)?;

    session.send("isready")?;
    session.receive_until(READYOK)?;

    // FEN goes through verbatim; the engine and the rules library each
    // parse it on their own terms.
    session.send(&format!("position fen {}", fen))?;
    session.send(&format!("go depth {}", config.search_depth))?;

    let output = session.receive_until(BESTMOVE)?;
    debug!(fen, bytes = output.len(), "search finished");
    Ok(output)
}

/// Extract the candidate move token from accumulated engine output.
///
/// Matches `bestmove` followed by a run of word characters, which covers
/// plain moves (`e2e4`) and promotions (`e7e8q`). The null-move sentinel
/// `bestmove (none)` fails the pattern on purpose: the caller reports it as
/// an unparseable response rather than special-casing it here.
pub fn extract_best_move(output: &str) -> Option<&str> {
    static BESTMOVE_RE: OnceLock<Regex> = OnceLock::new();
    let re = BESTMOVE_RE.get_or_init(|| Regex::new(r"bestmove\s+(\w+)").expect("valid regex"));
    re.captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
