use std::fmt;

/// Custom error types for the gateway's engine-facing layer.
///
/// This is the closed set of failures the session driver and sequencer can
/// produce. Outcomes that occur *after* a successful engine round-trip — an
/// unparseable `bestmove` line, a move the rules library rejects — are not
/// errors at this level; the HTTP call itself succeeded and they are shaped
/// into structured response bodies instead (see `server`).
#[derive(Debug, Clone)]
pub enum GatewayError {
    /// TCP connection to the engine could not be established
    Connection(String),
    /// A send or receive failed at the socket layer
    Transport(String),
    /// The overall wait budget for a marker elapsed without it appearing
    Timeout { marker: String, waited_ms: u64 },
    /// Request rejected before any engine interaction was attempted
    Validation(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Connection(msg) => {
                write!(f, "Failed to connect to Stockfish: {}", msg)
            }
            GatewayError::Transport(msg) => write!(f, "Engine transport error: {}", msg),
            GatewayError::Timeout { marker, waited_ms } => {
                write!(f, "Timeout waiting for '{}' after {}ms", marker, waited_ms)
            }
            GatewayError::Validation(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

// Convenience type alias
pub type Result<T> = std::result::Result<T, GatewayError>;
