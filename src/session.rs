use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::errors::{GatewayError, Result};

/// A single UCI session over TCP.
///
/// The engine's protocol is asynchronous line-oriented text: no framing
/// beyond newlines, no correlation ids. The only reliable way to know a
/// command has been fully answered is to watch the output stream for a
/// known terminal token (`uciok`, `readyok`, a line starting with
/// `bestmove`). [`EngineSession::receive_until`] encapsulates exactly that
/// weak synchronization primitive: accumulate short blocking reads until
/// the marker substring appears, bounded by an overall wall-clock budget.
///
/// One session is opened per request and dropped when the request
/// finishes. Sessions are never pooled or shared across threads.
pub struct EngineSession {
    stream: TcpStream,
    read_timeout: Duration,
    poll_interval: Duration,
}

impl EngineSession {
    /// Open a TCP connection to the configured engine address.
    ///
    /// Fails with [`GatewayError::Connection`] if the address does not
    /// resolve, the connection is refused, or the attempt outlasts the
    /// connect timeout. No retry is performed here.
    pub fn connect(config: &EngineConfig) -> Result<Self> {
        let addr = config
            .addr()
            .to_socket_addrs()
            .map_err(|e| {
                GatewayError::Connection(format!("cannot resolve {}: {}", config.addr(), e))
            })?
            .next()
            .ok_or_else(|| {
                GatewayError::Connection(format!("no address found for {}", config.addr()))
            })?;

        let stream = TcpStream::connect_timeout(&addr, config.connect_timeout)
            .map_err(|e| GatewayError::Connection(format!("{}: {}", config.addr(), e)))?;

        // The per-read socket timeout doubles as the poll cadence inside
        // receive_until: each read blocks at most one poll interval.
        stream
            .set_read_timeout(Some(config.poll_interval))
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        debug!(addr = %config.addr(), "connected to engine");

        Ok(Self {
            stream,
            read_timeout: config.read_timeout,
            poll_interval: config.poll_interval,
        })
    }

    /// Write one command line, newline-terminated, in full.
    ///
    /// No acknowledgement is expected at this layer; completion is inferred
    /// later by matching a marker in subsequent output.
    pub fn send(&mut self, command: &str) -> Result<()> {
        trace!(command, "-> engine");
        self.stream
            .write_all(format!("{}\n", command).as_bytes())
            .map_err(|e| GatewayError::Transport(format!("failed to send '{}': {}", command, e)))
    }

    /// Accumulate engine output until `marker` appears as a substring.
    ///
    /// Returns everything read since the call began, marker included. The
    /// buffer is local to this call: bytes arriving after the marker but
    /// before the next call are read fresh by that call, never retroactively
    /// inspected. A read that yields no data sleeps one poll interval; a
    /// read that times out at the socket layer is transient and retried.
    /// Only the overall budget elapsing produces [`GatewayError::Timeout`],
    /// which names the marker that never appeared.
    pub fn receive_until(&mut self, marker: &str) -> Result<String> {
        let start = Instant::now();
        let mut buffer = String::new();
        let mut chunk = [0u8; 4096];

        while start.elapsed() < self.read_timeout {
            match self.stream.read(&mut chunk) {
                Ok(0) => thread::sleep(self.poll_interval),
                Ok(n) => {
                    buffer.push_str(&String::from_utf8_lossy(&chunk[..n]));
                    if buffer.contains(marker) {
                        trace!(marker, bytes = buffer.len(), "<- engine");
                        return Ok(buffer);
                    }
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {}
                Err(e) => {
                    return Err(GatewayError::Transport(format!(
                        "failed to read from engine: {}",
                        e
                    )));
                }
            }
        }

        Err(GatewayError::Timeout {
            marker: marker.to_string(),
            waited_ms: self.read_timeout.as_millis() as u64,
        })
    }
}

impl Drop for EngineSession {
    fn drop(&mut self) {
        // Close errors are irrelevant; the session is finished either way.
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}
