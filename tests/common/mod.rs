//! Scripted UCI engine doubles for the integration suites.
//!
//! Each mock binds an ephemeral loopback port and answers inbound commands
//! according to a fixed script, recording every command and connection so
//! tests can assert on ordering and on "no socket was ever opened".

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use stockfish_gateway::EngineConfig;

/// How the scripted engine answers each inbound command.
#[derive(Clone, Copy)]
pub enum Script {
    /// Full happy path: `uciok`, `readyok`, then this reply to `go`.
    BestMove(&'static str),
    /// Respond to everything with chatter that never contains `uciok`.
    SilentHandshake,
    /// Handshake normally but never emit the `bestmove` substring.
    NoBestMove,
}

pub struct MockEngine {
    pub port: u16,
    connections: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<String>>>,
}

impl MockEngine {
    pub fn spawn(script: Script) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock listener");
        let port = listener.local_addr().unwrap().port();
        let connections = Arc::new(AtomicUsize::new(0));
        let received = Arc::new(Mutex::new(Vec::new()));

        {
            let connections = connections.clone();
            let received = received.clone();
            thread::spawn(move || {
                for stream in listener.incoming() {
                    let Ok(stream) = stream else { break };
                    connections.fetch_add(1, Ordering::SeqCst);
                    let received = received.clone();
                    thread::spawn(move || serve(stream, script, received));
                }
            });
        }

        MockEngine {
            port,
            connections,
            received,
        }
    }

    /// Engine config pointed at this mock, with test-friendly timeouts.
    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            host: "127.0.0.1".to_string(),
            port: self.port,
            connect_timeout: Duration::from_secs(1),
            read_timeout: Duration::from_secs(2),
            poll_interval: Duration::from_millis(10),
            search_depth: 1,
        }
    }

    /// Same config with a shorter marker-wait budget, for timeout tests.
    pub fn config_with_read_timeout(&self, read_timeout: Duration) -> EngineConfig {
        EngineConfig {
            read_timeout,
            ..self.config()
        }
    }

    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn received_commands(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

fn serve(stream: TcpStream, script: Script, received: Arc<Mutex<Vec<String>>>) {
    let mut reader = BufReader::new(stream.try_clone().expect("clone mock stream"));
    let mut writer = stream;
    let mut line = String::new();

    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let command = line.trim().to_string();
        received.lock().unwrap().push(command.clone());

        let outcome = match script {
            Script::SilentHandshake => writeln!(writer, "id name MockEngine"),
            Script::BestMove(reply) => match command.as_str() {
                "uci" => writeln!(writer, "id name MockEngine\nid author gateway tests\nuciok"),
                "isready" => writeln!(writer, "readyok"),
                c if c.starts_with("go") => {
                    writeln!(writer, "info depth 1 score cp 13\n{}", reply)
                }
                // position commands get no acknowledgement, per UCI
                _ => Ok(()),
            },
            Script::NoBestMove => match command.as_str() {
                "uci" => writeln!(writer, "uciok"),
                "isready" => writeln!(writer, "readyok"),
                c if c.starts_with("go") => writeln!(writer, "info string thinking"),
                _ => Ok(()),
            },
        };
        if outcome.is_err() {
            break;
        }
    }
}
