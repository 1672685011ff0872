use std::sync::Arc;
use std::time::Duration;

use clap::{Arg, Command};
use tracing::info;

use stockfish_gateway::{router, EngineConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let matches = Command::new("stockfish-gateway")
        .version(env!("CARGO_PKG_VERSION"))
        .about("HTTP gateway exposing a UCI chess engine's best-move search")
        .arg(
            Arg::new("bind")
                .short('b')
                .long("bind")
                .value_name("ADDR")
                .help("Address for the HTTP listener")
                .default_value("0.0.0.0:4000"),
        )
        .arg(
            Arg::new("engine_host")
                .long("engine-host")
                .value_name("HOST")
                .help("Hostname of the UCI engine's TCP listener")
                .default_value("stockfish"),
        )
        .arg(
            Arg::new("engine_port")
                .long("engine-port")
                .value_name("PORT")
                .help("Port of the UCI engine's TCP listener")
                .value_parser(clap::value_parser!(u16))
                .default_value("4001"),
        )
        .arg(
            Arg::new("depth")
                .short('d')
                .long("depth")
                .value_name("DEPTH")
                .help("Fixed search depth sent with every go command")
                .value_parser(clap::value_parser!(u8).range(1..=64))
                .default_value("20"),
        )
        .arg(
            Arg::new("connect_timeout")
                .long("connect-timeout")
                .value_name("SECONDS")
                .help("TCP connect timeout")
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            Arg::new("read_timeout")
                .long("read-timeout")
                .value_name("SECONDS")
                .help("Overall wait budget for each engine reply marker")
                .value_parser(clap::value_parser!(u64))
                .default_value("30"),
        )
        .get_matches();

    let bind = matches.get_one::<String>("bind").unwrap().clone();
    let config = EngineConfig {
        host: matches.get_one::<String>("engine_host").unwrap().clone(),
        port: *matches.get_one::<u16>("engine_port").unwrap(),
        connect_timeout: Duration::from_secs(*matches.get_one::<u64>("connect_timeout").unwrap()),
        read_timeout: Duration::from_secs(*matches.get_one::<u64>("read_timeout").unwrap()),
        search_depth: *matches.get_one::<u8>("depth").unwrap(),
        ..EngineConfig::default()
    };

    info!(bind = %bind, engine = %config.addr(), depth = config.search_depth, "Stockfish gateway starting");

    let app = router(Arc::new(config));
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
