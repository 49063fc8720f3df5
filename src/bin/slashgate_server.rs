//! Serves the slash-command API over HTTP.
//!
//! Usage:
//!
//! ```text
//! slashgate-server [--config <path>] [--listen <addr>] [--log-level <level>] [--json-logs]
//! ```
//!
//! The optional configuration file is JSON and describes the listen address,
//! pagination limits, and the rooms the static access gate knows about:
//!
//! ```json
//! {
//!   "listen_addr": "127.0.0.1:3000",
//!   "pagination": { "default_count": 50, "upper_count_limit": 100 },
//!   "rooms": {
//!     "GENERAL": { "public": true },
//!     "ops": { "members": ["alice", "bob"] }
//!   }
//! }
//! ```
//!
//! The built-in commands are registered at startup.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use slashgate::command::adapters::{
    builtin::builtin_commands,
    http,
    memory::{InMemoryCommandRegistry, StaticRoomAccessGate},
    query::JsonResultProcessor,
};
use slashgate::command::api::CommandsApi;
use slashgate::config::ServerConfig;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Slash-command API server.
#[derive(Parser)]
#[command(name = "slashgate-server")]
#[command(about = "HTTP API server for slash commands")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "SLASHGATE_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overriding the configuration file
    #[arg(short, long)]
    listen: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long)]
    json_logs: bool,
}

fn setup_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

fn load_config(args: &Args) -> Result<ServerConfig, slashgate::config::ConfigError> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_path(path)?,
        None => ServerConfig::default(),
    };
    if let Some(listen) = &args.listen {
        config.listen_addr.clone_from(listen);
    }
    Ok(config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(%err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(&args.log_level, args.json_logs);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let registry = match InMemoryCommandRegistry::with_commands(builtin_commands()) {
        Ok(registry) => registry,
        Err(err) => {
            error!(%err, "failed to register built-in commands");
            return ExitCode::FAILURE;
        }
    };
    let access_gate = StaticRoomAccessGate::from_config(&config.rooms);
    let api = CommandsApi::new(
        Arc::new(registry),
        Arc::new(access_gate),
        Arc::new(JsonResultProcessor),
        config.pagination,
    );

    let listener = match TcpListener::bind(&config.listen_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%err, addr = %config.listen_addr, "failed to bind listener");
            return ExitCode::FAILURE;
        }
    };
    info!(
        addr = %config.listen_addr,
        rooms = config.rooms.len(),
        "slash-command server listening"
    );

    if let Err(err) = axum::serve(listener, http::router(Arc::new(api)))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(%err, "server error");
        return ExitCode::FAILURE;
    }

    info!("server stopped");
    ExitCode::SUCCESS
}
