//! Demo server for the applog façade and access-log middleware.
//!
//! ```text
//!     Client ──▶ /health ──▶ AccessLogLayer ─────────▶ "ok"
//!     Client ──▶ /echo   ──▶ access_log_middleware ──▶ echoed body
//!                                  │
//!                                  ▼
//!                        logging façade (stderr)
//!                                  ▲
//!     config file ──▶ ConfigWatcher ┘ (re-init + flag flips)
//! ```

use axum::{
    body::Bytes,
    http::header,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use applog::config::{load_config, AppConfig, ConfigWatcher};
use applog::http::{access_log_middleware, AccessLogFlags, AccessLogLayer, AccessLogState};
use applog::logging;

#[derive(Parser)]
#[command(name = "applog")]
#[command(about = "Demo HTTP server with leveled access logging", long_about = None)]
struct Cli {
    /// TOML config file; watched for changes
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overrides the config file
    #[arg(short, long)]
    bind: Option<String>,

    /// Debug level and source locations on every line
    #[arg(short, long)]
    verbose: bool,

    /// JSON lines instead of text
    #[arg(long)]
    json: bool,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Log requests at Debug only, instead of Info
    #[arg(long)]
    no_access_log: bool,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(bind) = &self.bind {
            config.server.bind_address = bind.clone();
        }
        config.logging.verbose |= self.verbose;
        config.logging.json |= self.json;
        if self.no_color {
            config.logging.color = false;
        }
        if self.no_access_log {
            config.logging.access_log = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Framework-internal events (hyper, axum) go through tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    cli.apply(&mut config);

    logging::configure(&config.logging);
    logging::print(&["applog", env!("CARGO_PKG_VERSION")]);
    let flags = AccessLogFlags::new(config.logging.verbose, config.logging.access_log);

    let config_path = cli.config.clone();
    let _watcher = match config_path {
        Some(path) => {
            let (watcher, mut updates) = ConfigWatcher::new(&path);
            let watcher = watcher.run()?;
            let flags = flags.clone();
            tokio::spawn(async move {
                while let Some(mut new_config) = updates.recv().await {
                    cli.apply(&mut new_config);
                    logging::configure(&new_config.logging);
                    flags.set_verbose(new_config.logging.verbose);
                    flags.set_access_log(new_config.logging.access_log);
                    logging::info(&["logging configuration reloaded"]);
                }
            });
            Some(watcher)
        }
        None => None,
    };

    let app = build_router(flags);

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let local_addr = listener.local_addr()?;
    applog::infof!("listening on {}", local_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    logging::info(&["shutdown complete"]);
    Ok(())
}

fn build_router(flags: AccessLogFlags) -> Router {
    let health = Router::new()
        .route("/health", get(health_handler))
        .layer(AccessLogLayer::new(flags.clone()));

    let echo = Router::new()
        .route("/echo", post(echo_handler))
        .route_layer(middleware::from_fn_with_state(
            AccessLogState::new(flags),
            access_log_middleware,
        ));

    health.merge(echo)
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn echo_handler(body: Bytes) -> impl IntoResponse {
    ([(header::CONTENT_LENGTH, body.len().to_string())], body)
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        applog::errorf!("failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    logging::info(&["shutdown signal received"]);
}
