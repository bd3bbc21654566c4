//! Clock UI server - live digital clock in the browser.

mod page;
mod routes;
mod sse;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum::routing::get;
use clap::Parser;
use clock::io::clock::SystemClock;
use clock::io::config::{DEFAULT_CONFIG_PATH, load_config};
use clock::io::git::{CommitProbe, CommitSource};
use clock::ticker::Ticker;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "clock-ui")]
#[command(about = "Live digital clock served to the browser")]
struct Args {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on
    #[arg(long, default_value = "3001")]
    port: u16,

    /// Path to the TOML config (missing file means defaults)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Show the latest commit under the clock
    #[arg(long)]
    commit: bool,

    /// Repository to inspect (defaults to the working directory)
    #[arg(long)]
    repo: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clock_ui=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config = load_config(&args.config)?;
    if args.commit {
        config.commit.enabled = true;
    }
    info!(
        config = %args.config.display(),
        commit = config.commit.enabled,
        refresh = ?config.commit.refresh,
        "starting clock-ui"
    );

    // The probe may run here (refresh = once), so build the ticker off the runtime.
    let ticker = {
        let commit_config = config.commit.clone();
        let repo = args.repo.clone();
        tokio::task::spawn_blocking(move || {
            let source: Option<Box<dyn CommitSource>> = if commit_config.enabled {
                Some(Box::new(CommitProbe::new(&commit_config, repo)))
            } else {
                None
            };
            Ticker::new(Box::new(SystemClock), source, commit_config.refresh)
        })
        .await?
    };

    let state = AppState::new(config, ticker);

    sse::start_ticker(state.clone());

    let api_router = routes::api_router();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let shutdown_state = state.clone();
    let app = Router::new()
        .route("/", get(routes::index))
        .nest("/api", api_router)
        .route("/events", get(sse::events_handler))
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(tokio::signal::ctrl_c(), shutdown_state))
        .await?;

    info!("shut down");
    Ok(())
}

/// Resolve once `signal` fires. If the handler cannot be installed, never resolve.
async fn shutdown_signal<F>(signal: F, state: AppState)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "failed to listen for ctrl-c, graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
    state.begin_shutdown();
}
