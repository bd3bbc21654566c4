//! Shared application state for the clock server.

use std::sync::Arc;

use clock::core::types::Tick;
use clock::io::config::ClockConfig;
use clock::ticker::Ticker;
use tokio::sync::{broadcast, watch};

/// Shared state accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ClockConfig>,
    /// Produces the tick for each interval.
    pub ticker: Arc<Ticker>,
    /// Broadcast sender for ticks pushed to SSE clients.
    pub tick_tx: Arc<broadcast::Sender<Tick>>,
    /// Last tick published by the background ticker; HTTP handlers read it.
    pub latest_tx: Arc<watch::Sender<Option<Tick>>>,
    /// Flipped to `true` once the server starts shutting down.
    pub shutdown_tx: Arc<watch::Sender<bool>>,
}

impl AppState {
    pub fn new(config: ClockConfig, ticker: Ticker) -> Self {
        let (tick_tx, _) = broadcast::channel(16);
        let (latest_tx, _) = watch::channel(None);
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            config: Arc::new(config),
            ticker: Arc::new(ticker),
            tick_tx: Arc::new(tick_tx),
            latest_tx: Arc::new(latest_tx),
            shutdown_tx: Arc::new(shutdown_tx),
        }
    }

    /// Ask open SSE streams to end so graceful shutdown can complete.
    pub fn begin_shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Sample a tick off the async runtime; the probe may block on a child process.
    pub async fn sample(&self) -> anyhow::Result<Tick> {
        let ticker = Arc::clone(&self.ticker);
        Ok(tokio::task::spawn_blocking(move || ticker.tick()).await?)
    }

    /// Latest published tick, sampling directly only before the first one.
    pub async fn current(&self) -> anyhow::Result<Tick> {
        let latest = self.latest_tx.borrow().clone();
        match latest {
            Some(tick) => Ok(tick),
            None => self.sample().await,
        }
    }
}
