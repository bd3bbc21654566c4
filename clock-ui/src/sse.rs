//! Server-Sent Events stream and the background ticker.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use futures::stream::Stream;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::state::AppState;

/// SSE endpoint handler.
pub async fn events_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.tick_tx.subscribe();
    let mut shutdown = state.shutdown_tx.subscribe();

    let stream = async_stream::stream! {
        // Send initial connected event
        yield Ok(Event::default().event("connected").data("{}"));

        loop {
            if *shutdown.borrow() {
                break;
            }
            let received = tokio::select! {
                _ = shutdown.changed() => None,
                received = rx.recv() => Some(received),
            };
            let Some(received) = received else {
                break;
            };
            match received {
                Ok(tick) => {
                    if let Ok(json) = serde_json::to_string(&tick) {
                        yield Ok(Event::default().event("tick").data(json));
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(skipped = n, "SSE client lagged, some ticks dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    break;
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

/// Start the ticker in a background task.
pub fn start_ticker(state: AppState) {
    tokio::spawn(async move {
        run_ticker(state).await;
    });
}

async fn run_ticker(state: AppState) {
    let mut interval = tokio::time::interval(state.config.tick_interval());
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        if let Err(e) = publish_tick(&state).await {
            warn!(error = %e, "tick failed");
        }
    }
}

/// Sample one tick and broadcast it. Returns the number of receivers reached.
pub(crate) async fn publish_tick(state: &AppState) -> anyhow::Result<usize> {
    let tick = state.sample().await?;
    state.latest_tx.send_replace(Some(tick.clone()));
    // No subscribers is not an error; the page may simply be closed.
    let receivers = state.tick_tx.send(tick).unwrap_or(0);
    debug!(receivers, "broadcast tick");
    Ok(receivers)
}
