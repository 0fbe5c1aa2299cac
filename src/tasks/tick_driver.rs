//! Tick driver background task

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{state::AppState, ticker::TickEvent, tracker::Outcome};

/// Background task that applies scheduled ticks to the tracker
pub async fn tick_driver_task(state: Arc<AppState>, mut ticks: mpsc::UnboundedReceiver<TickEvent>) {
    info!("Starting tick driver task");

    while let Some(event) = ticks.recv().await {
        match state.on_tick(event) {
            Ok(Outcome::Applied) => {}
            Ok(Outcome::Ignored) => {
                debug!("Tick for {} run {} had no effect", event.kind, event.run);
            }
            Err(e) => error!("Failed to apply {} tick: {}", event.kind, e),
        }
    }

    info!("Tick channel closed, tick driver stopped");
}
