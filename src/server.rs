//! Serve the control surface until shutdown, then stop every countdown

use std::{future::Future, io, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{api::create_router, state::AppState};

/// Serve on `listener` until the server fails or `shutdown` resolves.
///
/// The tracker is shut down on every exit path, including a shutdown future
/// that fails (e.g. signal handlers could not be registered).
pub async fn serve_until<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F)
where
    F: Future<Output = io::Result<i32>>,
{
    let server = axum::serve(listener, create_router(Arc::clone(&state)));

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        signal = shutdown => match signal {
            Ok(_) => info!("Shutdown signal received"),
            Err(e) => error!("Signal handling failed, shutting down: {}", e),
        }
    }

    if let Err(e) = state.shutdown() {
        error!("Failed to stop countdowns: {}", e);
    }
}
