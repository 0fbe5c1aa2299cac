//! Break Clock - A local countdown server for break and lunch timers
//!
//! This is the main entry point for the break-clock application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use break_clock::{
    config::Config,
    server::serve_until,
    services::{check_player_available, AlarmPlayer, CommandPlayer, SilentPlayer},
    state::AppState,
    storage::{JsonFileStore, KeyValueStore, MemoryStore},
    tasks::{snapshot_logger_task, tick_driver_task},
    ticker::IntervalScheduler,
    tracker::TimeTracker,
    utils::shutdown_signal,
};

fn build_store(config: &Config) -> Arc<dyn KeyValueStore> {
    let Some(path) = config.store_path() else {
        info!("Using in-memory store, counters reset on exit");
        return Arc::new(MemoryStore::new());
    };

    match JsonFileStore::open(&path) {
        Ok(store) => {
            info!("Persisting counters to {}", store.path().display());
            Arc::new(store)
        }
        Err(e) => {
            warn!("Could not read {}: {}, starting from defaults", path.display(), e);
            Arc::new(JsonFileStore::empty(path))
        }
    }
}

async fn build_player(config: &Config) -> Arc<dyn AlarmPlayer> {
    if config.mute {
        return Arc::new(SilentPlayer);
    }

    match CommandPlayer::from_command_line(&config.player, config.sound.clone()) {
        Some(player) => {
            if let Err(e) = check_player_available(&player).await {
                warn!("{}; alarms will be silent until it is installed", e);
            }
            Arc::new(player)
        }
        None => {
            warn!("Empty player command, alarms will only be logged");
            Arc::new(SilentPlayer)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("break_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting break-clock server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, break={}min, lunch={}min",
        config.host, config.port, config.break_minutes, config.lunch_minutes
    );

    let store = build_store(&config);
    let player = build_player(&config).await;
    let (scheduler, ticks) = IntervalScheduler::new();
    let tracker = TimeTracker::restore(config.settings(), store, player, Arc::new(scheduler));

    let state = Arc::new(AppState::new(config.port, config.host.clone(), tracker));

    // Apply ticks and follow updates in the background
    tokio::spawn(tick_driver_task(Arc::clone(&state), ticks));
    match state.subscribe() {
        Ok(updates) => {
            tokio::spawn(snapshot_logger_task(updates));
        }
        Err(e) => warn!("Snapshot logger not started: {}", e),
    }

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /break/start     - Start break countdown (pauses lunch)");
    info!("  POST /break/pause     - Pause break countdown");
    info!("  POST /lunch/start     - Start lunch countdown (pauses break)");
    info!("  POST /lunch/pause     - Pause lunch countdown");
    info!("  POST /reset           - Reset break and lunch");
    info!("  POST /alarm/{{5,10,15}} - Arm a one-shot alarm");
    info!("  GET  /status          - Counters and server status");
    info!("  GET  /health          - Health check");

    serve_until(listener, state, shutdown_signal()).await;

    info!("Server shutdown complete");
    Ok(())
}
