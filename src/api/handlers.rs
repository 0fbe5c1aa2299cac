//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::Utc;
use tracing::{error, warn};

use super::responses::{ActionResponse, ApiError, HealthResponse, StatusResponse};
use crate::{
    state::{AlarmPreset, AppState, CounterKind, TrackerSnapshot},
    tracker::Outcome,
};

type ActionResult = Result<Json<ActionResponse>, ApiError>;

fn respond(
    result: Result<(Outcome, TrackerSnapshot), String>,
    applied: &str,
    ignored: &str,
) -> ActionResult {
    match result {
        Ok((outcome, counters)) => {
            let message = match outcome {
                Outcome::Applied => applied,
                Outcome::Ignored => ignored,
            };
            Ok(Json(ActionResponse::new(outcome, message.to_string(), counters)))
        }
        Err(e) => {
            error!("Failed to apply action: {}", e);
            Err(ApiError::Internal(e))
        }
    }
}

/// Handle POST /break/start - Start the break countdown, pausing lunch
pub async fn break_start_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    respond(
        state.start(CounterKind::Break),
        "Break countdown started",
        "Break countdown is already running or exhausted",
    )
}

/// Handle POST /break/pause - Pause the break countdown
pub async fn break_pause_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    respond(
        state.pause(CounterKind::Break),
        "Break countdown paused",
        "Break countdown is not running",
    )
}

/// Handle POST /lunch/start - Start the lunch countdown, pausing break
pub async fn lunch_start_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    respond(
        state.start(CounterKind::Lunch),
        "Lunch countdown started",
        "Lunch countdown is already running or exhausted",
    )
}

/// Handle POST /lunch/pause - Pause the lunch countdown
pub async fn lunch_pause_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    respond(
        state.pause(CounterKind::Lunch),
        "Lunch countdown paused",
        "Lunch countdown is not running",
    )
}

/// Handle POST /reset - Restore break and lunch to their baselines
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    respond(state.reset(), "Break and lunch countdowns reset", "Nothing to reset")
}

/// Handle POST /alarm/:minutes - Arm a 5, 10 or 15 minute alarm
pub async fn alarm_handler(
    State(state): State<Arc<AppState>>,
    Path(minutes): Path<u64>,
) -> ActionResult {
    let Some(preset) = AlarmPreset::from_minutes(minutes) else {
        warn!("Rejected alarm of {} minutes", minutes);
        return Err(ApiError::BadRequest(format!(
            "Unsupported alarm length: {} minutes (expected 5, 10 or 15)",
            minutes
        )));
    };

    respond(
        state.arm_alarm(preset),
        &format!("Alarm set for {} minutes", preset.minutes()),
        "Alarm could not be armed",
    )
}

/// Handle GET /status - Counters and server metadata
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let counters = state.snapshot()?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        counters,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Liveness probe
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        uptime: state.get_uptime(),
    })
}
