//! Snapshot logger background task

use tokio::sync::watch;
use tracing::{debug, info};

use crate::state::{CounterPhase, TrackerSnapshot};

/// Background task that follows tracker updates and logs them
pub async fn snapshot_logger_task(mut updates: watch::Receiver<TrackerSnapshot>) {
    info!("Starting snapshot logger task");

    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();
        debug!(
            break_time = %snapshot.break_time.display,
            break_active = snapshot.break_time.active,
            lunch_time = %snapshot.lunch_time.display,
            lunch_active = snapshot.lunch_time.active,
            alarm_time = %snapshot.alarm.display,
            alarm_running = (snapshot.alarm.phase == CounterPhase::Running),
            "Tracker updated"
        );
    }

    info!("Tracker dropped, snapshot logger stopped");
}
