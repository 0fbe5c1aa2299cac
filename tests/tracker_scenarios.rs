mod common;

use std::{sync::Arc, time::Duration};

use break_clock::{
    state::{AlarmPreset, CounterKind, CounterPhase},
    tasks::tick_driver_task,
    ticker::IntervalScheduler,
    tracker::{Outcome, TimeTracker, TrackerSettings},
    AppState,
};
use common::{harness, stored, CountingPlayer};

#[test]
fn break_runs_out_after_1500_ticks() {
    let h = harness(&[]);
    h.state.start(CounterKind::Break).unwrap();
    let event = h.scheduler.last();

    for _ in 0..1500 {
        assert_eq!(h.state.on_tick(event).unwrap(), Outcome::Applied);
    }

    let snapshot = h.state.snapshot().unwrap();
    assert_eq!(snapshot.break_time.remaining_seconds, 0);
    assert!(!snapshot.break_time.active);
    assert_eq!(snapshot.break_time.phase, CounterPhase::Expired);
    assert_eq!(h.scheduler.live(), 0);

    // Late ticks from a task that has not noticed the cancel yet
    assert_eq!(h.state.on_tick(event).unwrap(), Outcome::Ignored);
    assert_eq!(h.state.snapshot().unwrap().break_time.remaining_seconds, 0);
}

#[test]
fn starting_lunch_right_after_break() {
    let h = harness(&[("lunchTime", "2400")]);
    h.state.start(CounterKind::Break).unwrap();
    let (outcome, snapshot) = h.state.start(CounterKind::Lunch).unwrap();

    assert_eq!(outcome, Outcome::Applied);
    assert!(!snapshot.break_time.active);
    assert!(snapshot.lunch_time.active);
    assert_eq!(snapshot.lunch_time.remaining_seconds, 2400);
    assert_eq!(h.scheduler.live(), 1);
}

#[test]
fn reset_with_both_partially_used() {
    let h = harness(&[("breakTime", "200"), ("lunchTime", "500")]);
    h.state.start(CounterKind::Lunch).unwrap();
    h.state.start(CounterKind::Break).unwrap();

    let (_, snapshot) = h.state.reset().unwrap();

    assert!(!snapshot.break_time.active);
    assert!(!snapshot.lunch_time.active);
    assert_eq!(snapshot.break_time.remaining_seconds, 1500);
    assert_eq!(snapshot.lunch_time.remaining_seconds, 3600);
    assert_eq!(stored(&h.store, "breakTime").as_deref(), Some("1500"));
    assert_eq!(stored(&h.store, "lunchTime").as_deref(), Some("3600"));
}

#[test]
fn five_minute_alarm_plays_once() {
    let h = harness(&[]);
    h.state.arm_alarm(AlarmPreset::Five).unwrap();
    let event = h.scheduler.last();

    for _ in 0..310 {
        h.state.on_tick(event).unwrap();
    }

    let snapshot = h.state.snapshot().unwrap();
    assert_eq!(snapshot.alarm.remaining_seconds, 0);
    assert!(!snapshot.alarm.active);
    assert_eq!(h.player.plays(), 1);

    h.state.arm_alarm(AlarmPreset::Five).unwrap();
    let event = h.scheduler.last();
    for _ in 0..300 {
        h.state.on_tick(event).unwrap();
    }
    assert_eq!(h.player.plays(), 2);
}

#[test]
fn remaining_never_leaves_its_bounds() {
    let h = harness(&[("breakTime", "3"), ("lunchTime", "4")]);

    for kind in [CounterKind::Break, CounterKind::Lunch, CounterKind::Alarm] {
        if kind == CounterKind::Alarm {
            h.state.arm_alarm(AlarmPreset::Five).unwrap();
        } else {
            h.state.start(kind).unwrap();
        }
        let event = h.scheduler.last();
        let initial = h.state.snapshot().unwrap().counter(kind).initial_seconds;
        assert!(initial > 0);

        for _ in 0..initial + 5 {
            h.state.on_tick(event).unwrap();
            let snapshot = h.state.snapshot().unwrap();
            let counter = snapshot.counter(kind);
            assert_eq!(counter.initial_seconds, initial);
            assert!(counter.remaining_seconds <= counter.initial_seconds);
        }
        assert_eq!(h.state.snapshot().unwrap().counter(kind).remaining_seconds, 0);
    }
}

#[test]
fn shutdown_cancels_all_live_ticks() {
    let h = harness(&[]);
    h.state.start(CounterKind::Break).unwrap();
    h.state.arm_alarm(AlarmPreset::Ten).unwrap();
    assert_eq!(h.scheduler.live(), 2);

    h.state.shutdown().unwrap();
    assert_eq!(h.scheduler.live(), 0);

    let snapshot = h.state.snapshot().unwrap();
    assert!(!snapshot.break_time.active);
    assert!(!snapshot.alarm.active);
}

#[tokio::test(start_paused = true)]
async fn interval_ticks_drive_the_alarm_to_expiry() {
    let store = Arc::new(break_clock::storage::MemoryStore::new());
    let player = Arc::new(CountingPlayer::default());
    let (scheduler, ticks) = IntervalScheduler::new();
    let tracker = TimeTracker::restore(
        TrackerSettings::default(),
        store,
        player.clone(),
        Arc::new(scheduler),
    );
    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), tracker));
    tokio::spawn(tick_driver_task(Arc::clone(&state), ticks));

    let mut updates = state.subscribe().unwrap();
    state.arm_alarm(AlarmPreset::Five).unwrap();

    while updates.changed().await.is_ok() {
        if updates.borrow_and_update().alarm.phase == CounterPhase::Expired {
            break;
        }
    }

    assert_eq!(state.snapshot().unwrap().alarm.remaining_seconds, 0);
    assert_eq!(player.plays(), 1);

    // No orphaned ticks keep mutating state afterwards
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(player.plays(), 1);
}
