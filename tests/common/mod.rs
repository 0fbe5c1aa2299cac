#![allow(dead_code)]
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use break_clock::{
    services::AlarmPlayer,
    state::AppState,
    storage::{KeyValueStore, MemoryStore},
    ticker::{TickEvent, TickGuard, TickScheduler},
    tracker::{TimeTracker, TrackerSettings},
};

/// Scheduler that records what was scheduled and how many ticks are live
#[derive(Default)]
pub struct RecordingScheduler {
    scheduled: Mutex<Vec<TickEvent>>,
    live: Arc<AtomicUsize>,
}

impl RecordingScheduler {
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn scheduled(&self) -> Vec<TickEvent> {
        self.scheduled.lock().unwrap().clone()
    }

    pub fn last(&self) -> TickEvent {
        *self.scheduled.lock().unwrap().last().expect("nothing scheduled")
    }
}

impl TickScheduler for RecordingScheduler {
    fn schedule(&self, event: TickEvent) -> TickGuard {
        self.scheduled.lock().unwrap().push(event);
        self.live.fetch_add(1, Ordering::SeqCst);
        let live = Arc::clone(&self.live);
        TickGuard::new(move || {
            live.fetch_sub(1, Ordering::SeqCst);
        })
    }
}

#[derive(Default)]
pub struct CountingPlayer {
    plays: AtomicUsize,
}

impl CountingPlayer {
    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

impl AlarmPlayer for CountingPlayer {
    fn play(&self) {
        self.plays.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct Engine {
    pub tracker: TimeTracker,
    pub store: Arc<MemoryStore>,
    pub scheduler: Arc<RecordingScheduler>,
    pub player: Arc<CountingPlayer>,
}

/// Bare tracker over an in-memory store seeded with `entries`
pub fn engine(entries: &[(&str, &str)]) -> Engine {
    let store = Arc::new(MemoryStore::new());
    for (key, value) in entries {
        store.set(key, value).unwrap();
    }
    let scheduler = Arc::new(RecordingScheduler::default());
    let player = Arc::new(CountingPlayer::default());

    let tracker = TimeTracker::restore(
        TrackerSettings::default(),
        store.clone(),
        player.clone(),
        scheduler.clone(),
    );

    Engine {
        tracker,
        store,
        scheduler,
        player,
    }
}

pub struct Harness {
    pub state: Arc<AppState>,
    pub store: Arc<MemoryStore>,
    pub scheduler: Arc<RecordingScheduler>,
    pub player: Arc<CountingPlayer>,
}

/// App state over an in-memory store seeded with `entries`
pub fn harness(entries: &[(&str, &str)]) -> Harness {
    let Engine {
        tracker,
        store,
        scheduler,
        player,
    } = engine(entries);
    let state = Arc::new(AppState::new(20554, "127.0.0.1".to_string(), tracker));

    Harness {
        state,
        store,
        scheduler,
        player,
    }
}

pub fn stored(store: &MemoryStore, key: &str) -> Option<String> {
    store.get(key).unwrap()
}
