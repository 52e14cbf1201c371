use crate::store::{ElementId, SharedStore};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

// ---------------------------------------------------------------------------
// Intents
// ---------------------------------------------------------------------------

/// A validated mutation request waiting for a batch flush.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Select { id: ElementId },
    Deselect { id: ElementId },
    Sort { order: Vec<ElementId> },
    Add { id: ElementId },
}

#[derive(Debug, Clone)]
struct QueuedIntent {
    intent: Intent,
    queued_at: DateTime<Utc>,
}

impl QueuedIntent {
    fn new(intent: Intent) -> Self {
        Self {
            intent,
            queued_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Lanes
// ---------------------------------------------------------------------------

/// Dedup key for the fast lane: one slot per id per direction, one global
/// slot for the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum FastKey {
    Select(ElementId),
    Deselect(ElementId),
    Sort,
}

/// Select/deselect/sort buffer. Last write wins per key; a select cancels a
/// queued deselect for the same id and vice versa. `arrival` preserves
/// first-submission order so a flush applies intents deterministically.
#[derive(Debug, Default)]
struct FastLane {
    entries: HashMap<FastKey, QueuedIntent>,
    arrival: Vec<FastKey>,
}

impl FastLane {
    fn push(&mut self, key: FastKey, cancels: Option<FastKey>, intent: Intent) {
        if let Some(opposite) = cancels {
            if self.entries.remove(&opposite).is_some() {
                self.arrival.retain(|k| *k != opposite);
            }
        }
        if self.entries.insert(key, QueuedIntent::new(intent)).is_none() {
            self.arrival.push(key);
        }
    }

    fn drain(&mut self) -> Vec<QueuedIntent> {
        let mut batch = Vec::with_capacity(self.entries.len());
        for key in self.arrival.drain(..) {
            if let Some(queued) = self.entries.remove(&key) {
                batch.push(queued);
            }
        }
        self.entries.clear();
        batch
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.arrival.clear();
    }
}

/// Add buffer, keyed by the id being added. First write wins: re-adding the
/// same id before a flush is dropped.
#[derive(Debug, Default)]
struct SlowLane {
    entries: HashMap<ElementId, QueuedIntent>,
    arrival: Vec<ElementId>,
}

impl SlowLane {
    fn push(&mut self, id: ElementId, intent: Intent) {
        if let std::collections::hash_map::Entry::Vacant(slot) = self.entries.entry(id) {
            slot.insert(QueuedIntent::new(intent));
            self.arrival.push(id);
        }
    }

    fn drain(&mut self) -> Vec<QueuedIntent> {
        let mut batch = Vec::with_capacity(self.entries.len());
        for id in self.arrival.drain(..) {
            if let Some(queued) = self.entries.remove(&id) {
                batch.push(queued);
            }
        }
        self.entries.clear();
        batch
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.arrival.clear();
    }
}

// ---------------------------------------------------------------------------
// BatchQueue
// ---------------------------------------------------------------------------

/// Flush cadences for the two lanes.
#[derive(Debug, Clone, Copy)]
pub struct QueueConfig {
    pub fast_interval: Duration,
    pub slow_interval: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            fast_interval: Duration::from_secs(1),
            slow_interval: Duration::from_secs(10),
        }
    }
}

/// Snapshot of pending intent counts, for observability only.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSizes {
    pub fast_lane_size: usize,
    pub slow_lane_size: usize,
}

/// Buffers mutation intents and drains them into the store on two
/// independent interval timers: a fast lane for select/deselect/sort and a
/// slow lane for catalog additions.
///
/// Construction starts both timers. [`BatchQueue::stop`] cancels them and
/// discards anything still queued — intents accepted after the last flush
/// are lost on shutdown.
pub struct BatchQueue {
    store: SharedStore,
    fast: Arc<Mutex<FastLane>>,
    slow: Arc<Mutex<SlowLane>>,
    timers: Vec<JoinHandle<()>>,
}

impl BatchQueue {
    pub fn new(store: SharedStore, config: QueueConfig) -> Self {
        let fast = Arc::new(Mutex::new(FastLane::default()));
        let slow = Arc::new(Mutex::new(SlowLane::default()));
        let mut timers = Vec::new();

        // Guard: only spawn if inside a Tokio runtime (skipped in sync unit
        // tests, where flushes are driven manually).
        if tokio::runtime::Handle::try_current().is_ok() {
            let store_fast = store.clone();
            let lane = fast.clone();
            let period = config.fast_interval;
            timers.push(tokio::spawn(async move {
                let mut ticker =
                    tokio::time::interval_at(tokio::time::Instant::now() + period, period);
                loop {
                    ticker.tick().await;
                    flush_fast_lane(&store_fast, &lane);
                }
            }));

            let store_slow = store.clone();
            let lane = slow.clone();
            let period = config.slow_interval;
            timers.push(tokio::spawn(async move {
                let mut ticker =
                    tokio::time::interval_at(tokio::time::Instant::now() + period, period);
                loop {
                    ticker.tick().await;
                    flush_slow_lane(&store_slow, &lane);
                }
            }));
        }

        Self {
            store,
            fast,
            slow,
            timers,
        }
    }

    /// Buffer an intent for the next flush of its lane.
    pub fn submit(&self, intent: Intent) {
        match intent {
            Intent::Add { id } => self.slow.lock().push(id, intent),
            Intent::Select { id } => {
                self.fast
                    .lock()
                    .push(FastKey::Select(id), Some(FastKey::Deselect(id)), intent)
            }
            Intent::Deselect { id } => {
                self.fast
                    .lock()
                    .push(FastKey::Deselect(id), Some(FastKey::Select(id)), intent)
            }
            Intent::Sort { .. } => self.fast.lock().push(FastKey::Sort, None, intent),
        }
    }

    /// Apply and clear the fast lane now, without waiting for its timer.
    pub fn flush_fast(&self) {
        flush_fast_lane(&self.store, &self.fast);
    }

    /// Apply and clear the slow lane now, without waiting for its timer.
    pub fn flush_slow(&self) {
        flush_slow_lane(&self.store, &self.slow);
    }

    pub fn queue_sizes(&self) -> QueueSizes {
        QueueSizes {
            fast_lane_size: self.fast.lock().len(),
            slow_lane_size: self.slow.lock().len(),
        }
    }

    /// Cancel both flush timers and discard queued-but-unflushed intents.
    /// A flush already past its lane drain runs to completion.
    pub fn stop(&self) {
        for timer in &self.timers {
            timer.abort();
        }
        self.fast.lock().clear();
        self.slow.lock().clear();
    }
}

impl Drop for BatchQueue {
    fn drop(&mut self) {
        for timer in &self.timers {
            timer.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// Flush
// ---------------------------------------------------------------------------

// Store operation results are discarded: an intent whose precondition no
// longer holds at flush time is a no-op, never an error.

fn flush_fast_lane(store: &SharedStore, lane: &Mutex<FastLane>) {
    let batch = lane.lock().drain();
    if batch.is_empty() {
        return;
    }

    let oldest = batch.iter().map(|q| q.queued_at).min();
    debug!(count = batch.len(), oldest = ?oldest, "flushing fast lane");

    let mut store = store.write();
    for queued in batch {
        match queued.intent {
            Intent::Select { id } => {
                let _ = store.select(id);
            }
            Intent::Deselect { id } => {
                let _ = store.deselect(id);
            }
            Intent::Sort { order } => {
                let _ = store.reorder(&order);
            }
            // Adds are routed to the slow lane in submit().
            Intent::Add { .. } => {}
        }
    }
}

fn flush_slow_lane(store: &SharedStore, lane: &Mutex<SlowLane>) {
    let batch = lane.lock().drain();
    if batch.is_empty() {
        return;
    }

    debug!(count = batch.len(), "flushing slow lane");

    let mut store = store.write();
    for queued in batch {
        if let Intent::Add { id } = queued.intent {
            if store.add(id) {
                debug!(id, "added element");
            } else {
                debug!(id, "element already exists, skipping");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
