//! Frame scheduling: the process-wide queue of per-frame callbacks.
//!
//! The host drives one strictly serial `tick` per display refresh; every
//! callback registered at the start of the pass observes the same
//! `(time, delta)` pair. Entries are tagged with their owning component so
//! lifecycle teardown can clear them without the owner keeping handles.
//!
//! Iteration safety: a tick pass works from a snapshot of the queue and
//! re-checks each entry's liveness immediately before invoking it, so a
//! callback that unregisters itself — or any other entry — mid-pass neither
//! skips unrelated entries nor gets re-invoked. The invocation loop itself
//! lives in [`crate::stage::Stage::tick`].

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;

use crate::component::ComponentId;
use crate::stage::Stage;

/// Unique identifier for one frame-callback registration.
pub type RenderId = Uuid;

/// Timing data passed to every frame callback within one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// The logical clock: the host timestamp of this tick, in milliseconds.
    pub time: f64,
    /// Wall-clock milliseconds elapsed since the previous tick; `0.0` on the first.
    pub delta: f64,
}

/// Callback invoked once per tick while registered.
pub type RenderCallback = Rc<RefCell<dyn FnMut(&mut Stage, Frame)>>;

struct RenderEntry {
    id: RenderId,
    owner: ComponentId,
    callback: RenderCallback,
}

/// Ordered set of registered frame callbacks plus the logical clock.
pub(crate) struct RenderQueue {
    entries: Vec<RenderEntry>,
    time: f64,
    delta: f64,
    prev: Option<f64>,
    ticking: bool,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self { entries: Vec::new(), time: 0.0, delta: 0.0, prev: None, ticking: false }
    }

    /// Register a callback for `owner`; invoked in registration order.
    pub fn register(&mut self, owner: ComponentId, callback: RenderCallback) -> RenderId {
        let id = Uuid::new_v4();
        self.entries.push(RenderEntry { id, owner, callback });
        id
    }

    /// Unregister by id. Returns `false` if the id was not present.
    pub fn unregister(&mut self, id: RenderId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Drop every registration owned by `owner`.
    pub fn remove_owned(&mut self, owner: ComponentId) {
        self.entries.retain(|e| e.owner != owner);
    }

    pub fn contains(&self, id: RenderId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Snapshot the current queue for one tick pass.
    pub fn snapshot(&self) -> Vec<(RenderId, RenderCallback)> {
        self.entries.iter().map(|e| (e.id, Rc::clone(&e.callback))).collect()
    }

    /// Begin a tick: advance the clock and return the pass's frame data.
    ///
    /// Returns `None` if a tick is already in progress — ticks never overlap,
    /// so a re-entrant call is dropped rather than nested.
    pub fn begin_tick(&mut self, now: f64) -> Option<Frame> {
        if self.ticking {
            return None;
        }
        self.ticking = true;
        self.delta = self.prev.map_or(0.0, |prev| now - prev);
        self.prev = Some(now);
        self.time = now;
        Some(Frame { time: self.time, delta: self.delta })
    }

    /// End the tick begun by the matching [`RenderQueue::begin_tick`].
    pub fn end_tick(&mut self) {
        self.ticking = false;
    }

    /// The logical clock: timestamp of the most recent tick, `0.0` before any.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Delta of the most recent tick.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Number of registrations owned by `owner`.
    pub fn count_owned(&self, owner: ComponentId) -> usize {
        self.entries.iter().filter(|e| e.owner == owner).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
