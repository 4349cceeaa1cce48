//! Event model: kinds, payloads, pointer samples, and the binding table.
//!
//! Every event on a stage is one of a closed set of kinds carrying one of a
//! closed set of payload shapes, so subscribers pattern-match instead of
//! probing an untyped bag. Bindings live on the bus of a *target* component
//! and are owned by the component that registered them; the two coincide for
//! a component listening to itself and differ for a component listening to
//! another's bus. [`BindingTable`] is the process-wide registry behind every
//! per-component bus.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::component::ComponentId;
use crate::geom::Point;
use crate::stage::Stage;

/// Unique identifier for one event binding.
pub type BindingId = Uuid;

/// The kind of an event delivered through a component bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A gesture began (pointer or touch went down).
    Start,
    /// The pointer moved; delivered whether or not a gesture is active.
    Move,
    /// The pointer moved while a gesture was active.
    Drag,
    /// A gesture ended (pointer lifted or the gesture was canceled).
    End,
    /// A gesture classified on release as short in both path and duration.
    Click,
    /// The stage viewport changed size.
    Resize,
    /// A loader advanced; carries the percentage complete.
    Progress,
    /// A multi-step operation (load, transition) finished.
    Complete,
}

/// One raw pointer/touch sample as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Horizontal position in CSS pixels, canvas-relative.
    pub x: f64,
    /// Vertical position in CSS pixels, canvas-relative.
    pub y: f64,
    /// The component the host's hit-test resolved under the pointer, if any.
    pub target: Option<ComponentId>,
}

impl PointerSample {
    /// Position of the sample as a [`Point`].
    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Payload carried by a fired event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventData {
    /// No payload.
    None,
    /// The raw pointer sample behind a gesture event.
    Pointer(PointerSample),
    /// New viewport dimensions in CSS pixels.
    Size {
        /// Viewport width.
        width: f64,
        /// Viewport height.
        height: f64,
    },
    /// Load progress in percent, `0.0..=100.0`.
    Progress {
        /// Percentage of tracked work completed.
        percent: f64,
    },
    /// Open-ended app-defined payload.
    Data(serde_json::Value),
}

/// Callback invoked when a bound event fires.
///
/// Callbacks receive the stage mutably so they can fire, bind, spawn, and
/// destroy from inside a delivery pass; the table snapshots handles before
/// each pass to keep that safe.
pub type EventCallback = Rc<RefCell<dyn FnMut(&mut Stage, &EventData)>>;

/// One (owner, target-bus, kind, callback) binding.
pub(crate) struct Binding {
    pub id: BindingId,
    /// Component that registered the binding and is responsible for it.
    pub owner: ComponentId,
    /// Component whose bus the binding listens on.
    pub target: ComponentId,
    pub kind: EventKind,
    pub callback: EventCallback,
}

/// Process-wide binding registry, ordered by registration.
pub(crate) struct BindingTable {
    entries: Vec<Binding>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Register a binding and return its id.
    pub fn add(
        &mut self,
        owner: ComponentId,
        target: ComponentId,
        kind: EventKind,
        callback: EventCallback,
    ) -> BindingId {
        let id = Uuid::new_v4();
        self.entries.push(Binding { id, owner, target, kind, callback });
        id
    }

    /// Remove a binding by id. Returns `false` if it was not present.
    pub fn remove(&mut self, id: BindingId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|b| b.id != id);
        self.entries.len() != before
    }

    /// Drop every binding the component owns and every binding on its bus.
    pub fn remove_for(&mut self, component: ComponentId) {
        self.entries.retain(|b| b.owner != component && b.target != component);
    }

    pub fn contains(&self, id: BindingId) -> bool {
        self.entries.iter().any(|b| b.id == id)
    }

    /// Snapshot the bindings a fire on `origin` would reach, in registration
    /// order. Cross-bindings (owner != origin) are included only when the
    /// fire bubbles.
    pub fn deliverable(
        &self,
        origin: ComponentId,
        kind: EventKind,
        bubble: bool,
    ) -> Vec<(BindingId, EventCallback)> {
        self.entries
            .iter()
            .filter(|b| b.target == origin && b.kind == kind)
            .filter(|b| bubble || b.owner == origin)
            .map(|b| (b.id, Rc::clone(&b.callback)))
            .collect()
    }

    /// Number of bindings owned by `component`.
    pub fn count_owned(&self, component: ComponentId) -> usize {
        self.entries.iter().filter(|b| b.owner == component).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
