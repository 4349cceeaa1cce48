//! The stage: one explicitly constructed runtime context per application.
//!
//! `Stage` owns everything process-wide — the component tree, the binding
//! table behind every per-component bus, the frame queue, attached gesture
//! recognizers, loader progress, and the queue of scene resources awaiting
//! host release. There are no statics: the host constructs a stage, drives
//! it (`tick`, the `pointer_*` methods, `resize`), and drains what it owes
//! back (`drain_released_scenes`).
//!
//! All callbacks receive `&mut Stage`, so handlers can fire, bind, spawn,
//! and destroy re-entrantly. Every delivery pass (tick or fire) snapshots
//! the relevant entries first and re-checks liveness immediately before each
//! invocation: removal during a pass never skips unrelated entries and a
//! removed entry is never invoked again within the pass.

#[cfg(test)]
#[path = "stage_test.rs"]
mod stage_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::assets::{AssetCatalog, LoaderState};
use crate::component::{ComponentId, ComponentTree, SceneHandle};
use crate::error::StageError;
use crate::events::{BindingId, BindingTable, EventData, EventKind, PointerSample};
use crate::interaction::{Gesture, Recognizer};
use crate::render::{Frame, RenderId, RenderQueue};

/// Application-wide runtime: lifecycle tree, event buses, frame scheduling,
/// and pointer fan-out.
pub struct Stage {
    components: ComponentTree,
    bindings: BindingTable,
    render: RenderQueue,
    /// Attached recognizers in attach order; raw samples fan out to all of them.
    recognizers: Vec<Recognizer>,
    loaders: HashMap<ComponentId, LoaderState>,
    released_scenes: Vec<SceneHandle>,
    root: ComponentId,
    width: f64,
    height: f64,
    /// Host-loaded asset storage and path resolution.
    pub assets: AssetCatalog,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage {
    /// Create a stage with a fresh root component.
    #[must_use]
    pub fn new() -> Self {
        let mut components = ComponentTree::new();
        let root = components.insert_root();
        Self {
            components,
            bindings: BindingTable::new(),
            render: RenderQueue::new(),
            recognizers: Vec::new(),
            loaders: HashMap::new(),
            released_scenes: Vec::new(),
            root,
            width: 0.0,
            height: 0.0,
            assets: AssetCatalog::new(),
        }
    }

    // --- Lifecycle ---

    /// The root component; destroyed only with the stage itself.
    #[must_use]
    pub fn root(&self) -> ComponentId {
        self.root
    }

    /// Create a child component under `parent`, which becomes its sole owner.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::UnknownComponent`] when `parent` is not live.
    pub fn spawn(&mut self, parent: ComponentId) -> Result<ComponentId, StageError> {
        self.components.spawn(parent).ok_or(StageError::UnknownComponent(parent))
    }

    /// Destroy a component and everything it owns.
    ///
    /// Teardown order per node: its frame registrations, then its children
    /// depth-first in reverse creation order, then every binding it owns or
    /// that targets its bus, then its scene handle (queued for the host).
    /// Destroying a stale id is a logged no-op, so a cascaded destroy racing
    /// a direct one is harmless.
    pub fn destroy(&mut self, id: ComponentId) {
        if !self.components.contains(id) {
            log::debug!("destroy of unknown component {id} ignored");
            return;
        }
        if let Some(parent) = self.components.parent_of(id) {
            self.components.detach_child(parent, id);
        }
        self.destroy_subtree(id);
    }

    fn destroy_subtree(&mut self, id: ComponentId) {
        self.render.remove_owned(id);
        for child in self.components.take_children(id).into_iter().rev() {
            self.destroy_subtree(child);
        }
        self.bindings.remove_for(id);
        self.recognizers.retain(|r| r.component != id);
        self.loaders.remove(&id);
        if let Some(node) = self.components.remove(id) {
            if let Some(handle) = node.scene {
                self.released_scenes.push(handle);
            }
        }
    }

    /// Attach a host scene resource to a live component; the component's
    /// destruction queues the handle for release. No-op on stale ids.
    pub fn set_scene_handle(&mut self, id: ComponentId, handle: SceneHandle) {
        if !self.components.set_scene(id, handle) {
            log::debug!("scene handle for unknown component {id} dropped");
        }
    }

    /// Scene handles released by destroyed components since the last drain.
    /// The host disposes these; order follows destruction order.
    pub fn drain_released_scenes(&mut self) -> Vec<SceneHandle> {
        std::mem::take(&mut self.released_scenes)
    }

    /// Whether `id` is a live component.
    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains(id)
    }

    /// Children of `id` in creation order.
    #[must_use]
    pub fn children_of(&self, id: ComponentId) -> &[ComponentId] {
        self.components.children_of(id)
    }

    // --- Event bus ---

    /// Bind a callback on `owner`'s own bus: it receives every `kind` event
    /// `owner` fires, bubbling or not.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::UnknownComponent`] when `owner` is not live.
    pub fn on(
        &mut self,
        owner: ComponentId,
        kind: EventKind,
        callback: impl FnMut(&mut Stage, &EventData) + 'static,
    ) -> Result<BindingId, StageError> {
        self.on_target(owner, owner, kind, callback)
    }

    /// Bind a callback owned by `owner` on `target`'s bus: it receives
    /// `kind` events `target` fires with bubbling enabled. The binding is
    /// released when either component is destroyed.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::UnknownComponent`] when `owner` or `target` is
    /// not live.
    pub fn on_target(
        &mut self,
        owner: ComponentId,
        target: ComponentId,
        kind: EventKind,
        callback: impl FnMut(&mut Stage, &EventData) + 'static,
    ) -> Result<BindingId, StageError> {
        if !self.components.contains(owner) {
            return Err(StageError::UnknownComponent(owner));
        }
        if !self.components.contains(target) {
            return Err(StageError::UnknownComponent(target));
        }
        Ok(self.bindings.add(owner, target, kind, Rc::new(RefCell::new(callback))))
    }

    /// Release one binding. Removing a binding that no longer exists is a no-op.
    pub fn off(&mut self, id: BindingId) {
        if !self.bindings.remove(id) {
            log::debug!("off for unknown binding {id} ignored");
        }
    }

    /// Fire an event on `origin`'s bus, synchronously, in registration order.
    ///
    /// Bindings `origin` registered on itself always receive the event;
    /// bindings other components registered against `origin` receive it only
    /// when `bubble` is true. Firing with no listeners, or from a stale
    /// origin, is a no-op.
    pub fn fire(&mut self, origin: ComponentId, kind: EventKind, data: EventData, bubble: bool) {
        if !self.components.contains(origin) {
            log::debug!("fire {kind:?} from unknown component {origin} dropped");
            return;
        }
        let pass = self.bindings.deliverable(origin, kind, bubble);
        for (id, callback) in pass {
            if !self.bindings.contains(id) {
                continue;
            }
            // A binding whose callback is already on the call stack would
            // recurse unboundedly; skip that one delivery instead.
            let Ok(mut callback) = callback.try_borrow_mut() else {
                log::warn!("re-entrant delivery of binding {id} skipped");
                continue;
            };
            (*callback)(self, &data);
        }
    }

    /// Number of live bindings across all buses.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Number of live bindings owned by `id`.
    #[must_use]
    pub fn bindings_owned_by(&self, id: ComponentId) -> usize {
        self.bindings.count_owned(id)
    }

    // --- Frame scheduling ---

    /// Register a frame callback for `owner`, invoked once per tick in
    /// registration order until stopped or `owner` is destroyed.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::UnknownComponent`] when `owner` is not live.
    pub fn start_render(
        &mut self,
        owner: ComponentId,
        callback: impl FnMut(&mut Stage, Frame) + 'static,
    ) -> Result<RenderId, StageError> {
        if !self.components.contains(owner) {
            return Err(StageError::UnknownComponent(owner));
        }
        Ok(self.render.register(owner, Rc::new(RefCell::new(callback))))
    }

    /// Unregister a frame callback. Stopping an unknown registration is a no-op.
    pub fn stop_render(&mut self, id: RenderId) {
        if !self.render.unregister(id) {
            log::debug!("stop_render for unknown registration {id} ignored");
        }
    }

    /// Advance the logical clock and run one frame pass.
    ///
    /// Every callback still registered when its turn comes observes the same
    /// `(time, delta)`; one that unregistered earlier in the pass — by its
    /// own hand or another's — is skipped. Ticks are strictly serial; a
    /// re-entrant call is dropped with a warning.
    pub fn tick(&mut self, now: f64) {
        let Some(frame) = self.render.begin_tick(now) else {
            log::warn!("overlapping tick at {now} dropped");
            return;
        };
        let pass = self.render.snapshot();
        for (id, callback) in pass {
            if !self.render.contains(id) {
                continue;
            }
            let Ok(mut callback) = callback.try_borrow_mut() else {
                log::warn!("re-entrant delivery of frame callback {id} skipped");
                continue;
            };
            (*callback)(self, frame);
        }
        self.render.end_tick();
    }

    /// The logical clock: timestamp of the most recent tick, `0.0` before any.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.render.time()
    }

    /// Milliseconds elapsed between the two most recent ticks.
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.render.delta()
    }

    /// Number of live frame registrations.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.render.len()
    }

    /// Number of live frame registrations owned by `id`.
    #[must_use]
    pub fn renders_owned_by(&self, id: ComponentId) -> usize {
        self.render.count_owned(id)
    }

    // --- Gesture recognition ---

    /// Spawn a component with a gesture recognizer attached.
    ///
    /// With `target` set, only samples whose hit-test resolved to that
    /// component begin a gesture; move and release samples come from the
    /// global stream either way, so a drag may end outside the target. The
    /// recognizer fires `Start`/`Move`/`Drag`/`End`/`Click` on its own bus,
    /// bubbling, each carrying the raw sample.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::UnknownTarget`] when `target` is not live and
    /// [`StageError::UnknownComponent`] when `parent` is not live.
    pub fn spawn_recognizer(
        &mut self,
        parent: ComponentId,
        target: Option<ComponentId>,
    ) -> Result<ComponentId, StageError> {
        if let Some(target) = target {
            if !self.components.contains(target) {
                return Err(StageError::UnknownTarget(target));
            }
        }
        let id = self.spawn(parent)?;
        self.recognizers.push(Recognizer { component: id, target, gesture: Gesture::new() });
        Ok(id)
    }

    /// Gesture state of a recognizer component, if `id` is one.
    #[must_use]
    pub fn gesture(&self, id: ComponentId) -> Option<&Gesture> {
        self.recognizers.iter().find(|r| r.component == id).map(|r| &r.gesture)
    }

    /// Fan a pointer-down sample out to every attached recognizer.
    ///
    /// Recognizers scoped to a target only begin when the sample hit that
    /// target. Timing is read from the logical clock, so the host should
    /// tick before delivering same-frame pointer events.
    pub fn pointer_down(&mut self, sample: PointerSample) {
        let now = self.render.time();
        for id in self.recognizer_ids() {
            let Some(recognizer) = self.recognizer_mut(id) else {
                continue;
            };
            if let Some(target) = recognizer.target {
                if sample.target != Some(target) {
                    continue;
                }
            }
            recognizer.gesture.begin(sample.point(), now);
            self.fire(id, EventKind::Start, EventData::Pointer(sample), true);
        }
    }

    /// Fan a pointer-move sample out to every attached recognizer.
    ///
    /// Moves are processed whether or not a gesture is active (hover
    /// tracking); `Drag` fires only for recognizers mid-gesture.
    pub fn pointer_move(&mut self, sample: PointerSample) {
        let now = self.render.time();
        for id in self.recognizer_ids() {
            let Some(recognizer) = self.recognizer_mut(id) else {
                continue;
            };
            let dragging = recognizer.gesture.sample(sample.point(), now);
            self.fire(id, EventKind::Move, EventData::Pointer(sample), true);
            if dragging {
                self.fire(id, EventKind::Drag, EventData::Pointer(sample), true);
            }
        }
    }

    /// Fan a pointer-up sample out to every attached recognizer, ending any
    /// active gesture and classifying clicks.
    pub fn pointer_up(&mut self, sample: PointerSample) {
        let now = self.render.time();
        for id in self.recognizer_ids() {
            let Some(recognizer) = self.recognizer_mut(id) else {
                continue;
            };
            let Some(release) = recognizer.gesture.release(now) else {
                continue;
            };
            self.fire(id, EventKind::End, EventData::Pointer(sample), true);
            if release.click {
                self.fire(id, EventKind::Click, EventData::Pointer(sample), true);
            }
        }
    }

    /// A canceled pointer ends its gesture exactly like a lift.
    pub fn pointer_cancel(&mut self, sample: PointerSample) {
        self.pointer_up(sample);
    }

    fn recognizer_ids(&self) -> Vec<ComponentId> {
        self.recognizers.iter().map(|r| r.component).collect()
    }

    fn recognizer_mut(&mut self, id: ComponentId) -> Option<&mut Recognizer> {
        self.recognizers.iter_mut().find(|r| r.component == id)
    }

    // --- Viewport ---

    /// Record the new viewport size and fire `Resize` on the root bus,
    /// bubbling, so any component bound against the root observes it.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        let root = self.root;
        self.fire(root, EventKind::Resize, EventData::Size { width, height }, true);
    }

    /// Current viewport width in CSS pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Current viewport height in CSS pixels.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    // --- Asset loading ---

    /// Spawn a loader component tracking `paths`.
    ///
    /// The host reports each completed fetch via [`Stage::asset_loaded`];
    /// the loader fires `Progress` per report and `Complete` once all paths
    /// have reported. A loader with no paths never reports.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::UnknownComponent`] when `parent` is not live.
    pub fn spawn_loader(
        &mut self,
        parent: ComponentId,
        paths: Vec<String>,
    ) -> Result<ComponentId, StageError> {
        let id = self.spawn(parent)?;
        self.loaders.insert(id, LoaderState::new(paths));
        Ok(id)
    }

    /// Report one completed fetch (success or failure — both count) to a
    /// loader. Unknown loaders, unknown paths, and duplicate reports are
    /// no-ops.
    pub fn asset_loaded(&mut self, loader: ComponentId, path: &str) {
        let Some(state) = self.loaders.get_mut(&loader) else {
            log::debug!("asset report for unknown loader {loader} ignored");
            return;
        };
        let Some(percent) = state.mark_loaded(path) else {
            return;
        };
        let complete = state.is_complete();
        self.fire(loader, EventKind::Progress, EventData::Progress { percent }, true);
        if complete {
            self.fire(loader, EventKind::Complete, EventData::None, true);
        }
    }

    /// Number of live components, including the root.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}
