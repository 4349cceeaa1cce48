//! Web boundary: translates browser events and clocks into stage calls.
//!
//! This module is the only place that touches `web-sys`. The embedding app
//! owns the DOM wiring — it installs the pointer listeners and the
//! animation-frame loop and forwards everything here; the crate never
//! registers listeners itself. Everything below the translation layer is
//! host-agnostic and runs natively under test.

use web_sys::{HtmlCanvasElement, PointerEvent};

use crate::component::ComponentId;
use crate::events::PointerSample;
use crate::stage::Stage;

/// A stage bound to a browser canvas element.
pub struct WebStage {
    canvas: HtmlCanvasElement,
    /// The underlying runtime; everything not event-shaped goes through here.
    pub stage: Stage,
}

impl WebStage {
    /// Bind a fresh stage to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, stage: Stage::new() }
    }

    /// One animation-frame callback; `now_ms` is the frame timestamp the
    /// browser handed to the RAF callback.
    pub fn on_frame(&mut self, now_ms: f64) {
        self.stage.tick(now_ms);
    }

    /// Forward a `pointerdown`. `hit` is the component the app's hit-test
    /// resolved under the event, if any.
    pub fn on_pointer_down(&mut self, event: &PointerEvent, hit: Option<ComponentId>) {
        self.stage.pointer_down(sample(event, hit));
    }

    /// Forward a `pointermove`.
    pub fn on_pointer_move(&mut self, event: &PointerEvent, hit: Option<ComponentId>) {
        self.stage.pointer_move(sample(event, hit));
    }

    /// Forward a `pointerup`.
    pub fn on_pointer_up(&mut self, event: &PointerEvent, hit: Option<ComponentId>) {
        self.stage.pointer_up(sample(event, hit));
    }

    /// Forward a `pointercancel`; delivered as an end.
    pub fn on_pointer_cancel(&mut self, event: &PointerEvent, hit: Option<ComponentId>) {
        self.stage.pointer_cancel(sample(event, hit));
    }

    /// Propagate the canvas element's current CSS size into the stage,
    /// firing `Resize` on the root bus.
    pub fn resize_to_canvas(&mut self) {
        let width = f64::from(self.canvas.client_width());
        let height = f64::from(self.canvas.client_height());
        self.stage.resize(width, height);
    }

    /// The bound canvas element.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

/// Translate a DOM pointer event into a canvas-relative sample.
fn sample(event: &PointerEvent, hit: Option<ComponentId>) -> PointerSample {
    PointerSample { x: f64::from(event.offset_x()), y: f64::from(event.offset_y()), target: hit }
}

/// Monotonic milliseconds from the page's performance clock, falling back to
/// the wall clock where `performance` is unavailable.
#[must_use]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map_or_else(js_sys::Date::now, |performance| performance.now())
}
