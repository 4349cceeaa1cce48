//! Timed transitions sequenced on the frame scheduler.
//!
//! A transition is an ordinary component: it spawns under its caller,
//! advances with each frame's delta, holds through an optional delay, maps
//! elapsed time to progress in `[0, 1]`, and hands each frame's value to an
//! update callback. On completion it delivers a final `1.0`, fires
//! `Complete` on its own bus, and destroys itself — cancellation is plain
//! lifecycle teardown, so destroying the transition (or any ancestor)
//! mid-flight stops it with nothing left behind.
//!
//! Progress is linear by default; callers shape it with their own curve
//! function when they want non-linear motion.

#[cfg(test)]
#[path = "tween_test.rs"]
mod tween_test;

use crate::component::ComponentId;
use crate::error::StageError;
use crate::events::{EventData, EventKind};
use crate::stage::Stage;

/// Shaping function mapping linear progress to an output value.
pub type ShapeFn = Box<dyn Fn(f64) -> f64>;

/// Timing parameters for one transition.
pub struct TransitionSpec {
    /// Active duration in milliseconds. Zero completes on the first frame
    /// past the delay.
    pub duration_ms: f64,
    /// Milliseconds to hold before progress starts.
    pub delay_ms: f64,
    /// Optional progress shaping; `None` passes linear progress through.
    pub shape: Option<ShapeFn>,
}

impl TransitionSpec {
    #[must_use]
    pub fn new(duration_ms: f64) -> Self {
        Self { duration_ms, delay_ms: 0.0, shape: None }
    }

    #[must_use]
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_shape(mut self, shape: ShapeFn) -> Self {
        self.shape = Some(shape);
        self
    }
}

/// Start a transition owned by `owner`.
///
/// `on_update` runs once per frame after the delay with the shaped progress
/// value; the final invocation passes exactly `1.0`. Bind `Complete` against
/// the returned component to observe the finish; destroy it to cancel.
///
/// # Errors
///
/// Returns [`StageError::UnknownComponent`] when `owner` is not live.
pub fn run(
    stage: &mut Stage,
    owner: ComponentId,
    spec: TransitionSpec,
    mut on_update: impl FnMut(&mut Stage, f64) + 'static,
) -> Result<ComponentId, StageError> {
    let id = stage.spawn(owner)?;
    let mut elapsed = 0.0;
    stage.start_render(id, move |stage, frame| {
        elapsed += frame.delta;
        if elapsed < spec.delay_ms {
            return;
        }
        let progress = if spec.duration_ms <= 0.0 {
            1.0
        } else {
            ((elapsed - spec.delay_ms) / spec.duration_ms).clamp(0.0, 1.0)
        };
        let value = spec.shape.as_ref().map_or(progress, |shape| shape(progress));
        on_update(stage, value);
        if progress >= 1.0 {
            stage.fire(id, EventKind::Complete, EventData::None, true);
            stage.destroy(id);
        }
    })?;
    Ok(id)
}
