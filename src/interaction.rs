//! Gesture recognition: the pure state machine behind pointer interaction.
//!
//! [`Gesture`] tracks one pointer through an idle → active → idle cycle and
//! derives displacement, velocity, and the click classification from raw
//! samples. It is deliberately free of any bus or scheduler coupling so the
//! numeric behavior is testable in isolation; [`crate::stage::Stage`] owns
//! the fan-out of raw samples to attached recognizers and fires the
//! resulting events on each recognizer's bus.
//!
//! Timing quirks are part of the contract:
//! - elapsed time between samples is floored at
//!   [`crate::consts::MIN_SAMPLE_DT_MS`], so two samples sharing a timestamp
//!   yield a finite velocity;
//! - a release more than [`crate::consts::STALE_MOVE_MS`] after the last
//!   move reports a zero `delta`, but `velocity` keeps its last value — the
//!   two fields decay independently.

#[cfg(test)]
#[path = "interaction_test.rs"]
mod interaction_test;

use crate::component::ComponentId;
use crate::consts::{CLICK_MAX_DURATION_MS, CLICK_MAX_PATH, MIN_SAMPLE_DT_MS, STALE_MOVE_MS};
use crate::geom::{Point, Vec2};

/// State of one tracked pointer gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    /// Most recent pointer position, updated on every sample.
    pub position: Point,
    /// Position recorded when the active gesture began.
    pub hold: Point,
    /// Position of the previous sample.
    pub last: Point,
    /// Displacement since the previous sample.
    pub delta: Vec2,
    /// Displacement since `hold`; the zero vector whenever not touching.
    pub travel: Vec2,
    /// Per-axis speed magnitude in pixels per millisecond; never negative,
    /// NaN, or infinite.
    pub velocity: Vec2,
    /// `true` strictly between a start sample and its matching release.
    pub touching: bool,
    path_len: f64,
    time_down: f64,
    time_move: f64,
}

impl Default for Gesture {
    fn default() -> Self {
        Self {
            position: Point::default(),
            hold: Point::default(),
            last: Point::default(),
            delta: Vec2::ZERO,
            travel: Vec2::ZERO,
            velocity: Vec2::ZERO,
            touching: false,
            path_len: 0.0,
            time_down: 0.0,
            time_move: 0.0,
        }
    }
}

/// Classification of a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Release {
    /// The gesture stayed under both click thresholds.
    pub click: bool,
}

impl Gesture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin an active gesture at `at`, with `now` taken from the logical clock.
    pub fn begin(&mut self, at: Point, now: f64) {
        self.touching = true;
        self.position = at;
        self.hold = at;
        self.last = at;
        self.delta = Vec2::ZERO;
        self.travel = Vec2::ZERO;
        self.velocity = Vec2::ZERO;
        self.path_len = 0.0;
        self.time_down = now;
        self.time_move = now;
    }

    /// Feed a move sample.
    ///
    /// Position, `delta`, and `velocity` update whether or not a gesture is
    /// active (hover tracking); `travel` only advances while touching.
    /// Returns `true` when the sample lands inside an active gesture.
    pub fn sample(&mut self, at: Point, now: f64) -> bool {
        if self.touching {
            self.travel = self.hold.to(at);
        }
        self.delta = self.last.to(at);
        self.position = at;
        self.last = at;
        self.path_len += self.delta.length();
        let elapsed = (now - self.time_move).max(MIN_SAMPLE_DT_MS);
        self.time_move = now;
        self.velocity = Vec2::new(self.delta.x.abs() / elapsed, self.delta.y.abs() / elapsed);
        self.touching
    }

    /// End the active gesture, classifying it.
    ///
    /// Returns `None` when no gesture was active (a stray release). A release
    /// staler than the stale-move window snaps `delta` to zero.
    pub fn release(&mut self, now: f64) -> Option<Release> {
        if !self.touching {
            return None;
        }
        self.touching = false;
        self.travel = Vec2::ZERO;
        let idle = (now - self.time_move).max(MIN_SAMPLE_DT_MS);
        if idle > STALE_MOVE_MS {
            self.delta = Vec2::ZERO;
        }
        let click = self.path_len < CLICK_MAX_PATH && now - self.time_down < CLICK_MAX_DURATION_MS;
        Some(Release { click })
    }

    /// Accumulated path length since the gesture began.
    #[must_use]
    pub fn path_len(&self) -> f64 {
        self.path_len
    }
}

/// One recognizer attached to the stage: a gesture plus its component identity
/// and optional start-scoping target.
pub(crate) struct Recognizer {
    /// The component whose bus emits this recognizer's gesture events.
    pub component: ComponentId,
    /// When set, only samples hit-testing to this component begin a gesture;
    /// move and release samples are taken from the global stream regardless.
    pub target: Option<ComponentId>,
    pub gesture: Gesture,
}
