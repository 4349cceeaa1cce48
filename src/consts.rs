//! Shared numeric constants for the stagekit crate.

// ── Gesture classification ──────────────────────────────────────

/// Maximum accumulated path length (CSS pixels) for a gesture to count as a click.
pub const CLICK_MAX_PATH: f64 = 20.0;

/// Maximum gesture duration in milliseconds for a gesture to count as a click.
pub const CLICK_MAX_DURATION_MS: f64 = 2000.0;

/// A release this long after the last move sample reports a zero delta,
/// so a gesture that paused before lifting does not carry a stale spike.
pub const STALE_MOVE_MS: f64 = 100.0;

// ── Timing ──────────────────────────────────────────────────────

/// Floor for the elapsed time between two pointer samples, in milliseconds.
/// Keeps velocity finite when samples share a timestamp.
pub const MIN_SAMPLE_DT_MS: f64 = 0.001;
