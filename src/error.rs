//! Configuration-time errors.
//!
//! Only operations that wire new structure onto the stage (spawning, binding,
//! attaching a recognizer) are fallible — they fail when pointed at a
//! component that does not exist or has already been destroyed. Removal-type
//! operations are idempotent no-ops and never error.

use crate::component::ComponentId;

/// Error returned when wiring against a missing or destroyed component.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// The referenced component is not (or is no longer) part of the stage.
    #[error("unknown or destroyed component `{0}`")]
    UnknownComponent(ComponentId),
    /// A gesture recognizer was scoped to a target that cannot receive raw events.
    #[error("gesture target `{0}` is not a live component")]
    UnknownTarget(ComponentId),
}
