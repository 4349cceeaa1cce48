//! Component runtime for browser-based interactive graphics demos.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but its
//! core is host-agnostic and tested natively. It owns the structural side of
//! an interactive scene: a component lifecycle tree with exact teardown, a
//! typed publish/subscribe bus scoped per component, one shared frame
//! scheduler delivering per-tick timing, and gesture recognition that turns
//! raw pointer samples into start/move/drag/end/click events with velocity
//! and travel derivation. It renders nothing itself — the host draws, and
//! owns the DOM wiring and the animation-frame loop.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`stage`] | The runtime context: tree + buses + scheduler + pointer fan-out |
//! | [`component`] | Ownership tree, component ids, scene resource handles |
//! | [`events`] | Event kinds, typed payloads, pointer samples, binding table |
//! | [`render`] | Frame queue and the logical clock |
//! | [`interaction`] | Pure gesture state machine and recognizer records |
//! | [`tween`] | Timed transitions sequenced on the frame loop |
//! | [`assets`] | Asset catalog and loader progress tracking |
//! | [`geom`] | Points and displacement vectors |
//! | [`consts`] | Gesture policy constants (click/staleness thresholds) |
//! | [`error`] | Configuration-time errors |
//! | [`host`] | Web boundary — the only module touching `web-sys` |

pub mod assets;
pub mod component;
pub mod consts;
pub mod error;
pub mod events;
pub mod geom;
pub mod host;
pub mod interaction;
pub mod render;
pub mod stage;
pub mod tween;
