#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

fn callback() -> RenderCallback {
    Rc::new(RefCell::new(|_: &mut Stage, _: Frame| {}))
}

// =============================================================
// Registration
// =============================================================

#[test]
fn new_queue_is_empty() {
    let queue = RenderQueue::new();
    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);
}

#[test]
fn register_then_unregister_round_trips() {
    let mut queue = RenderQueue::new();
    let owner = Uuid::new_v4();
    let id = queue.register(owner, callback());
    assert!(queue.contains(id));
    assert!(queue.unregister(id));
    assert!(!queue.contains(id));
}

#[test]
fn unregister_of_unknown_id_is_false() {
    let mut queue = RenderQueue::new();
    assert!(!queue.unregister(Uuid::new_v4()));
}

#[test]
fn snapshot_preserves_registration_order() {
    let mut queue = RenderQueue::new();
    let owner = Uuid::new_v4();
    let a = queue.register(owner, callback());
    let b = queue.register(owner, callback());
    let c = queue.register(owner, callback());
    let ids: Vec<RenderId> = queue.snapshot().into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![a, b, c]);
}

#[test]
fn remove_owned_clears_only_that_owner() {
    let mut queue = RenderQueue::new();
    let doomed = Uuid::new_v4();
    let other = Uuid::new_v4();
    queue.register(doomed, callback());
    queue.register(doomed, callback());
    let kept = queue.register(other, callback());
    queue.remove_owned(doomed);
    assert_eq!(queue.len(), 1);
    assert!(queue.contains(kept));
    assert_eq!(queue.count_owned(doomed), 0);
    assert_eq!(queue.count_owned(other), 1);
}

// =============================================================
// Clock
// =============================================================

#[test]
fn clock_starts_at_zero() {
    let queue = RenderQueue::new();
    assert_eq!(queue.time(), 0.0);
    assert_eq!(queue.delta(), 0.0);
}

#[test]
fn first_tick_has_zero_delta() {
    let mut queue = RenderQueue::new();
    let frame = queue.begin_tick(16.0).unwrap();
    assert_eq!(frame.time, 16.0);
    assert_eq!(frame.delta, 0.0);
    queue.end_tick();
}

#[test]
fn subsequent_ticks_report_elapsed_delta() {
    let mut queue = RenderQueue::new();
    queue.begin_tick(100.0).unwrap();
    queue.end_tick();
    let frame = queue.begin_tick(116.5).unwrap();
    assert_eq!(frame.time, 116.5);
    assert_eq!(frame.delta, 16.5);
    queue.end_tick();
    assert_eq!(queue.time(), 116.5);
    assert_eq!(queue.delta(), 16.5);
}

#[test]
fn overlapping_tick_is_refused() {
    let mut queue = RenderQueue::new();
    assert!(queue.begin_tick(1.0).is_some());
    assert!(queue.begin_tick(2.0).is_none());
    queue.end_tick();
    assert!(queue.begin_tick(3.0).is_some());
    queue.end_tick();
}

#[test]
fn refused_tick_does_not_advance_clock() {
    let mut queue = RenderQueue::new();
    queue.begin_tick(10.0).unwrap();
    assert!(queue.begin_tick(99.0).is_none());
    assert_eq!(queue.time(), 10.0);
    queue.end_tick();
}
