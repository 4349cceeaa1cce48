#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Point
// =============================================================

#[test]
fn point_new_stores_coordinates() {
    let p = Point::new(3.0, -2.5);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, -2.5);
}

#[test]
fn point_default_is_origin() {
    let p = Point::default();
    assert_eq!(p, Point::new(0.0, 0.0));
}

#[test]
fn point_to_gives_displacement() {
    let a = Point::new(1.0, 2.0);
    let b = Point::new(4.0, 6.0);
    assert_eq!(a.to(b), Vec2::new(3.0, 4.0));
}

#[test]
fn point_to_self_is_zero() {
    let a = Point::new(7.0, 7.0);
    assert_eq!(a.to(a), Vec2::ZERO);
}

// =============================================================
// Vec2
// =============================================================

#[test]
fn vec2_zero_constant() {
    assert_eq!(Vec2::ZERO.x, 0.0);
    assert_eq!(Vec2::ZERO.y, 0.0);
}

#[test]
fn vec2_length_of_3_4_is_5() {
    assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
}

#[test]
fn vec2_length_is_sign_independent() {
    assert_eq!(Vec2::new(-3.0, 4.0).length(), 5.0);
    assert_eq!(Vec2::new(3.0, -4.0).length(), 5.0);
}

#[test]
fn vec2_length_of_zero_is_zero() {
    assert_eq!(Vec2::ZERO.length(), 0.0);
}
