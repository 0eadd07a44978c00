// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn pointer_centre_is_origin() {
    let p = pointer_ndc(640.0, 360.0, 1280.0, 720.0);
    assert!(p.length() < 1e-6);
}

#[test]
fn pointer_corners_map_to_unit_square_y_up() {
    assert_eq!(pointer_ndc(0.0, 0.0, 1280.0, 720.0), Vec2::new(-1.0, 1.0));
    assert_eq!(pointer_ndc(1280.0, 720.0, 1280.0, 720.0), Vec2::new(1.0, -1.0));
}

#[test]
fn pointer_outside_viewport_is_clamped() {
    let p = pointer_ndc(-50.0, 2000.0, 1280.0, 720.0);
    assert_eq!(p, Vec2::new(-1.0, -1.0));
}

#[test]
fn pointer_on_empty_viewport_is_centred() {
    assert_eq!(pointer_ndc(10.0, 10.0, 0.0, 720.0), Vec2::ZERO);
}

#[test]
fn mobile_dpr_is_capped() {
    assert_eq!(effective_dpr(3.0, true, 1.5), 1.5);
    assert_eq!(effective_dpr(1.0, true, 1.5), 1.0);
    assert_eq!(effective_dpr(3.0, false, 1.5), 3.0);
}

#[test]
fn bogus_dpr_falls_back_to_one() {
    assert_eq!(effective_dpr(0.0, false, 1.5), 1.0);
    assert_eq!(effective_dpr(f64::NAN, true, 1.5), 1.0);
}

#[test]
fn backing_size_scales_and_never_hits_zero() {
    assert_eq!(backing_size(800.0, 600.0, 1.5), (1200, 900));
    assert_eq!(backing_size(0.0, 0.0, 2.0), (1, 1));
}

#[test]
fn capped_ratio_matches_backing_store() {
    // a 3x phone renders at the cap, and the viewport reports that same ratio
    let dpr = effective_dpr(3.0, true, 1.5);
    let (w, h) = backing_size(400.0, 300.0, dpr);
    assert_eq!((w, h), (600, 450));
    assert_eq!(w as f64 / 400.0, dpr);
}
