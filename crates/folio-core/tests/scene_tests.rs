// Scene function and raymarcher properties.

use folio_core::raymarch::{self, background, camera_position, centered_uv, march, ray_direction};
use folio_core::sdf::{self, branches, distance, gyroid, smin};
use folio_core::{RenderParameters, BLEND_OFFSET, MAX_DISTANCE, MAX_STEPS, SMOOTH_K};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_params(rng: &mut StdRng) -> RenderParameters {
    RenderParameters {
        scale: Vec3::new(
            rng.gen_range(0.0..10.0),
            rng.gen_range(0.0..10.0),
            rng.gen_range(0.0..10.0),
        ),
        distortion: rng.gen_range(0.0..2.0),
        creepiness: rng.gen_bool(0.5),
        rotation_enabled: true,
        camera_distance: rng.gen_range(1.2..6.0),
        rotation_amplitude: rng.gen_range(0.3..1.8),
        elapsed_time: rng.gen_range(-50.0..50.0),
        aspect_ratio: rng.gen_range(0.5..2.5),
        pointer_offset: Vec2::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5)),
    }
}

#[test]
fn distance_is_finite_and_marching_terminates() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..24 {
        let params = random_params(&mut rng);
        assert!(distance(Vec3::ZERO, &params).is_finite());
        for j in 0..5 {
            for i in 0..5 {
                let uv = Vec2::new(i as f32 / 4.0, j as f32 / 4.0);
                let dir = ray_direction(uv, &params);
                assert!(dir.is_finite());
                let m = march(camera_position(&params), dir, &params);
                assert!(m.steps <= MAX_STEPS);
                assert!(m.traveled.is_finite());
                assert!(m.position.is_finite());
                let c = raymarch::render_pixel(uv, &params);
                assert!(c.is_finite(), "colour {:?} for {:?}", c, params);
            }
        }
    }
}

#[test]
fn swapping_blend_branches_gives_the_same_union() {
    let mut rng = StdRng::seed_from_u64(7);
    let params = RenderParameters::default();
    for _ in 0..500 {
        let p = Vec3::new(
            rng.gen_range(-1.5..1.5),
            rng.gen_range(-1.5..1.5),
            rng.gen_range(-1.5..1.5),
        );
        let sphere = sdf::sd_sphere(p, 1.0);
        let g = gyroid(sdf::lattice_rotation(p, &params), &params);
        let a = smin(sphere, g, SMOOTH_K) + BLEND_OFFSET;
        let b = smin(sphere, -g, SMOOTH_K) + BLEND_OFFSET;
        let d = distance(p, &params);
        assert!((a.min(b) - d).abs() < 1e-6);
        assert!((b.min(a) - d).abs() < 1e-6);
        let (ba, bb) = branches(p, &params);
        assert!((bb.min(ba) - d).abs() < 1e-6);
    }
}

#[test]
fn centre_ray_hits_and_is_shaded() {
    let params = RenderParameters {
        scale: Vec3::splat(5.0),
        distortion: 0.0,
        creepiness: false,
        rotation_enabled: false,
        camera_distance: 3.5,
        rotation_amplitude: 0.3,
        elapsed_time: 0.0,
        aspect_ratio: 1.0,
        pointer_offset: Vec2::ZERO,
    };
    let uv = Vec2::splat(0.5);
    let dir = ray_direction(uv, &params);
    let m = march(camera_position(&params), dir, &params);
    assert!(m.is_hit());
    assert!(m.steps <= MAX_STEPS);
    assert!(m.traveled < MAX_DISTANCE);

    let colour = raymarch::render_pixel(uv, &params);
    let bg = background(centered_uv(uv, params.aspect_ratio));
    assert!((colour - bg).length() > 1e-3);
}

#[test]
fn creepiness_turns_the_gyroid_into_a_shell() {
    let mut params = RenderParameters::default();
    // sin(6x)cos(6x) = -0.5 on every axis
    let p = Vec3::splat(-std::f32::consts::PI / 24.0);
    let signed = gyroid(p, &params);
    params.creepiness = true;
    let shell = gyroid(p, &params);
    assert!(signed < -0.04);
    assert!(shell > 0.0);
    assert!((shell - (signed.abs() - 0.04)).abs() < 1e-6);
}

#[test]
fn scale_zero_stays_finite() {
    let params = RenderParameters {
        scale: Vec3::ZERO,
        ..Default::default()
    };
    assert!(distance(Vec3::new(0.3, -0.2, 0.1), &params).is_finite());
}
