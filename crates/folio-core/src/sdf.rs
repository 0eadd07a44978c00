//! Signed distance function for the background shape: a unit sphere carved
//! by a rotating gyroid.
//!
//! `scene.wgsl` mirrors these functions line for line; keep them in sync.

use crate::constants::*;
use crate::state::RenderParameters;
use glam::{Quat, Vec3, Vec3Swizzles};

/// Rotate `p` about `axis` (normalized here) by `angle` radians.
#[inline]
pub fn rotate(p: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    Quat::from_axis_angle(axis.normalize(), angle) * p
}

/// Polynomial smooth minimum. A negative `k` turns it into a smooth maximum.
#[inline]
pub fn smin(a: f32, b: f32, k: f32) -> f32 {
    let h = (0.5 + 0.5 * (b - a) / k).clamp(0.0, 1.0);
    b + (a - b) * h - k * h * (1.0 - h)
}

#[inline]
pub fn sd_sphere(p: Vec3, r: f32) -> f32 {
    p.length() - r
}

#[inline]
fn sin3(v: Vec3) -> Vec3 {
    Vec3::new(v.x.sin(), v.y.sin(), v.z.sin())
}

#[inline]
fn cos3(v: Vec3) -> Vec3 {
    Vec3::new(v.x.cos(), v.y.cos(), v.z.cos())
}

/// Gyroid field at `p` (already rotated). With `creepiness` the signed field
/// becomes a thin shell around its zero set.
pub fn gyroid(p: Vec3, params: &RenderParameters) -> f32 {
    // +1 keeps |scale| >= sqrt(3) so the division below never blows up
    let scale = params.scale.max(Vec3::ZERO) + Vec3::ONE;
    let p = p * scale;
    let p2 = p.lerp(p.yzx(), params.distortion);
    let g = sin3(p).dot(cos3(p2)) / scale.length();
    if params.creepiness {
        g.abs() - SHELL_THICKNESS
    } else {
        g
    }
}

/// Rotation applied to the gyroid lattice for the current phase.
#[inline]
pub fn lattice_rotation(p: Vec3, params: &RenderParameters) -> Vec3 {
    let angle = params.elapsed_time * ROTATION_RATE * params.rotation_amplitude;
    rotate(p, ROTATION_AXIS, angle)
}

/// The two blended branches of the scene before the final union.
///
/// Exposed separately so callers can inspect the blend; [`distance`] is
/// `branches(..).0.min(branches(..).1)`.
pub fn branches(p: Vec3, params: &RenderParameters) -> (f32, f32) {
    let sphere = sd_sphere(p, SPHERE_RADIUS);
    let g = gyroid(lattice_rotation(p, params), params);
    let a = smin(sphere, g, SMOOTH_K) + BLEND_OFFSET;
    let b = smin(sphere, -g, SMOOTH_K) + BLEND_OFFSET;
    (a, b)
}

/// Signed distance from `p` to the scene surface.
pub fn distance(p: Vec3, params: &RenderParameters) -> f32 {
    let (a, b) = branches(p, params);
    a.min(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smin_with_positive_k_stays_below_min() {
        for &(a, b) in &[(0.0, 0.0), (0.2, 0.21), (1.0, -1.0), (-0.3, 0.4)] {
            assert!(smin(a, b, 0.1) <= a.min(b) + 1e-6);
        }
    }

    #[test]
    fn smin_with_negative_k_matches_max_away_from_seam() {
        assert!((smin(1.0, -1.0, -0.01) - 1.0).abs() < 1e-6);
        assert!((smin(-1.0, 1.0, -0.01) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rotate_preserves_length() {
        let p = Vec3::new(0.4, -0.2, 0.9);
        let r = rotate(p, ROTATION_AXIS, 1.3);
        assert!((p.length() - r.length()).abs() < 1e-5);
    }

    #[test]
    fn zero_angle_is_identity() {
        let p = Vec3::new(0.4, -0.2, 0.9);
        assert!((rotate(p, ROTATION_AXIS, 0.0) - p).length() < 1e-6);
    }
}
