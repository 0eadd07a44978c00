//! Sphere tracing through [`crate::sdf::distance`] and the stylised shading
//! applied to hits and misses.

use crate::constants::*;
use crate::sdf;
use crate::state::RenderParameters;
use glam::{Vec2, Vec3};

/// Outcome of marching a single ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct March {
    /// Last evaluated position along the ray.
    pub position: Vec3,
    pub traveled: f32,
    pub steps: u32,
    /// The loop stopped on `d < HIT_EPSILON` rather than on the step bound.
    pub converged: bool,
}

impl March {
    /// A ray counts as a hit while it stays inside the march range, which also
    /// covers grazing rays that ran out of steps near the surface.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.traveled < MAX_DISTANCE
    }
}

#[inline]
pub fn camera_position(params: &RenderParameters) -> Vec3 {
    Vec3::new(0.0, 0.0, params.camera_distance)
}

/// Zero-centred, aspect-corrected screen coordinate for a `[0, 1]` uv.
#[inline]
pub fn centered_uv(uv: Vec2, aspect: f32) -> Vec2 {
    (uv - Vec2::splat(0.5)) * Vec2::new(aspect, 1.0)
}

/// View ray for `uv`, tilted by the smoothed pointer offset.
pub fn ray_direction(uv: Vec2, params: &RenderParameters) -> Vec3 {
    let c = centered_uv(uv, params.aspect_ratio);
    let ray = c.extend(-1.0).normalize();
    let m = params.pointer_offset * Vec2::new(params.aspect_ratio, 1.0) * POINTER_SENSITIVITY;
    let ray = sdf::rotate(ray, Vec3::X, m.y);
    sdf::rotate(ray, Vec3::Y, -m.x)
}

/// Walk from `origin` along `dir` until the surface, the step bound or the
/// distance bound is reached.
pub fn march(origin: Vec3, dir: Vec3, params: &RenderParameters) -> March {
    let mut position = origin;
    let mut traveled = 0.0_f32;
    let mut steps = 0;
    let mut converged = false;
    while steps < MAX_STEPS {
        steps += 1;
        let d = sdf::distance(position, params);
        if d < HIT_EPSILON {
            converged = true;
            break;
        }
        if traveled > MAX_DISTANCE {
            break;
        }
        traveled += d;
        position = origin + dir * traveled;
    }
    March {
        position,
        traveled,
        steps,
        converged,
    }
}

/// Surface normal from central differences (six evaluations).
pub fn estimate_normal(p: Vec3, params: &RenderParameters) -> Vec3 {
    let e = NORMAL_EPSILON;
    let dx = sdf::distance(p + Vec3::X * e, params) - sdf::distance(p - Vec3::X * e, params);
    let dy = sdf::distance(p + Vec3::Y * e, params) - sdf::distance(p - Vec3::Y * e, params);
    let dz = sdf::distance(p + Vec3::Z * e, params) - sdf::distance(p - Vec3::Z * e, params);
    Vec3::new(dx, dy, dz).normalize_or_zero()
}

/// Rim weight: 0 when looking straight at the surface, 1 at grazing angles.
#[inline]
pub fn fresnel(ray: Vec3, normal: Vec3) -> f32 {
    (1.0 + ray.dot(normal)).clamp(0.0, 1.0).powf(FRESNEL_POWER)
}

#[inline]
pub(crate) fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Radial vignette behind the shape.
pub fn background(centered: Vec2) -> Vec3 {
    let falloff = 1.0 - smoothstep(0.0, VIGNETTE_RADIUS, centered.length());
    BACKGROUND_COLOR * falloff
}

/// Colour for a hit at `p` seen along `ray`.
pub fn shade(p: Vec3, ray: Vec3, params: &RenderParameters) -> Vec3 {
    let normal = estimate_normal(p, params);
    let d = smoothstep(0.5, 1.0, p.length());
    let base = CORE_COLOR.lerp(RIM_COLOR, d);
    base + FRESNEL_TINT * fresnel(ray, normal) * FRESNEL_WEIGHT
}

/// Full per-pixel evaluation for a `[0, 1]` uv (y up).
pub fn render_pixel(uv: Vec2, params: &RenderParameters) -> Vec3 {
    let ray = ray_direction(uv, params);
    let result = march(camera_position(params), ray, params);
    if result.is_hit() {
        shade(result.position, ray, params)
    } else {
        background(centered_uv(uv, params.aspect_ratio))
    }
}
