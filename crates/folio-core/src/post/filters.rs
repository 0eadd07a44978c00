//! CPU versions of the `post.wgsl` entry points, used for snapshots and
//! tests. The GPU path runs the bloom blur at half resolution; these filters
//! blur at full resolution with the same kernel.

use super::PassSettings;
use crate::image::Frame;
use crate::raymarch::smoothstep;
use glam::{Vec2, Vec3};

const LUMA: Vec3 = Vec3::new(0.299, 0.587, 0.114);

const FXAA_REDUCE_MIN: f32 = 1.0 / 128.0;
const FXAA_REDUCE_MUL: f32 = 1.0 / 8.0;
const FXAA_SPAN_MAX: f32 = 8.0;

/// Half-width of the separable bloom kernel, in taps.
pub const BLUR_TAPS: i32 = 4;
const BLUR_SIGMA: f32 = 2.0;

#[inline]
pub fn luma(c: Vec3) -> f32 {
    c.dot(LUMA)
}

pub fn apply_pass(frame: &Frame, settings: &PassSettings) -> Frame {
    match *settings {
        PassSettings::Fxaa => fxaa(frame),
        PassSettings::Bloom {
            strength,
            radius,
            threshold,
            ..
        } => bloom(frame, strength, radius, threshold),
        PassSettings::Focus { focus, max_blur } => focus_blur(frame, focus, max_blur),
        PassSettings::Tint {
            tint,
            intensity,
            chroma,
        } => tint_pass(frame, tint, intensity, chroma),
    }
}

/// Edge-directed anti-aliasing from four diagonal luma taps.
pub fn fxaa(frame: &Frame) -> Frame {
    let texel = Vec2::new(1.0 / frame.width() as f32, 1.0 / frame.height() as f32);
    frame.map(|uv, rgb_m| {
        let l_nw = luma(frame.sample(uv + Vec2::new(-1.0, 1.0) * texel));
        let l_ne = luma(frame.sample(uv + Vec2::new(1.0, 1.0) * texel));
        let l_sw = luma(frame.sample(uv + Vec2::new(-1.0, -1.0) * texel));
        let l_se = luma(frame.sample(uv + Vec2::new(1.0, -1.0) * texel));
        let l_m = luma(rgb_m);

        let l_min = l_m.min(l_nw.min(l_ne).min(l_sw.min(l_se)));
        let l_max = l_m.max(l_nw.max(l_ne).max(l_sw.max(l_se)));

        let dir = Vec2::new(-((l_nw + l_ne) - (l_sw + l_se)), (l_nw + l_sw) - (l_ne + l_se));
        let reduce = ((l_nw + l_ne + l_sw + l_se) * 0.25 * FXAA_REDUCE_MUL).max(FXAA_REDUCE_MIN);
        let rcp_min = 1.0 / (dir.x.abs().min(dir.y.abs()) + reduce);
        let dir = (dir * rcp_min).clamp(Vec2::splat(-FXAA_SPAN_MAX), Vec2::splat(FXAA_SPAN_MAX))
            * texel;

        let rgb_a = 0.5
            * (frame.sample(uv + dir * (1.0 / 3.0 - 0.5))
                + frame.sample(uv + dir * (2.0 / 3.0 - 0.5)));
        let rgb_b = rgb_a * 0.5
            + 0.25 * (frame.sample(uv + dir * -0.5) + frame.sample(uv + dir * 0.5));
        let l_b = luma(rgb_b);
        if l_b < l_min || l_b > l_max {
            rgb_a
        } else {
            rgb_b
        }
    })
}

/// Keep only pixels whose luma clears `threshold`.
pub fn bright_pass(frame: &Frame, threshold: f32) -> Frame {
    frame.map(|_, c| c * smoothstep(threshold, threshold + 0.01, luma(c)))
}

#[inline]
fn gaussian_weight(i: i32) -> f32 {
    let x = i as f32;
    (-x * x / (2.0 * BLUR_SIGMA * BLUR_SIGMA)).exp()
}

/// Normalised 9-tap weights shared with the shader.
pub fn blur_weights() -> [f32; (2 * BLUR_TAPS + 1) as usize] {
    let mut w = [0.0; (2 * BLUR_TAPS + 1) as usize];
    let mut sum = 0.0;
    for i in -BLUR_TAPS..=BLUR_TAPS {
        let v = gaussian_weight(i);
        w[(i + BLUR_TAPS) as usize] = v;
        sum += v;
    }
    for v in &mut w {
        *v /= sum;
    }
    w
}

/// Tap spacing in texels for a bloom radius.
#[inline]
pub fn blur_spacing(radius: f32) -> f32 {
    1.0 + radius.max(0.0) * 3.0
}

/// One direction of the separable gaussian. `dir` is `(1, 0)` or `(0, 1)`.
pub fn blur(frame: &Frame, dir: Vec2, radius: f32) -> Frame {
    let texel = Vec2::new(1.0 / frame.width() as f32, 1.0 / frame.height() as f32);
    let step = dir * texel * blur_spacing(radius);
    let weights = blur_weights();
    frame.map(|uv, _| {
        (-BLUR_TAPS..=BLUR_TAPS).fold(Vec3::ZERO, |acc, i| {
            acc + frame.sample(uv + step * i as f32) * weights[(i + BLUR_TAPS) as usize]
        })
    })
}

pub fn bloom(frame: &Frame, strength: f32, radius: f32, threshold: f32) -> Frame {
    let bright = bright_pass(frame, threshold);
    let blurred = blur(&blur(&bright, Vec2::X, radius), Vec2::Y, radius);
    frame.map(|uv, c| c + blurred.sample(uv) * strength)
}

/// Blur amount at `uv`: zero inside the focus region, `max_blur` at the rim.
pub fn focus_amount(uv: Vec2, aspect: f32, focus: f32, max_blur: f32) -> f32 {
    let d = ((uv - Vec2::splat(0.5)) * Vec2::new(aspect, 1.0)).length();
    let inner = focus * 0.5;
    max_blur * smoothstep(inner, inner + 0.5, d)
}

const RING: [Vec2; 8] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(0.7071, 0.7071),
    Vec2::new(0.0, 1.0),
    Vec2::new(-0.7071, 0.7071),
    Vec2::new(-1.0, 0.0),
    Vec2::new(-0.7071, -0.7071),
    Vec2::new(0.0, -1.0),
    Vec2::new(0.7071, -0.7071),
];

/// Radial depth-of-field stand-in: a ring blur growing towards the edges.
pub fn focus_blur(frame: &Frame, focus: f32, max_blur: f32) -> Frame {
    let aspect = frame.width() as f32 / frame.height() as f32;
    frame.map(|uv, c| {
        let amount = focus_amount(uv, aspect, focus, max_blur);
        if amount <= 0.0 {
            return c;
        }
        let offset = Vec2::new(amount / aspect, amount);
        let sum = RING
            .iter()
            .fold(c, |acc, r| acc + frame.sample(uv + *r * offset));
        sum / (RING.len() as f32 + 1.0)
    })
}

/// Chromatic offset on red and blue, then a blend towards `col + tint`.
pub fn tint_pass(frame: &Frame, tint: Vec3, intensity: f32, chroma: f32) -> Frame {
    frame.map(|uv, c| {
        let r = frame.sample(uv + Vec2::new(chroma, 0.0)).x;
        let b = frame.sample(uv - Vec2::new(chroma, 0.0)).z;
        let col = Vec3::new(r, c.y, b);
        col.lerp(col + tint, intensity)
    })
}

/// Filmic ACES fit applied after scaling by `exposure`.
pub fn aces(c: Vec3, exposure: f32) -> Vec3 {
    let x = c * exposure;
    let a = 2.51;
    let b = 0.03;
    let cc = 2.43;
    let d = 0.59;
    let e = 0.14;
    ((x * (a * x + b)) / (x * (cc * x + d) + e)).clamp(Vec3::ZERO, Vec3::ONE)
}

pub fn tone_map(frame: &Frame, exposure: f32) -> Frame {
    frame.map(|_, c| aces(c, exposure))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(w: u32, h: u32) -> Frame {
        let mut f = Frame::new(w, h);
        for y in 0..h {
            for x in 0..w {
                if (x + y) % 2 == 0 {
                    f.set(x, y, Vec3::ONE);
                }
            }
        }
        f
    }

    #[test]
    fn blur_weights_sum_to_one() {
        let sum: f32 = blur_weights().iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn flat_frames_survive_fxaa_and_focus() {
        let flat = Frame::filled(16, 9, Vec3::new(0.3, 0.2, 0.1));
        for out in [fxaa(&flat), focus_blur(&flat, 0.5, 0.01)] {
            for p in out.pixels() {
                assert!((*p - Vec3::new(0.3, 0.2, 0.1)).length() < 1e-4);
            }
        }
    }

    #[test]
    fn bright_pass_drops_dark_pixels() {
        let dark = Frame::filled(4, 4, Vec3::splat(0.1));
        assert!(bright_pass(&dark, 0.35).pixels().iter().all(|p| *p == Vec3::ZERO));
        let lit = Frame::filled(4, 4, Vec3::splat(0.9));
        assert!(bright_pass(&lit, 0.35).pixels().iter().all(|p| *p == Vec3::splat(0.9)));
    }

    #[test]
    fn bloom_only_brightens() {
        let f = checker(8, 8);
        let out = bloom(&f, 3.2, 0.7, 0.35);
        for (a, b) in f.pixels().iter().zip(out.pixels()) {
            assert!(b.x >= a.x && b.y >= a.y && b.z >= a.z);
        }
    }

    #[test]
    fn focus_centre_stays_sharp() {
        assert_eq!(focus_amount(Vec2::splat(0.5), 16.0 / 9.0, 0.5, 0.004), 0.0);
        assert!(focus_amount(Vec2::ZERO, 16.0 / 9.0, 0.5, 0.004) > 0.0);
    }

    #[test]
    fn tint_blends_towards_the_tint_colour() {
        let f = Frame::filled(4, 4, Vec3::ZERO);
        let out = tint_pass(&f, Vec3::new(0.0, 0.5, 1.0), 0.18, 0.002);
        let p = out.get(1, 1);
        assert!((p - Vec3::new(0.0, 0.09, 0.18)).length() < 1e-5);
    }

    #[test]
    fn aces_maps_black_to_black_and_saturates() {
        assert_eq!(aces(Vec3::ZERO, 1.0), Vec3::ZERO);
        assert!(aces(Vec3::splat(100.0), 1.0).x > 0.99);
    }
}
