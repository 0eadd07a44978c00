use glam::Vec2;

/// Pointer position relative to a `width` x `height` viewport mapped to
/// `[-1, 1]` on both axes, y up. Zero-sized viewports report the centre.
#[inline]
pub fn pointer_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    let nx = (x / width) * 2.0 - 1.0;
    let ny = 1.0 - (y / height) * 2.0;
    Vec2::new(nx.clamp(-1.0, 1.0), ny.clamp(-1.0, 1.0))
}

/// Device pixel ratio actually used for the canvas backing store.
#[inline]
pub fn effective_dpr(device_dpr: f64, is_mobile: bool, mobile_cap: f64) -> f64 {
    let dpr = if device_dpr.is_finite() && device_dpr > 0.0 {
        device_dpr
    } else {
        1.0
    };
    if is_mobile {
        dpr.min(mobile_cap)
    } else {
        dpr
    }
}

/// Backing-store size in physical pixels, never below 1x1.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let w = (css_width.max(0.0) * dpr).round() as u32;
    let h = (css_height.max(0.0) * dpr).round() as u32;
    (w.max(1), h.max(1))
}
