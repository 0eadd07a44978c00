//! Per-frame state types shared by the frame driver, the raymarcher and the
//! GPU uniforms.
//!
//! These types avoid referencing platform-specific APIs and are usable on both
//! native and web targets. The frame driver is their only writer; everything
//! else reads them for the duration of one frame.

use glam::{Vec2, Vec3};

/// Inputs to the scene function and raymarcher for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderParameters {
    /// Gyroid frequency per axis; the scene adds 1.0 to each component.
    pub scale: Vec3,
    /// Blend towards the permuted `(y, z, x)` copy, in \[0, 2\].
    pub distortion: f32,
    /// Turns the signed gyroid into a thin double-walled shell.
    pub creepiness: bool,
    pub rotation_enabled: bool,
    /// Camera sits at `(0, 0, camera_distance)` looking down -Z.
    pub camera_distance: f32,
    pub rotation_amplitude: f32,
    /// Scene phase. Only advances while `rotation_enabled` is set.
    pub elapsed_time: f32,
    pub aspect_ratio: f32,
    /// Smoothed pointer signal driving the parallax rotation.
    pub pointer_offset: Vec2,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            scale: Vec3::splat(5.0),
            distortion: 0.0,
            creepiness: false,
            rotation_enabled: true,
            camera_distance: 3.5,
            rotation_amplitude: 0.3,
            elapsed_time: 0.0,
            aspect_ratio: 1.0,
            pointer_offset: Vec2::ZERO,
        }
    }
}

/// Output surface size as reported by the windowing layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }

    /// Width over height; a zero-sized viewport reports 1.0.
    pub fn aspect(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }
}

/// Time since start and since the previous frame, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
    pub elapsed: f32,
    pub delta: f32,
}

impl FrameClock {
    pub fn new(elapsed: f32, delta: f32) -> Self {
        Self {
            elapsed,
            delta: delta.max(0.0),
        }
    }
}

/// Uniform block consumed by `scene.wgsl`. Layout must match `SceneUniforms`
/// in the shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub scale: [f32; 3],
    pub time: f32,
    pub pointer: [f32; 2],
    pub aspect: f32,
    pub distortion: f32,
    pub camera_distance: f32,
    pub rotation_amplitude: f32,
    pub creepiness: f32,
    pub _pad: f32,
}

impl From<&RenderParameters> for SceneUniforms {
    fn from(p: &RenderParameters) -> Self {
        Self {
            scale: p.scale.to_array(),
            time: p.elapsed_time,
            pointer: p.pointer_offset.to_array(),
            aspect: p.aspect_ratio,
            distortion: p.distortion,
            camera_distance: p.camera_distance,
            rotation_amplitude: p.rotation_amplitude,
            creepiness: if p.creepiness { 1.0 } else { 0.0 },
            _pad: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_uniforms_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
    }

    #[test]
    fn zero_sized_viewport_has_unit_aspect() {
        assert_eq!(Viewport::new(0, 720).aspect(), 1.0);
        assert!((Viewport::new(1920, 1080).aspect() - 16.0 / 9.0).abs() < 1e-6);
    }
}
