//! Autonomous parameter drift: periodically pick random targets and chase
//! them every frame so the background keeps moving without any input.

use crate::config::{DriftConfig, SceneConfig, Span};
use crate::constants::INITIAL_DISTORTION_MAX;
use crate::state::FrameClock;
use glam::Vec3;
use rand::prelude::*;

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Move `current` a fraction `t` of the way to `target`, never past it.
#[inline]
pub fn approach(current: f32, target: f32, t: f32) -> f32 {
    lerp(current, target, t).clamp(current.min(target), current.max(target))
}

#[inline]
fn approach_vec3(current: Vec3, target: Vec3, t: f32) -> Vec3 {
    Vec3::new(
        approach(current.x, target.x, t),
        approach(current.y, target.y, t),
        approach(current.z, target.z, t),
    )
}

/// Frame-time corrected smoothing factor for a rate constant.
#[inline]
pub fn exp_alpha(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt.max(0.0)).exp()
}

/// Current values and the targets they are chasing.
#[derive(Clone, Debug, PartialEq)]
pub struct DriftState {
    pub current_speed: f32,
    pub target_speed: f32,
    pub current_scale: Vec3,
    pub target_scale: Vec3,
    pub current_distortion: f32,
    pub target_distortion: f32,
    pub current_camera_distance: f32,
    pub target_camera_distance: f32,
    pub current_rotation_amplitude: f32,
    pub target_rotation_amplitude: f32,
    /// Frame-clock time at which new targets are drawn.
    pub next_retarget_time: f32,
}

impl DriftState {
    fn from_scene(scene: &SceneConfig, config: &DriftConfig) -> Self {
        Self {
            current_speed: config.initial_speed,
            target_speed: config.initial_speed,
            current_scale: scene.scale,
            target_scale: scene.scale,
            current_distortion: scene.distortion,
            target_distortion: scene.distortion.clamp(0.0, INITIAL_DISTORTION_MAX),
            current_camera_distance: scene.camera_distance,
            target_camera_distance: scene.camera_distance,
            current_rotation_amplitude: scene.rotation_amplitude,
            target_rotation_amplitude: scene.rotation_amplitude,
            next_retarget_time: 0.0,
        }
    }
}

/// Values the frame driver reads after a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftSample {
    pub speed: f32,
    pub scale: Vec3,
    pub distortion: f32,
    pub camera_distance: f32,
    pub rotation_amplitude: f32,
    pub retargeted: bool,
}

pub struct DriftAnimator<R: Rng = StdRng> {
    state: DriftState,
    config: DriftConfig,
    base_camera_distance: f32,
    rng: R,
}

impl DriftAnimator<StdRng> {
    /// Seeded animator; `None` seeds from OS entropy.
    pub fn new(config: DriftConfig, scene: &SceneConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, scene, rng)
    }
}

impl<R: Rng> DriftAnimator<R> {
    pub fn with_rng(config: DriftConfig, scene: &SceneConfig, rng: R) -> Self {
        Self {
            state: DriftState::from_scene(scene, &config),
            base_camera_distance: scene.camera_distance,
            config,
            rng,
        }
    }

    pub fn state(&self) -> &DriftState {
        &self.state
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// Centre of the camera-distance draws. The frame driver moves it to the
    /// published distance while auto zoom is on.
    pub fn set_base_camera_distance(&mut self, distance: f32) {
        self.base_camera_distance = distance;
    }

    /// Draw a fresh set of targets and schedule the next retarget after `now`.
    pub fn retarget(&mut self, now: f32) {
        let c = &self.config;
        let rng = &mut self.rng;
        let s = &mut self.state;

        let interval = c.retarget_interval.sample(rng);
        s.next_retarget_time = now + interval;

        let sign = if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
        s.target_speed = c.speed.sample(rng) * sign;

        s.target_scale = Vec3::new(
            c.scale.clamp(c.scale.sample(rng)),
            c.scale.clamp(c.scale.sample(rng)),
            c.scale.clamp(c.scale.sample(rng)),
        );
        s.target_distortion = c.distortion.clamp(c.distortion.sample(rng));

        let base = self.base_camera_distance;
        let narrow = Span::new(base - c.camera_jitter, base + c.camera_jitter);
        s.target_camera_distance = c.camera_clamp.clamp(narrow.sample(rng));
        // occasional larger zoom excursions
        if rng.gen_bool(c.wide_zoom_probability.clamp(0.0, 1.0) as f64) {
            let wide =
                Span::new(base - c.camera_wide_jitter, base + c.camera_wide_jitter);
            s.target_camera_distance = c.camera_clamp.clamp(wide.sample(rng));
        }

        s.target_rotation_amplitude = c.rotation_amplitude.sample(rng);

        log::debug!(
            "[drift] retarget in {:.1}s speed={:.4} scale=({:.2},{:.2},{:.2}) dist={:.2} cam={:.2} amp={:.2}",
            interval,
            s.target_speed,
            s.target_scale.x,
            s.target_scale.y,
            s.target_scale.z,
            s.target_distortion,
            s.target_camera_distance,
            s.target_rotation_amplitude
        );
    }

    /// Advance one frame. Retargets when the clock passes the scheduled time,
    /// then moves every current value towards its target.
    pub fn tick(&mut self, clock: FrameClock) -> DriftSample {
        let retargeted = clock.elapsed >= self.state.next_retarget_time;
        if retargeted {
            self.retarget(clock.elapsed);
        }

        let c = &self.config;
        let s = &mut self.state;
        let t = c.lerp_factor;
        // fixed per-frame factor: frame-rate dependent
        s.current_speed = approach(s.current_speed, s.target_speed, t);
        s.current_scale = approach_vec3(s.current_scale, s.target_scale, t);
        s.current_distortion = approach(s.current_distortion, s.target_distortion, t);

        let cam_alpha = exp_alpha(c.camera_rate, clock.delta);
        let amp_alpha = exp_alpha(c.rotation_amplitude_rate, clock.delta);
        s.current_camera_distance =
            approach(s.current_camera_distance, s.target_camera_distance, cam_alpha);
        s.current_rotation_amplitude = approach(
            s.current_rotation_amplitude,
            s.target_rotation_amplitude,
            amp_alpha,
        );

        DriftSample {
            speed: s.current_speed,
            scale: s.current_scale,
            distortion: s.current_distortion,
            camera_distance: c.camera_clamp.clamp(s.current_camera_distance),
            rotation_amplitude: s.current_rotation_amplitude,
            retargeted,
        }
    }

    /// Hold every target fixed and suppress retargeting until `until`.
    pub fn hold_targets_until(&mut self, until: f32) {
        self.state.next_retarget_time = until;
    }

    pub fn state_mut(&mut self) -> &mut DriftState {
        &mut self.state
    }
}
