//! Per-frame orchestration: tuning, drift, parameter updates and drawing.

use crate::config::{LandingConfig, SceneConfig};
use crate::constants::{POINTER_SCALE, POINTER_SMOOTHING};
use crate::drift::{DriftAnimator, DriftSample};
use crate::post::PostChain;
use crate::state::{FrameClock, RenderParameters, Viewport};
use crate::tuning::Tuner;
use glam::Vec2;

/// Whatever turns parameters into pixels: the wgpu renderer on web and
/// native, or the CPU reference renderer in tests and snapshots.
pub trait RenderBackend {
    /// Create resources for `viewport`.
    fn attach(&mut self, viewport: Viewport);
    /// Called when the drawable size changes between frames.
    fn resize(&mut self, _viewport: Viewport) {}
    fn draw(&mut self, params: &RenderParameters, chain: &PostChain);
    /// Release resources. No draws follow until the next `attach`.
    fn detach(&mut self);
}

fn params_from_scene(scene: &SceneConfig, viewport: Viewport) -> RenderParameters {
    RenderParameters {
        scale: scene.scale,
        distortion: scene.distortion,
        creepiness: scene.creepiness,
        rotation_enabled: scene.rotation,
        camera_distance: scene.camera_distance,
        rotation_amplitude: scene.rotation_amplitude,
        elapsed_time: 0.0,
        aspect_ratio: viewport.aspect(),
        pointer_offset: Vec2::ZERO,
    }
}

pub struct FrameDriver<B: RenderBackend> {
    backend: B,
    drift: DriftAnimator,
    scene: SceneConfig,
    chain: PostChain,
    params: RenderParameters,
    viewport: Viewport,
    tuner: Option<Box<dyn Tuner>>,
    attached: bool,
    last_sample: Option<DriftSample>,
}

impl<B: RenderBackend> FrameDriver<B> {
    /// Build the driver and attach `backend` to `viewport`.
    pub fn new(mut backend: B, config: &LandingConfig, viewport: Viewport) -> Self {
        backend.attach(viewport);
        log::info!(
            "[frame] attached {}x{} @{:.2} seed={:?}",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio,
            config.seed
        );
        Self {
            backend,
            drift: DriftAnimator::new(config.drift.clone(), &config.scene, config.seed),
            scene: config.scene.clone(),
            chain: PostChain::from_config(&config.post),
            params: params_from_scene(&config.scene, viewport),
            viewport,
            tuner: None,
            attached: true,
            last_sample: None,
        }
    }

    pub fn set_tuner(&mut self, tuner: Box<dyn Tuner>) {
        self.tuner = Some(tuner);
    }

    pub fn params(&self) -> &RenderParameters {
        &self.params
    }

    pub fn chain(&self) -> &PostChain {
        &self.chain
    }

    pub fn chain_mut(&mut self) -> &mut PostChain {
        &mut self.chain
    }

    pub fn scene(&self) -> &SceneConfig {
        &self.scene
    }

    pub fn drift(&self) -> &DriftAnimator {
        &self.drift
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn last_sample(&self) -> Option<DriftSample> {
        self.last_sample
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// One frame. `raw_pointer` is the pointer in `[-1, 1]` per axis, y up.
    pub fn tick(&mut self, clock: FrameClock, viewport: Viewport, raw_pointer: Vec2) {
        if !self.attached {
            return;
        }
        let clock = FrameClock::new(clock.elapsed, clock.delta);

        if let Some(tuner) = self.tuner.as_mut() {
            let before = self.scene.clone();
            tuner.tune(&mut self.scene, &mut self.chain);
            // panel edits jump the animated values; drift resumes from there
            let s = self.drift.state_mut();
            if self.scene.scale != before.scale {
                s.current_scale = self.scene.scale;
            }
            if self.scene.distortion != before.distortion {
                s.current_distortion = self.scene.distortion;
            }
            if self.scene.rotation_amplitude != before.rotation_amplitude {
                s.current_rotation_amplitude = self.scene.rotation_amplitude;
            }
            if self.scene.camera_distance != before.camera_distance {
                s.current_camera_distance = self.scene.camera_distance;
                self.params.camera_distance = self.scene.camera_distance;
            }
            self.params.creepiness = self.scene.creepiness;
            self.params.rotation_enabled = self.scene.rotation;
        }

        // auto zoom wanders around the distance it last published
        let base = if self.scene.auto_zoom {
            self.params.camera_distance
        } else {
            self.scene.camera_distance
        };
        self.drift.set_base_camera_distance(base);

        let sample = self.drift.tick(clock);
        let p = &mut self.params;
        p.scale = sample.scale;
        p.distortion = sample.distortion;
        p.rotation_amplitude = sample.rotation_amplitude;
        p.camera_distance = if self.scene.auto_zoom {
            sample.camera_distance
        } else {
            self.scene.camera_distance
        };
        if p.rotation_enabled {
            p.elapsed_time += sample.speed;
        }

        if viewport != self.viewport {
            self.viewport = viewport;
            self.backend.resize(viewport);
        }
        p.aspect_ratio = viewport.aspect();

        let target = raw_pointer * POINTER_SCALE;
        p.pointer_offset = p.pointer_offset.lerp(target, POINTER_SMOOTHING);

        self.last_sample = Some(sample);
        self.backend.draw(&self.params, &self.chain);
    }

    /// Tear down the backend. Later ticks are ignored.
    pub fn detach(&mut self) {
        if self.attached {
            self.backend.detach();
            self.attached = false;
            log::info!("[frame] detached");
        }
    }
}

impl<B: RenderBackend> Drop for FrameDriver<B> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        attached: u32,
        detached: u32,
        resized: u32,
        draws: Vec<RenderParameters>,
    }

    impl RenderBackend for Recorder {
        fn attach(&mut self, _viewport: Viewport) {
            self.attached += 1;
        }
        fn resize(&mut self, _viewport: Viewport) {
            self.resized += 1;
        }
        fn draw(&mut self, params: &RenderParameters, _chain: &PostChain) {
            self.draws.push(params.clone());
        }
        fn detach(&mut self) {
            self.detached += 1;
        }
    }

    fn config() -> LandingConfig {
        LandingConfig {
            seed: Some(11),
            ..Default::default()
        }
    }

    #[test]
    fn attach_then_detach_once() {
        let mut driver = FrameDriver::new(Recorder::default(), &config(), Viewport::new(800, 600));
        assert_eq!(driver.backend().attached, 1);
        driver.detach();
        driver.detach();
        assert_eq!(driver.backend().detached, 1);
        driver.tick(FrameClock::new(0.0, 0.016), Viewport::new(800, 600), Vec2::ZERO);
        assert!(driver.backend().draws.is_empty());
    }

    #[test]
    fn pointer_is_halved_and_smoothed() {
        let mut driver = FrameDriver::new(Recorder::default(), &config(), Viewport::new(800, 600));
        driver.tick(FrameClock::new(0.0, 0.016), Viewport::new(800, 600), Vec2::ONE);
        let p = driver.params().pointer_offset;
        assert!((p - Vec2::splat(0.025)).length() < 1e-6);
    }

    #[test]
    fn resize_only_on_change() {
        let mut driver = FrameDriver::new(Recorder::default(), &config(), Viewport::new(800, 600));
        let vp = Viewport::new(800, 600);
        driver.tick(FrameClock::new(0.0, 0.016), vp, Vec2::ZERO);
        driver.tick(FrameClock::new(0.016, 0.016), Viewport::new(1024, 600), Vec2::ZERO);
        assert_eq!(driver.backend().resized, 1);
        assert!((driver.params().aspect_ratio - 1024.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn panel_scale_edit_jumps_the_animated_value() {
        use crate::post::ParamValue;
        use crate::tuning::PanelTuner;
        use glam::Vec3;
        use rand::SeedableRng;

        let mut driver = FrameDriver::new(Recorder::default(), &config(), Viewport::new(800, 600));
        let mut tuner = PanelTuner::new(rand::rngs::StdRng::seed_from_u64(5));
        tuner.set_scene("scale", ParamValue::Vec3(Vec3::splat(9.0)));
        driver.set_tuner(Box::new(tuner));
        driver.tick(FrameClock::new(0.0, 0.016), Viewport::new(800, 600), Vec2::ZERO);
        // one lerp step of 1% towards a target drawn inside [3.5, 7]
        let s = driver.params().scale;
        assert!(s.min_element() > 8.9 && s.max_element() <= 9.0);
    }

    #[test]
    fn out_of_range_panel_edits_never_reach_the_renderer() {
        use crate::post::ParamValue;
        use crate::tuning::PanelTuner;
        use rand::SeedableRng;

        let mut driver = FrameDriver::new(Recorder::default(), &config(), Viewport::new(800, 600));
        let mut tuner = PanelTuner::new(rand::rngs::StdRng::seed_from_u64(5));
        tuner.set_scene("distortion", ParamValue::Float(50.0));
        tuner.set_scene("rotation_amplitude", ParamValue::Float(-7.0));
        tuner.set_scene("camera_distance", ParamValue::Float(f32::NAN));
        driver.set_tuner(Box::new(tuner));
        for i in 0..3 {
            let t = i as f32 * 0.016;
            driver.tick(FrameClock::new(t, 0.016), Viewport::new(800, 600), Vec2::ZERO);
        }
        let p = driver.params();
        assert!((0.0..=1.2).contains(&p.distortion));
        assert!(p.rotation_amplitude >= 0.0);
        assert!(p.camera_distance.is_finite());
        assert_eq!(driver.scene().camera_distance, config().scene.camera_distance);
    }

    /// Push the animated camera to `at` and force a retarget on the next tick.
    fn retarget_from(driver: &mut FrameDriver<Recorder>, at: f32, now: f32) {
        driver.params.camera_distance = at;
        let s = driver.drift.state_mut();
        s.current_camera_distance = at;
        s.target_camera_distance = at;
        s.next_retarget_time = 0.0;
        driver.tick(FrameClock::new(now, 0.016), Viewport::new(800, 600), Vec2::ZERO);
        assert!(driver.last_sample().is_some_and(|s| s.retargeted));
    }

    #[test]
    fn auto_zoom_retargets_around_the_published_distance() {
        let mut driver = FrameDriver::new(Recorder::default(), &config(), Viewport::new(800, 600));
        assert!(driver.scene().auto_zoom);
        let wide = driver.drift().config().camera_wide_jitter;
        for i in 0..64 {
            retarget_from(&mut driver, 5.8, 1.0 + i as f32);
            let target = driver.drift().state().target_camera_distance;
            assert!(target >= 5.8 - wide - 1e-4, "target {target}");
            assert!(target <= crate::constants::CAMERA_MAX);
        }
    }

    #[test]
    fn fixed_zoom_retargets_around_the_configured_distance() {
        let mut cfg = config();
        cfg.scene.auto_zoom = false;
        let base = cfg.scene.camera_distance;
        let mut driver = FrameDriver::new(Recorder::default(), &cfg, Viewport::new(800, 600));
        let wide = driver.drift().config().camera_wide_jitter;
        for i in 0..64 {
            retarget_from(&mut driver, 5.8, 1.0 + i as f32);
            let target = driver.drift().state().target_camera_distance;
            assert!((target - base).abs() <= wide + 1e-4, "target {target}");
            assert_eq!(driver.params().camera_distance, base);
        }
    }
}
