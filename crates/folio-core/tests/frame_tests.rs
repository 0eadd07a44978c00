// Frame driver behaviour across many frames.

use folio_core::post::PassKind;
use folio_core::tuning::PanelTuner;
use folio_core::{
    CpuBackend, FrameClock, FrameDriver, LandingConfig, ParamValue, PostChain, RenderBackend,
    RenderParameters, Viewport,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct NullBackend {
    draws: usize,
}

impl RenderBackend for NullBackend {
    fn attach(&mut self, _viewport: Viewport) {}
    fn draw(&mut self, _params: &RenderParameters, _chain: &PostChain) {
        self.draws += 1;
    }
    fn detach(&mut self) {}
}

fn seeded() -> LandingConfig {
    LandingConfig {
        seed: Some(77),
        ..Default::default()
    }
}

fn run(driver: &mut FrameDriver<NullBackend>, frames: usize) {
    let vp = Viewport::new(1280, 720);
    let dt = 1.0 / 60.0;
    for i in 0..frames {
        driver.tick(FrameClock::new(i as f32 * dt, dt), vp, Vec2::new(0.3, -0.2));
    }
}

#[test]
fn rotation_disabled_freezes_elapsed_time() {
    let mut config = seeded();
    config.scene.rotation = false;
    let mut driver = FrameDriver::new(NullBackend::default(), &config, Viewport::new(1280, 720));
    run(&mut driver, 1000);
    assert_eq!(driver.params().elapsed_time, 0.0);
    assert_eq!(driver.backend().draws, 1000);
}

#[test]
fn rotation_enabled_advances_by_speed() {
    let mut driver = FrameDriver::new(NullBackend::default(), &seeded(), Viewport::new(1280, 720));
    run(&mut driver, 100);
    assert!(driver.params().elapsed_time != 0.0);
}

#[test]
fn auto_zoom_off_holds_configured_distance() {
    let mut config = seeded();
    config.scene.auto_zoom = false;
    config.scene.camera_distance = 4.25;
    let mut driver = FrameDriver::new(NullBackend::default(), &config, Viewport::new(1280, 720));
    run(&mut driver, 600);
    assert_eq!(driver.params().camera_distance, 4.25);
}

#[test]
fn auto_zoom_on_follows_animator() {
    let mut driver = FrameDriver::new(NullBackend::default(), &seeded(), Viewport::new(1280, 720));
    run(&mut driver, 600);
    let sample = driver.last_sample().unwrap();
    assert_eq!(driver.params().camera_distance, sample.camera_distance);
    assert!((1.2..=6.0).contains(&driver.params().camera_distance));
}

#[test]
fn panel_tuner_edits_reach_the_next_frame() {
    let mut driver = FrameDriver::new(NullBackend::default(), &seeded(), Viewport::new(1280, 720));
    let mut tuner = PanelTuner::new(StdRng::seed_from_u64(1));
    tuner.set_scene("creepiness", ParamValue::Bool(true));
    tuner.set_pass(PassKind::Bloom, "exposure", ParamValue::Float(1.2));
    driver.set_tuner(Box::new(tuner));
    run(&mut driver, 1);
    assert!(driver.params().creepiness);
    assert!((driver.chain().tone_mapping_exposure() - 1.2_f32.powi(4)).abs() < 1e-5);
}

#[test]
fn cpu_backend_draws_a_frame_of_its_size() {
    let config = seeded();
    let vp = Viewport::new(16, 9);
    let mut driver = FrameDriver::new(CpuBackend::new(16, 9), &config, vp);
    driver.tick(FrameClock::new(0.0, 0.016), vp, Vec2::ZERO);
    let frame = driver.backend().last_frame().unwrap();
    assert_eq!((frame.width(), frame.height()), (16, 9));
    assert!(frame
        .pixels()
        .iter()
        .all(|p| p.is_finite() && p.min_element() >= 0.0 && p.max_element() <= 1.0));
    assert_eq!(driver.backend().frames_drawn(), 1);
    driver.detach();
    assert!(driver.backend().last_frame().is_none());
}
