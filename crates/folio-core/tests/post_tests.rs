// Post chain ordering, gating and tone-mapping exposure.

use folio_core::config::PostConfig;
use folio_core::post::filters;
use folio_core::{CpuRenderer, Frame, PassKind, PostChain, RenderParameters};
use glam::Vec3;

fn chain_with(bloom: bool, exposure: f32) -> PostChain {
    let mut cfg = PostConfig::default();
    cfg.bloom.enabled = bloom;
    cfg.bloom.exposure = exposure;
    PostChain::from_config(&cfg)
}

#[test]
fn bloom_disabled_means_unit_exposure() {
    assert_eq!(chain_with(false, 1.2).tone_mapping_exposure(), 1.0);
}

#[test]
fn unit_exposure_stays_unit() {
    assert_eq!(chain_with(true, 1.0).tone_mapping_exposure(), 1.0);
}

#[test]
fn exposure_is_raised_to_the_fourth() {
    let e = chain_with(true, 1.2).tone_mapping_exposure();
    assert!((e - 1.2_f32.powi(4)).abs() < 1e-5);
}

#[test]
fn uniforms_carry_the_powered_exposure() {
    let u = chain_with(true, 1.2).uniforms([640.0, 360.0]);
    assert!((u.exposure - 2.0736).abs() < 1e-4);
    assert_eq!(u.resolution, [640.0, 360.0]);
    assert_eq!(u.tint, [0.0, 0.5, 1.0]);
}

#[test]
fn all_disabled_is_tone_map_only() {
    let mut chain = PostChain::default();
    for kind in [PassKind::Fxaa, PassKind::Bloom, PassKind::Focus, PassKind::Tint] {
        chain.set_enabled(kind, false);
    }
    assert_eq!(chain.enabled_passes().count(), 0);
    let frame = CpuRenderer::render(&RenderParameters::default(), 12, 8);
    assert_eq!(chain.apply(&frame), filters::tone_map(&frame, 1.0));
}

#[test]
fn disabled_pass_is_skipped() {
    let frame = Frame::filled(8, 8, Vec3::new(0.2, 0.2, 0.2));
    let mut chain = PostChain::default();
    chain.set_enabled(PassKind::Fxaa, false);
    chain.set_enabled(PassKind::Bloom, false);
    chain.set_enabled(PassKind::Focus, false);
    let tinted = chain.apply(&frame);
    chain.set_enabled(PassKind::Tint, false);
    let plain = chain.apply(&frame);
    assert!(tinted.get(4, 4).z > plain.get(4, 4).z);
}

#[test]
fn enabled_passes_follow_order_index() {
    let chain = PostChain::default();
    let order: Vec<u32> = chain.enabled_passes().map(|p| p.order_index).collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
    assert_eq!(order.len(), 4);
}

#[test]
fn final_frame_is_displayable() {
    let frame = CpuRenderer::render_final(&RenderParameters::default(), &PostChain::default(), 20, 12);
    for p in frame.pixels() {
        assert!(p.min_element() >= 0.0 && p.max_element() <= 1.0);
    }
}
