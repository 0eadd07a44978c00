//! CPU reference renderer: evaluates the raymarcher per pixel and runs the
//! post chain's CPU filters. Used for snapshots and tests.

use crate::frame::RenderBackend;
use crate::image::Frame;
use crate::post::PostChain;
use crate::raymarch::render_pixel;
use crate::state::{RenderParameters, Viewport};

pub struct CpuRenderer;

impl CpuRenderer {
    /// Raw scene colours before post-processing.
    pub fn render(params: &RenderParameters, width: u32, height: u32) -> Frame {
        Frame::from_fn(width, height, |uv| render_pixel(uv, params))
    }

    /// Scene plus the full post chain.
    pub fn render_final(
        params: &RenderParameters,
        chain: &PostChain,
        width: u32,
        height: u32,
    ) -> Frame {
        chain.apply(&Self::render(params, width, height))
    }
}

/// [`RenderBackend`] that renders every frame on the CPU at a fixed size and
/// keeps the last result.
pub struct CpuBackend {
    width: u32,
    height: u32,
    viewport: Option<Viewport>,
    last: Option<Frame>,
    frames: u64,
}

impl CpuBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            viewport: None,
            last: None,
            frames: 0,
        }
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last.as_ref()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }
}

impl RenderBackend for CpuBackend {
    fn attach(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn draw(&mut self, params: &RenderParameters, chain: &PostChain) {
        if self.viewport.is_none() {
            return;
        }
        self.last = Some(CpuRenderer::render_final(params, chain, self.width, self.height));
        self.frames += 1;
    }

    fn detach(&mut self) {
        self.viewport = None;
        self.last = None;
    }
}
