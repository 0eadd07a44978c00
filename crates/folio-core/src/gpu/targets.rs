use super::helpers::{self, HDR_FORMAT};

/// Full-resolution scene target plus a ping-pong pair for the post chain,
/// and two half-resolution buffers for the bloom bright pass and blur.
pub(crate) struct RenderTargets {
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) ping_view: wgpu::TextureView,
    pub(crate) pong_view: wgpu::TextureView,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b_view: wgpu::TextureView,
    _textures: [wgpu::Texture; 5],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Hdr,
    Ping,
    Pong,
}

impl Slot {
    /// Destination for a full-resolution pass reading from `self`.
    pub(crate) fn next(self) -> Slot {
        match self {
            Slot::Hdr | Slot::Pong => Slot::Ping,
            Slot::Ping => Slot::Pong,
        }
    }
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (hdr, hdr_view) = helpers::create_color_texture(device, "hdr_tex", width, height, HDR_FORMAT);
        let (ping, ping_view) = helpers::create_color_texture(device, "post_ping", width, height, HDR_FORMAT);
        let (pong, pong_view) = helpers::create_color_texture(device, "post_pong", width, height, HDR_FORMAT);
        let bw = (width.max(1) / 2).max(1);
        let bh = (height.max(1) / 2).max(1);
        let (bloom_a, bloom_a_view) = helpers::create_color_texture(device, "bloom_a", bw, bh, HDR_FORMAT);
        let (bloom_b, bloom_b_view) = helpers::create_color_texture(device, "bloom_b", bw, bh, HDR_FORMAT);
        Self {
            hdr_view,
            ping_view,
            pong_view,
            bloom_a_view,
            bloom_b_view,
            _textures: [hdr, ping, pong, bloom_a, bloom_b],
        }
    }

    pub(crate) fn view(&self, slot: Slot) -> &wgpu::TextureView {
        match slot {
            Slot::Hdr => &self.hdr_view,
            Slot::Ping => &self.ping_view,
            Slot::Pong => &self.pong_view,
        }
    }
}
