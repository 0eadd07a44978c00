//! wgpu renderer shared by the web and native frontends. The frontend owns
//! the surface, device and queue; this module owns every pipeline and
//! offscreen target and records one frame into a caller-provided view.

mod helpers;
mod post;
mod targets;

pub use helpers::HDR_FORMAT;

use crate::post::{PassKind, PostChain, PostUniforms};
use crate::state::{RenderParameters, SceneUniforms};
use post::{PostResources, Stage};
use targets::{RenderTargets, Slot};

pub struct GpuRenderer {
    scene_pipeline: wgpu::RenderPipeline,
    scene_uniforms: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    post: PostResources,
    targets: RenderTargets,
    width: u32,
    height: u32,
}

impl GpuRenderer {
    /// `output_format` is the format of the views later passed to [`render`].
    ///
    /// [`render`]: GpuRenderer::render
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::SCENE_WGSL.into()),
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[helpers::uniform_entry(0)],
        });
        let scene_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let scene_pipeline = helpers::make_fullscreen_pipeline(
            device,
            "scene_pipeline",
            &scene_pl,
            &shader,
            "fs_scene",
            HDR_FORMAT,
            None,
        );
        let scene_uniforms = helpers::uniform_buffer(
            device,
            "scene_uniforms",
            std::mem::size_of::<SceneUniforms>(),
        );
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniforms.as_entire_binding(),
            }],
        });
        log::info!("[gpu] renderer ready {}x{} -> {:?}", width, height, output_format);
        Self {
            scene_pipeline,
            scene_uniforms,
            scene_bind_group,
            post: PostResources::new(device, output_format),
            targets: RenderTargets::new(device, width, height),
            width,
            height,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Recreate offscreen targets when the drawable size changes.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.targets = RenderTargets::new(device, width, height);
        log::debug!("[gpu] resized to {}x{}", width, height);
    }

    /// Record and submit one frame: scene, enabled post passes in order, then
    /// tone mapping into `output`.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        output: &wgpu::TextureView,
        params: &RenderParameters,
        chain: &PostChain,
    ) {
        queue.write_buffer(
            &self.scene_uniforms,
            0,
            bytemuck::bytes_of(&SceneUniforms::from(params)),
        );
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });
        helpers::blit(
            &mut encoder,
            "scene_pass",
            &self.targets.hdr_view,
            &self.scene_pipeline,
            &self.scene_bind_group,
            None,
        );

        let full = [self.width as f32, self.height as f32];
        let half = [
            (self.width / 2).max(1) as f32,
            (self.height / 2).max(1) as f32,
        ];
        let base = chain.uniforms(full);
        let p = &self.post;

        let mut src = Slot::Hdr;
        for pass in chain.enabled_passes() {
            let dst = src.next();
            let src_view = self.targets.view(src);
            let dst_view = self.targets.view(dst);
            match pass.kind() {
                PassKind::Fxaa => {
                    p.write(queue, Stage::Fxaa, &base);
                    let bg = p.source_group(device, Stage::Fxaa, src_view);
                    helpers::blit(&mut encoder, "fxaa", dst_view, &p.fxaa_pipeline, &bg, None);
                }
                PassKind::Bloom => {
                    let a = &self.targets.bloom_a_view;
                    let b = &self.targets.bloom_b_view;
                    p.write(queue, Stage::Bright, &base);
                    let bg = p.source_group(device, Stage::Bright, src_view);
                    helpers::blit(&mut encoder, "bright_pass", a, &p.bright_pipeline, &bg, None);

                    let blur_h = PostUniforms {
                        resolution: half,
                        blur_dir: [1.0, 0.0],
                        ..base
                    };
                    p.write(queue, Stage::BlurH, &blur_h);
                    let bg = p.source_group(device, Stage::BlurH, a);
                    helpers::blit(&mut encoder, "blur_h", b, &p.blur_pipeline, &bg, None);

                    let blur_v = PostUniforms {
                        blur_dir: [0.0, 1.0],
                        ..blur_h
                    };
                    p.write(queue, Stage::BlurV, &blur_v);
                    let bg = p.source_group(device, Stage::BlurV, b);
                    helpers::blit(&mut encoder, "blur_v", a, &p.blur_pipeline, &bg, None);

                    p.write(queue, Stage::Bloom, &base);
                    let bg = p.source_group(device, Stage::Bloom, src_view);
                    let aux = p.aux_group(device, a);
                    helpers::blit(
                        &mut encoder,
                        "bloom_add",
                        dst_view,
                        &p.bloom_pipeline,
                        &bg,
                        Some(&aux),
                    );
                }
                PassKind::Focus => {
                    p.write(queue, Stage::Focus, &base);
                    let bg = p.source_group(device, Stage::Focus, src_view);
                    helpers::blit(&mut encoder, "focus", dst_view, &p.focus_pipeline, &bg, None);
                }
                PassKind::Tint => {
                    p.write(queue, Stage::Tint, &base);
                    let bg = p.source_group(device, Stage::Tint, src_view);
                    helpers::blit(&mut encoder, "tint", dst_view, &p.tint_pipeline, &bg, None);
                }
            }
            src = dst;
        }

        p.write(queue, Stage::Composite, &base);
        let bg = p.source_group(device, Stage::Composite, self.targets.view(src));
        helpers::blit(&mut encoder, "composite", output, &p.composite_pipeline, &bg, None);

        queue.submit(Some(encoder.finish()));
    }
}
