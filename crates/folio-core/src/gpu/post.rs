use super::helpers::{self, HDR_FORMAT};
use crate::post::PostUniforms;

/// Post stages that need their own uniform block within one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Stage {
    Fxaa,
    Bright,
    BlurH,
    BlurV,
    Bloom,
    Focus,
    Tint,
    Composite,
}

impl Stage {
    pub(crate) const ALL: [Stage; 8] = [
        Stage::Fxaa,
        Stage::Bright,
        Stage::BlurH,
        Stage::BlurV,
        Stage::Bloom,
        Stage::Focus,
        Stage::Tint,
        Stage::Composite,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Stage::Fxaa => "fxaa",
            Stage::Bright => "bright_pass",
            Stage::BlurH => "blur_h",
            Stage::BlurV => "blur_v",
            Stage::Bloom => "bloom_add",
            Stage::Focus => "focus",
            Stage::Tint => "tint",
            Stage::Composite => "composite",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    pub(crate) sampler: wgpu::Sampler,
    buffers: Vec<wgpu::Buffer>,
    pub(crate) fxaa_pipeline: wgpu::RenderPipeline,
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) bloom_pipeline: wgpu::RenderPipeline,
    pub(crate) focus_pipeline: wgpu::RenderPipeline,
    pub(crate) tint_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

impl PostResources {
    pub(crate) fn new(device: &wgpu::Device, output_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::POST_WGSL.into()),
        });
        let [tex, smp] = helpers::texture_entries(0);
        let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl0"),
            entries: &[tex, smp, helpers::uniform_entry(2)],
        });
        let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl1"),
            entries: &helpers::texture_entries(0),
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let buffers = Stage::ALL
            .iter()
            .map(|s| {
                helpers::uniform_buffer(device, s.label(), std::mem::size_of::<PostUniforms>())
            })
            .collect();

        let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_single"),
            bind_group_layouts: &[&bgl0],
            push_constant_ranges: &[],
        });
        let pl_dual = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_dual"),
            bind_group_layouts: &[&bgl0, &bgl1],
            push_constant_ranges: &[],
        });
        let make = |label: &str, layout: &wgpu::PipelineLayout, entry: &str, format| {
            helpers::make_fullscreen_pipeline(device, label, layout, &shader, entry, format, None)
        };

        Self {
            fxaa_pipeline: make("fxaa_pipeline", &pl_single, "fs_fxaa", HDR_FORMAT),
            bright_pipeline: make("bright_pipeline", &pl_single, "fs_bright", HDR_FORMAT),
            blur_pipeline: make("blur_pipeline", &pl_single, "fs_blur", HDR_FORMAT),
            bloom_pipeline: make("bloom_pipeline", &pl_dual, "fs_bloom", HDR_FORMAT),
            focus_pipeline: make("focus_pipeline", &pl_single, "fs_focus", HDR_FORMAT),
            tint_pipeline: make("tint_pipeline", &pl_single, "fs_tint", HDR_FORMAT),
            composite_pipeline: helpers::make_fullscreen_pipeline(
                device,
                "composite_pipeline",
                &pl_single,
                &shader,
                "fs_composite",
                output_format,
                Some(wgpu::BlendState::REPLACE),
            ),
            bgl0,
            bgl1,
            sampler,
            buffers,
        }
    }

    pub(crate) fn write(&self, queue: &wgpu::Queue, stage: Stage, uniforms: &PostUniforms) {
        queue.write_buffer(&self.buffers[stage.index()], 0, bytemuck::bytes_of(uniforms));
    }

    /// Group 0 for `stage`: source texture plus that stage's uniforms.
    pub(crate) fn source_group(
        &self,
        device: &wgpu::Device,
        stage: Stage,
        source: &wgpu::TextureView,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(stage.label()),
            layout: &self.bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(source),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.buffers[stage.index()].as_entire_binding(),
                },
            ],
        })
    }

    /// Group 1: a second texture, used by the bloom add.
    pub(crate) fn aux_group(&self, device: &wgpu::Device, aux: &wgpu::TextureView) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("post_aux"),
            layout: &self.bgl1,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(aux),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }
}
