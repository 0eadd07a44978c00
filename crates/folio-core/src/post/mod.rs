//! Ordered, enable-gated chain of full-screen filters:
//! anti-aliasing → bloom → focus blur → colour tint, followed by tone mapping.
//!
//! The chain is described once here and executed either by the GPU renderer
//! (`post.wgsl`) or by the CPU reference filters in [`filters`].

pub mod filters;

use crate::config::PostConfig;
use crate::constants::EXPOSURE_POWER;
use crate::error::TuneError;
use crate::image::Frame;
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassKind {
    Fxaa,
    Bloom,
    Focus,
    Tint,
}

impl PassKind {
    pub fn name(&self) -> &'static str {
        match self {
            PassKind::Fxaa => "fxaa",
            PassKind::Bloom => "bloom",
            PassKind::Focus => "focus",
            PassKind::Tint => "tint",
        }
    }
}

/// Value of a named pass parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Vec3(Vec3),
    Bool(bool),
}

impl ParamValue {
    pub(crate) fn as_f32(self, name: &str) -> Result<f32, TuneError> {
        match self {
            ParamValue::Float(v) => Ok(v),
            _ => Err(TuneError::WrongKind {
                name: name.to_string(),
                expected: "float",
            }),
        }
    }

    pub(crate) fn as_vec3(self, name: &str) -> Result<Vec3, TuneError> {
        match self {
            ParamValue::Vec3(v) => Ok(v),
            _ => Err(TuneError::WrongKind {
                name: name.to_string(),
                expected: "vec3",
            }),
        }
    }

    pub(crate) fn as_bool(self, name: &str) -> Result<bool, TuneError> {
        match self {
            ParamValue::Bool(v) => Ok(v),
            _ => Err(TuneError::WrongKind {
                name: name.to_string(),
                expected: "bool",
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PassSettings {
    Fxaa,
    Bloom {
        exposure: f32,
        strength: f32,
        radius: f32,
        threshold: f32,
    },
    Focus {
        focus: f32,
        max_blur: f32,
    },
    Tint {
        tint: Vec3,
        intensity: f32,
        chroma: f32,
    },
}

impl PassSettings {
    pub fn kind(&self) -> PassKind {
        match self {
            PassSettings::Fxaa => PassKind::Fxaa,
            PassSettings::Bloom { .. } => PassKind::Bloom,
            PassSettings::Focus { .. } => PassKind::Focus,
            PassSettings::Tint { .. } => PassKind::Tint,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PostPass {
    pub enabled: bool,
    pub order_index: u32,
    pub settings: PassSettings,
}

impl PostPass {
    pub fn kind(&self) -> PassKind {
        self.settings.kind()
    }

    /// Named parameters for inspection by a tuning panel.
    pub fn params(&self) -> SmallVec<[(&'static str, ParamValue); 4]> {
        let mut out = SmallVec::new();
        match &self.settings {
            PassSettings::Fxaa => {}
            PassSettings::Bloom {
                exposure,
                strength,
                radius,
                threshold,
            } => {
                out.push(("exposure", ParamValue::Float(*exposure)));
                out.push(("strength", ParamValue::Float(*strength)));
                out.push(("radius", ParamValue::Float(*radius)));
                out.push(("threshold", ParamValue::Float(*threshold)));
            }
            PassSettings::Focus { focus, max_blur } => {
                out.push(("focus", ParamValue::Float(*focus)));
                out.push(("max_blur", ParamValue::Float(*max_blur)));
            }
            PassSettings::Tint {
                tint,
                intensity,
                chroma,
            } => {
                out.push(("tint", ParamValue::Vec3(*tint)));
                out.push(("intensity", ParamValue::Float(*intensity)));
                out.push(("chroma", ParamValue::Float(*chroma)));
            }
        }
        out
    }

    pub fn set_param(&mut self, name: &str, value: ParamValue) -> Result<(), TuneError> {
        let pass = self.kind().name();
        let slot: &mut f32 = match (&mut self.settings, name) {
            (PassSettings::Bloom { exposure, .. }, "exposure") => exposure,
            (PassSettings::Bloom { strength, .. }, "strength") => strength,
            (PassSettings::Bloom { radius, .. }, "radius") => radius,
            (PassSettings::Bloom { threshold, .. }, "threshold") => threshold,
            (PassSettings::Focus { focus, .. }, "focus") => focus,
            (PassSettings::Focus { max_blur, .. }, "max_blur") => max_blur,
            (PassSettings::Tint { intensity, .. }, "intensity") => intensity,
            (PassSettings::Tint { chroma, .. }, "chroma") => chroma,
            (PassSettings::Tint { tint, .. }, "tint") => {
                *tint = value.as_vec3(name)?;
                return Ok(());
            }
            _ => {
                return Err(TuneError::UnknownParam {
                    pass,
                    name: name.to_string(),
                })
            }
        };
        *slot = value.as_f32(name)?;
        Ok(())
    }
}

/// Uniform block shared by every entry point in `post.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostUniforms {
    pub resolution: [f32; 2],
    pub blur_dir: [f32; 2],
    pub threshold: f32,
    pub strength: f32,
    pub radius: f32,
    pub exposure: f32,
    pub focus: f32,
    pub max_blur: f32,
    pub chroma: f32,
    pub intensity: f32,
    pub tint: [f32; 3],
    pub _pad: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PostChain {
    passes: SmallVec<[PostPass; 4]>,
}

impl PostChain {
    pub fn from_config(config: &PostConfig) -> Self {
        let passes = [
            PostPass {
                enabled: config.fxaa.enabled,
                order_index: 0,
                settings: PassSettings::Fxaa,
            },
            PostPass {
                enabled: config.bloom.enabled,
                order_index: 1,
                settings: PassSettings::Bloom {
                    exposure: config.bloom.exposure,
                    strength: config.bloom.strength,
                    radius: config.bloom.radius,
                    threshold: config.bloom.threshold,
                },
            },
            PostPass {
                enabled: config.focus.enabled,
                order_index: 2,
                settings: PassSettings::Focus {
                    focus: config.focus.focus,
                    max_blur: config.focus.max_blur,
                },
            },
            PostPass {
                enabled: config.tint.enabled,
                order_index: 3,
                settings: PassSettings::Tint {
                    tint: config.tint.tint,
                    intensity: config.tint.intensity,
                    chroma: config.tint.chroma,
                },
            },
        ];
        Self::new(passes)
    }

    /// Build a chain from arbitrary passes; they run sorted by `order_index`.
    pub fn new(passes: impl IntoIterator<Item = PostPass>) -> Self {
        let mut passes: SmallVec<[PostPass; 4]> = passes.into_iter().collect();
        passes.sort_by_key(|p| p.order_index);
        Self { passes }
    }

    pub fn passes(&self) -> &[PostPass] {
        &self.passes
    }

    pub fn pass(&self, kind: PassKind) -> Option<&PostPass> {
        self.passes.iter().find(|p| p.kind() == kind)
    }

    pub fn pass_mut(&mut self, kind: PassKind) -> Option<&mut PostPass> {
        self.passes.iter_mut().find(|p| p.kind() == kind)
    }

    pub fn set_enabled(&mut self, kind: PassKind, enabled: bool) {
        if let Some(p) = self.pass_mut(kind) {
            p.enabled = enabled;
        }
    }

    pub fn is_enabled(&self, kind: PassKind) -> bool {
        self.pass(kind).map(|p| p.enabled).unwrap_or(false)
    }

    pub fn enabled_passes(&self) -> impl Iterator<Item = &PostPass> {
        self.passes.iter().filter(|p| p.enabled)
    }

    /// Renderer exposure: `exposure^4` while bloom is enabled, otherwise 1.
    pub fn tone_mapping_exposure(&self) -> f32 {
        match self.pass(PassKind::Bloom) {
            Some(PostPass {
                enabled: true,
                settings: PassSettings::Bloom { exposure, .. },
                ..
            }) => exposure.powi(EXPOSURE_POWER),
            _ => 1.0,
        }
    }

    /// Pack every pass's settings into one uniform block. Disabled passes keep
    /// their last values; the renderer skips them.
    pub fn uniforms(&self, resolution: [f32; 2]) -> PostUniforms {
        let mut u = PostUniforms {
            resolution,
            exposure: self.tone_mapping_exposure(),
            ..Default::default()
        };
        for pass in &self.passes {
            match &pass.settings {
                PassSettings::Fxaa => {}
                PassSettings::Bloom {
                    strength,
                    radius,
                    threshold,
                    ..
                } => {
                    u.strength = *strength;
                    u.radius = *radius;
                    u.threshold = *threshold;
                }
                PassSettings::Focus { focus, max_blur } => {
                    u.focus = *focus;
                    u.max_blur = *max_blur;
                }
                PassSettings::Tint {
                    tint,
                    intensity,
                    chroma,
                } => {
                    u.tint = tint.to_array();
                    u.intensity = *intensity;
                    u.chroma = *chroma;
                }
            }
        }
        u
    }

    /// Run the enabled passes in order on the CPU, then tone map.
    pub fn apply(&self, frame: &Frame) -> Frame {
        let mut current = frame.clone();
        for pass in self.enabled_passes() {
            current = filters::apply_pass(&current, &pass.settings);
        }
        filters::tone_map(&current, self.tone_mapping_exposure())
    }
}

impl Default for PostChain {
    fn default() -> Self {
        Self::from_config(&PostConfig::default())
    }
}
