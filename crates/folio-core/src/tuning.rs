//! Debug-panel seam. Production runs [`NoopTuner`]; a panel queues edits in a
//! [`PanelTuner`] and the frame driver applies them before the next frame.

use crate::config::SceneConfig;
use crate::constants::{
    CAMERA_MAX, CAMERA_MIN, PANEL_DISTORTION_MAX, PANEL_ROTATION_AMPLITUDE_MAX, PANEL_SCALE_MAX,
};
use crate::error::TuneError;
use crate::post::{ParamValue, PassKind, PostChain};
use rand::Rng;

pub trait Tuner {
    fn tune(&mut self, scene: &mut SceneConfig, post: &mut PostChain);
}

pub struct NoopTuner;

impl Tuner for NoopTuner {
    fn tune(&mut self, _scene: &mut SceneConfig, _post: &mut PostChain) {}
}

/// Round `v` to the nearest multiple of `step`.
#[inline]
fn quantize(v: f32, step: f32) -> f32 {
    (v / step).round() * step
}

/// The panel's "random" button: fresh scale, distortion and creepiness.
pub fn randomize<R: Rng + ?Sized>(scene: &mut SceneConfig, rng: &mut R) {
    scene.scale.x = quantize(rng.gen_range(0.0..=10.0), 0.1);
    scene.scale.y = quantize(rng.gen_range(0.0..=10.0), 0.1);
    scene.scale.z = quantize(rng.gen_range(0.0..=10.0), 0.1);
    scene.distortion = quantize(rng.gen_range(0.0..=1.0), 0.01);
    scene.creepiness = rng.gen::<f32>() > 0.5;
}

fn in_range(name: &str, value: f32, min: f32, max: f32) -> Result<f32, TuneError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(TuneError::OutOfRange {
            name: name.to_string(),
            value,
            min,
            max,
        })
    }
}

/// Set a named scene tunable. Numeric values must be finite and inside the
/// panel's slider range; a rejected edit leaves `scene` untouched.
pub fn set_scene_param(
    scene: &mut SceneConfig,
    name: &str,
    value: ParamValue,
) -> Result<(), TuneError> {
    match name {
        "scale" => {
            let v = value.as_vec3(name)?;
            for c in v.to_array() {
                in_range(name, c, 0.0, PANEL_SCALE_MAX)?;
            }
            scene.scale = v;
        }
        "distortion" => {
            scene.distortion = in_range(name, value.as_f32(name)?, 0.0, PANEL_DISTORTION_MAX)?
        }
        "camera_distance" => {
            scene.camera_distance = in_range(name, value.as_f32(name)?, CAMERA_MIN, CAMERA_MAX)?
        }
        "rotation_amplitude" => {
            scene.rotation_amplitude = in_range(
                name,
                value.as_f32(name)?,
                0.0,
                PANEL_ROTATION_AMPLITUDE_MAX,
            )?
        }
        "creepiness" => scene.creepiness = value.as_bool(name)?,
        "rotation" => scene.rotation = value.as_bool(name)?,
        "auto_zoom" => scene.auto_zoom = value.as_bool(name)?,
        _ => {
            return Err(TuneError::UnknownParam {
                pass: "scene",
                name: name.to_string(),
            })
        }
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq)]
enum Edit {
    Scene(String, ParamValue),
    Pass(PassKind, String, ParamValue),
    Enable(PassKind, bool),
    Randomize,
}

/// Queue of panel edits, drained on the next [`Tuner::tune`].
pub struct PanelTuner<R: Rng> {
    pending: Vec<Edit>,
    rng: R,
}

impl<R: Rng> PanelTuner<R> {
    pub fn new(rng: R) -> Self {
        Self {
            pending: Vec::new(),
            rng,
        }
    }

    pub fn set_scene(&mut self, name: &str, value: ParamValue) {
        self.pending.push(Edit::Scene(name.to_string(), value));
    }

    pub fn set_pass(&mut self, kind: PassKind, name: &str, value: ParamValue) {
        self.pending.push(Edit::Pass(kind, name.to_string(), value));
    }

    pub fn enable_pass(&mut self, kind: PassKind, enabled: bool) {
        self.pending.push(Edit::Enable(kind, enabled));
    }

    pub fn randomize(&mut self) {
        self.pending.push(Edit::Randomize);
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<R: Rng> Tuner for PanelTuner<R> {
    fn tune(&mut self, scene: &mut SceneConfig, post: &mut PostChain) {
        for edit in self.pending.drain(..) {
            let result = match edit {
                Edit::Scene(name, value) => set_scene_param(scene, &name, value),
                Edit::Pass(kind, name, value) => match post.pass_mut(kind) {
                    Some(pass) => pass.set_param(&name, value),
                    None => Err(TuneError::UnknownParam {
                        pass: kind.name(),
                        name,
                    }),
                },
                Edit::Enable(kind, enabled) => {
                    post.set_enabled(kind, enabled);
                    Ok(())
                }
                Edit::Randomize => {
                    randomize(scene, &mut self.rng);
                    Ok(())
                }
            };
            if let Err(e) = result {
                log::warn!("[tuning] {}", e);
            }
        }
    }
}
