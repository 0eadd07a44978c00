//! Tunable defaults for the scene, the drift animator, the post chain and the
//! background audio.
//!
//! Production builds never change these at runtime; the optional tuning seam
//! in [`crate::tuning`] and the `key=value` overrides below are the only
//! mutators.

use crate::constants::{CAMERA_MAX, CAMERA_MIN};
use crate::error::ConfigError;
use glam::Vec3;
use rand::Rng;

/// Closed interval used for random draws and clamps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        // gen_range panics on an empty or NaN range
        if self.min.is_nan() || self.max.is_nan() || self.max <= self.min {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    #[inline]
    pub fn clamp(&self, v: f32) -> f32 {
        v.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub scale: Vec3,
    pub distortion: f32,
    pub creepiness: bool,
    pub rotation: bool,
    /// Publish the animator's camera distance; when off the configured
    /// distance is held.
    pub auto_zoom: bool,
    pub camera_distance: f32,
    pub rotation_amplitude: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            scale: Vec3::splat(5.0),
            distortion: 0.0,
            creepiness: false,
            rotation: true,
            auto_zoom: true,
            camera_distance: 3.5,
            rotation_amplitude: 0.3,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DriftConfig {
    pub retarget_interval: Span,
    pub initial_speed: f32,
    /// Magnitude of the rotation speed; the sign is drawn separately.
    pub speed: Span,
    pub scale: Span,
    pub distortion: Span,
    pub camera_jitter: f32,
    pub camera_wide_jitter: f32,
    pub wide_zoom_probability: f32,
    pub camera_clamp: Span,
    pub rotation_amplitude: Span,
    /// Per-frame lerp factor for speed, scale and distortion.
    pub lerp_factor: f32,
    pub camera_rate: f32,
    pub rotation_amplitude_rate: f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            retarget_interval: Span::new(3.0, 10.0),
            initial_speed: 0.003,
            speed: Span::new(0.003, 0.02),
            scale: Span::new(3.5, 7.0),
            distortion: Span::new(0.0, 1.2),
            camera_jitter: 1.4,
            camera_wide_jitter: 2.0,
            wide_zoom_probability: 0.45,
            camera_clamp: Span::new(CAMERA_MIN, CAMERA_MAX),
            rotation_amplitude: Span::new(0.3, 1.8),
            lerp_factor: 0.01,
            camera_rate: 6.0,
            rotation_amplitude_rate: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FxaaConfig {
    pub enabled: bool,
}

impl Default for FxaaConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BloomConfig {
    pub enabled: bool,
    pub exposure: f32,
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            exposure: 1.0,
            strength: 3.2,
            radius: 0.7,
            threshold: 0.35,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FocusConfig {
    pub enabled: bool,
    /// Screen-space diameter (uv units) kept sharp around the centre.
    pub focus: f32,
    /// Blur offset in uv units at the far corners.
    pub max_blur: f32,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            focus: 0.5,
            max_blur: 0.004,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TintConfig {
    pub enabled: bool,
    pub tint: Vec3,
    pub intensity: f32,
    pub chroma: f32,
}

impl Default for TintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tint: Vec3::new(0.0, 0.5, 1.0), // cyan-blue
            intensity: 0.18,
            chroma: 0.002,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostConfig {
    pub fxaa: FxaaConfig,
    pub bloom: BloomConfig,
    pub focus: FocusConfig,
    pub tint: TintConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AudioConfig {
    pub source: String,
    pub volume: f32,
    pub looped: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            source: "/web-backgroundmusic.mp3".to_string(),
            volume: 0.2,
            looped: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandingConfig {
    pub scene: SceneConfig,
    pub drift: DriftConfig,
    pub post: PostConfig,
    pub audio: AudioConfig,
    /// Fixed seed for the drift animator; `None` draws from entropy.
    pub seed: Option<u64>,
}

fn check_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn check_span(name: &'static str, span: Span) -> Result<(), ConfigError> {
    check_range(name, span.max, span.min, f32::MAX)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidOverride {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_f32(key: &str, value: &str) -> Result<f32, ConfigError> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidOverride {
            key: key.to_string(),
            value: value.to_string(),
        })
}

impl LandingConfig {
    /// Check every documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.scene;
        check_positive("scene.scale.x", s.scale.x)?;
        check_positive("scene.scale.y", s.scale.y)?;
        check_positive("scene.scale.z", s.scale.z)?;
        check_range("scene.distortion", s.distortion, 0.0, 2.0)?;
        check_range("scene.camera_distance", s.camera_distance, CAMERA_MIN, CAMERA_MAX)?;
        check_range("scene.rotation_amplitude", s.rotation_amplitude, 0.0, 3.0)?;

        let d = &self.drift;
        check_span("drift.retarget_interval", d.retarget_interval)?;
        check_positive("drift.retarget_interval.min", d.retarget_interval.min)?;
        check_span("drift.speed", d.speed)?;
        check_span("drift.scale", d.scale)?;
        check_positive("drift.scale.min", d.scale.min)?;
        check_span("drift.distortion", d.distortion)?;
        check_range("drift.distortion.min", d.distortion.min, 0.0, 2.0)?;
        check_range("drift.distortion.max", d.distortion.max, 0.0, 2.0)?;
        check_range("drift.camera_clamp.min", d.camera_clamp.min, CAMERA_MIN, CAMERA_MAX)?;
        check_range("drift.camera_clamp.max", d.camera_clamp.max, d.camera_clamp.min, CAMERA_MAX)?;
        check_span("drift.rotation_amplitude", d.rotation_amplitude)?;
        check_range("drift.rotation_amplitude.max", d.rotation_amplitude.max, 0.0, 3.0)?;
        check_range("drift.wide_zoom_probability", d.wide_zoom_probability, 0.0, 1.0)?;
        check_range("drift.lerp_factor", d.lerp_factor, 0.0, 1.0)?;
        check_positive("drift.camera_rate", d.camera_rate)?;
        check_positive("drift.rotation_amplitude_rate", d.rotation_amplitude_rate)?;

        let p = &self.post;
        check_range("bloom.exposure", p.bloom.exposure, 0.0, 4.0)?;
        check_range("bloom.strength", p.bloom.strength, 0.0, 10.0)?;
        check_range("bloom.radius", p.bloom.radius, 0.0, 1.0)?;
        check_range("bloom.threshold", p.bloom.threshold, 0.0, 1.0)?;
        check_range("focus.focus", p.focus.focus, 0.0, 2.0)?;
        check_range("focus.max_blur", p.focus.max_blur, 0.0, 0.05)?;
        check_range("tint.intensity", p.tint.intensity, 0.0, 1.0)?;
        check_range("tint.chroma", p.tint.chroma, 0.0, 0.01)?;

        check_range("audio.volume", self.audio.volume, 0.0, 1.0)?;
        Ok(())
    }

    /// Apply `key=value` pairs separated by `&` (a URL query string, with or
    /// without the leading `?`). Unknown keys are ignored.
    pub fn apply_overrides(&mut self, query: &str) -> Result<(), ConfigError> {
        let query = query.trim_start_matches('?');
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, "1"));
            match key {
                "seed" => {
                    let seed = value.parse::<u64>().map_err(|_| ConfigError::InvalidOverride {
                        key: key.to_string(),
                        value: value.to_string(),
                    })?;
                    self.seed = Some(seed);
                }
                "creepiness" => self.scene.creepiness = parse_bool(key, value)?,
                "rotation" => self.scene.rotation = parse_bool(key, value)?,
                "autozoom" => self.scene.auto_zoom = parse_bool(key, value)?,
                "camz" => self.scene.camera_distance = parse_f32(key, value)?,
                "bloom" => self.post.bloom.enabled = parse_bool(key, value)?,
                "exposure" => self.post.bloom.exposure = parse_f32(key, value)?,
                "fxaa" => self.post.fxaa.enabled = parse_bool(key, value)?,
                "focus" => self.post.focus.enabled = parse_bool(key, value)?,
                "tint" => self.post.tint.enabled = parse_bool(key, value)?,
                other => log::warn!("[config] ignoring unknown override `{}`", other),
            }
        }
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(LandingConfig::default().validate(), Ok(()));
    }

    #[test]
    fn overrides_apply_and_validate() {
        let mut cfg = LandingConfig::default();
        cfg.apply_overrides("?seed=7&creepiness=1&bloom=off&exposure=1.2&camz=4")
            .unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert!(cfg.scene.creepiness);
        assert!(!cfg.post.bloom.enabled);
        assert!((cfg.post.bloom.exposure - 1.2).abs() < 1e-6);
        assert!((cfg.scene.camera_distance - 4.0).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_override_is_rejected() {
        let mut cfg = LandingConfig::default();
        let err = cfg.apply_overrides("camz=9").unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { name: "scene.camera_distance", .. }));
    }

    #[test]
    fn malformed_override_is_rejected() {
        let mut cfg = LandingConfig::default();
        let err = cfg.apply_overrides("bloom=maybe").unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidOverride {
                key: "bloom".into(),
                value: "maybe".into()
            }
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut cfg = LandingConfig::default();
        cfg.apply_overrides("utm_source=mail").unwrap();
        assert_eq!(cfg, LandingConfig::default());
    }

    #[test]
    fn degenerate_span_samples_its_min() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        assert_eq!(Span::new(2.0, 2.0).sample(&mut rng), 2.0);
        assert_eq!(Span::new(3.0, 1.0).sample(&mut rng), 3.0);
        assert!(Span::new(f32::NAN, f32::NAN).sample(&mut rng).is_nan());
        assert_eq!(Span::new(1.0, f32::NAN).sample(&mut rng), 1.0);
    }
}
