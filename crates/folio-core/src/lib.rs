pub mod audio;
pub mod config;
pub mod constants;
pub mod cpu;
pub mod drift;
pub mod error;
pub mod frame;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod image;
pub mod loading;
pub mod post;
pub mod raymarch;
pub mod sdf;
pub mod state;
pub mod tuning;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use audio::{
    AudioCommand, AudioHub, AudioObserver, AudioStatus, AutoplayEvent, AutoplayMachine,
    AutoplayState,
};
pub use config::{LandingConfig, PostConfig, SceneConfig};
pub use constants::*;
pub use cpu::{CpuBackend, CpuRenderer};
pub use drift::{DriftAnimator, DriftSample, DriftState};
pub use error::{ConfigError, TuneError};
pub use frame::{FrameDriver, RenderBackend};
pub use image::Frame;
pub use loading::{LoadingGate, LoadingPhase};
pub use post::{ParamValue, PassKind, PostChain, PostPass, PostUniforms};
pub use state::*;
pub use tuning::{NoopTuner, PanelTuner, Tuner};
