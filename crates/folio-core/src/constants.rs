use glam::Vec3;

// Shared scene/animation tuning constants used by both web and native frontends.

// Scene function
pub const ROTATION_AXIS: Vec3 = Vec3::new(0.3, 1.0, 0.2); // normalized by the rotation routine
pub const ROTATION_RATE: f32 = 0.2; // angle = time * rate * amplitude
pub const SPHERE_RADIUS: f32 = 1.0;
pub const SMOOTH_K: f32 = -0.01; // smooth-min constant for sphere/gyroid blend
pub const BLEND_OFFSET: f32 = 0.03; // added to each blended branch
pub const SHELL_THICKNESS: f32 = 0.04; // |g| - thickness when creepiness is on

// Raymarcher
pub const MAX_STEPS: u32 = 256;
pub const MAX_DISTANCE: f32 = 5.0;
pub const HIT_EPSILON: f32 = 1e-4;
pub const NORMAL_EPSILON: f32 = 1e-4;
pub const POINTER_SENSITIVITY: f32 = 0.07;

// Palette
pub const BACKGROUND_COLOR: Vec3 = Vec3::new(0.07, 0.20, 0.35); // dark teal
pub const VIGNETTE_RADIUS: f32 = 0.7;
pub const CORE_COLOR: Vec3 = Vec3::new(1.0, 0.5, 0.0); // near the origin
pub const RIM_COLOR: Vec3 = Vec3::new(0.0, 0.0, 0.05); // towards the sphere shell
pub const FRESNEL_TINT: Vec3 = Vec3::new(0.0, 0.48, 0.80);
pub const FRESNEL_WEIGHT: f32 = 0.8;
pub const FRESNEL_POWER: f32 = 3.0;

// Frame driver
pub const POINTER_SMOOTHING: f32 = 0.05; // lerp factor per frame
pub const POINTER_SCALE: f32 = 0.5; // raw pointer in [-1,1] is halved before smoothing

// Camera clamp shared by drift animator and config validation
pub const CAMERA_MIN: f32 = 1.2;
pub const CAMERA_MAX: f32 = 6.0;

// Debug panel slider bounds
pub const PANEL_SCALE_MAX: f32 = 20.0;
pub const PANEL_DISTORTION_MAX: f32 = 2.0;
pub const PANEL_ROTATION_AMPLITUDE_MAX: f32 = 3.0;

// Initial distortion target before the first retarget
pub const INITIAL_DISTORTION_MAX: f32 = 1.0;

// Tone mapping
pub const EXPOSURE_POWER: i32 = 4;

// Loading screen exit transition (ms), slightly longer than the CSS transition
pub const LOADING_EXIT_MS: f64 = 420.0;
