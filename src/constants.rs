// DOM ids, class names and the mobile rendering policy.
//
// Kept free of web-sys so host tests can include this file directly.

// Elements provided by index.html
pub const CANVAS_ID: &str = "app-canvas";
pub const LOADING_ID: &str = "loading-screen";
pub const LOADING_TEXT_ID: &str = "loading-text";
pub const LOADING_CONTINUE_ID: &str = "loading-continue";
pub const SOUND_BARS_ID: &str = "sound-bars";
pub const SOUND_TOGGLE_ID: &str = "sound-toggle";

// Classes toggled from Rust; the stylesheet owns the visuals
pub const CLASS_READY: &str = "ready";
pub const CLASS_EXITING: &str = "exiting";
pub const CLASS_HIDDEN: &str = "hidden";
pub const CLASS_PLAYING: &str = "playing";
pub const CLASS_STOPPED: &str = "stopped";

pub const LOADING_TEXT: &str = "Loading";
pub const CONTINUE_TEXT: &str = "Tap to continue";

// Mobile policy: coarse pointer or narrow viewport caps the device pixel ratio
pub const MOBILE_MEDIA_QUERY: &str = "(pointer: coarse), (max-width: 900px)";
pub const MOBILE_DPR_CAP: f64 = 1.5;
