//! Loading-screen overlay lifecycle.

use crate::audio::AutoplayEvent;
use crate::constants::LOADING_EXIT_MS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingPhase {
    Loading,
    /// Assets are in; the overlay shows "Tap to continue".
    Ready,
    /// Fade-out running.
    Exiting,
    Hidden,
}

#[derive(Clone, Debug)]
pub struct LoadingGate {
    phase: LoadingPhase,
}

impl Default for LoadingGate {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingGate {
    pub fn new() -> Self {
        Self {
            phase: LoadingPhase::Loading,
        }
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase != LoadingPhase::Hidden
    }

    pub fn assets_ready(&mut self) {
        if self.phase == LoadingPhase::Loading {
            self.phase = LoadingPhase::Ready;
            log::info!("[loading] ready");
        }
    }

    /// The continue tap. Only honoured once the overlay is ready; the returned
    /// event is forwarded to the autoplay machine.
    pub fn continue_pressed(&mut self) -> Option<AutoplayEvent> {
        if self.phase != LoadingPhase::Ready {
            return None;
        }
        self.phase = LoadingPhase::Exiting;
        log::info!("[loading] exiting");
        Some(AutoplayEvent::UserGesture)
    }

    /// Milliseconds since the continue tap.
    pub fn exit_elapsed(&mut self, ms: f64) {
        if self.phase == LoadingPhase::Exiting && ms >= LOADING_EXIT_MS {
            self.phase = LoadingPhase::Hidden;
        }
    }
}
