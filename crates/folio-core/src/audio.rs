//! Background track policy: try audible autoplay, fall back to muted, and
//! wait for a user gesture when the platform blocks both. Frontends execute
//! the returned [`AudioCommand`]s and report outcomes back as events.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AutoplayState {
    #[default]
    Idle,
    /// A play request is in flight.
    Attempting { muted: bool },
    PlayingAudible,
    PlayingMuted,
    /// Both attempts were refused; the next gesture retries.
    AwaitingGesture,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoplayEvent {
    Start,
    PlaySucceeded,
    PlayFailed,
    UserGesture,
    ToggleMute,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCommand {
    Play { muted: bool },
    SetMuted(bool),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AudioStatus {
    pub is_playing: bool,
    pub muted: bool,
}

impl fmt::Display for AudioStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_playing, self.muted) {
            (true, false) => write!(f, "playing"),
            (true, true) => write!(f, "playing muted"),
            (false, _) => write!(f, "stopped"),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AutoplayMachine {
    state: AutoplayState,
}

impl AutoplayMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AutoplayState {
        self.state
    }

    pub fn status(&self) -> AudioStatus {
        match self.state {
            AutoplayState::PlayingAudible => AudioStatus {
                is_playing: true,
                muted: false,
            },
            AutoplayState::PlayingMuted => AudioStatus {
                is_playing: true,
                muted: true,
            },
            AutoplayState::Attempting { muted } => AudioStatus {
                is_playing: false,
                muted,
            },
            AutoplayState::Idle | AutoplayState::AwaitingGesture => AudioStatus::default(),
        }
    }

    /// Advance on `event`; returns what the frontend should do next.
    pub fn handle(&mut self, event: AutoplayEvent) -> Option<AudioCommand> {
        use AutoplayEvent as E;
        use AutoplayState as S;
        let (next, command) = match (self.state, event) {
            (S::Idle, E::Start) => (
                S::Attempting { muted: false },
                Some(AudioCommand::Play { muted: false }),
            ),
            (S::Attempting { muted: false }, E::PlayFailed) => (
                S::Attempting { muted: true },
                Some(AudioCommand::Play { muted: true }),
            ),
            (S::Attempting { muted: true }, E::PlayFailed) => (S::AwaitingGesture, None),
            (S::Attempting { muted }, E::PlaySucceeded) => (
                if muted {
                    S::PlayingMuted
                } else {
                    S::PlayingAudible
                },
                None,
            ),
            (S::PlayingMuted, E::UserGesture | E::ToggleMute) => {
                (S::PlayingAudible, Some(AudioCommand::SetMuted(false)))
            }
            (S::PlayingAudible, E::ToggleMute) => {
                (S::PlayingMuted, Some(AudioCommand::SetMuted(true)))
            }
            (S::AwaitingGesture, E::UserGesture | E::ToggleMute) => (
                S::Attempting { muted: false },
                Some(AudioCommand::Play { muted: false }),
            ),
            (state, _) => (state, None),
        };
        if next != self.state {
            log::info!("[audio] {:?} -> {:?} on {:?}", self.state, next, event);
            self.state = next;
        }
        command
    }
}

/// Receives the audio status whenever it changes.
pub trait AudioObserver {
    fn on_status(&mut self, status: AudioStatus);
}

/// Owns the autoplay machine and fans its status out to observers.
#[derive(Default)]
pub struct AudioHub {
    machine: AutoplayMachine,
    observers: Vec<Box<dyn AudioObserver>>,
    last: AudioStatus,
}

impl AudioHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, mut observer: Box<dyn AudioObserver>) {
        observer.on_status(self.last);
        self.observers.push(observer);
    }

    pub fn status(&self) -> AudioStatus {
        self.last
    }

    pub fn state(&self) -> AutoplayState {
        self.machine.state()
    }

    /// Feed `event` to the machine, notify observers if the status moved, and
    /// return the command for the frontend to execute.
    pub fn dispatch(&mut self, event: AutoplayEvent) -> Option<AudioCommand> {
        let command = self.machine.handle(event);
        let status = self.machine.status();
        if status != self.last {
            self.last = status;
            self.broadcast();
        }
        command
    }

    /// Re-send the current status to every observer.
    pub fn request_state(&mut self) {
        self.broadcast();
    }

    fn broadcast(&mut self) {
        let status = self.last;
        for o in self.observers.iter_mut() {
            o.on_status(status);
        }
    }
}

/// CSS class for the hero sound bars.
pub fn sound_bars_class(status: AudioStatus) -> &'static str {
    if status.is_playing && !status.muted {
        "playing"
    } else {
        "stopped"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_ignores_everything_but_start() {
        let mut m = AutoplayMachine::new();
        assert_eq!(m.handle(AutoplayEvent::PlaySucceeded), None);
        assert_eq!(m.handle(AutoplayEvent::ToggleMute), None);
        assert_eq!(m.state(), AutoplayState::Idle);
    }

    #[test]
    fn sound_bars_follow_status() {
        assert_eq!(
            sound_bars_class(AudioStatus {
                is_playing: true,
                muted: false
            }),
            "playing"
        );
        assert_eq!(
            sound_bars_class(AudioStatus {
                is_playing: true,
                muted: true
            }),
            "stopped"
        );
        assert_eq!(sound_bars_class(AudioStatus::default()), "stopped");
    }
}
