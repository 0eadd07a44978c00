//! Native stand-in for the page's background track: a soft two-voice drone
//! on the default cpal output device, gated by the shared autoplay machine.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use folio_core::{AudioCommand, AudioHub, AutoplayEvent};
use std::f32::consts::TAU;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

const ROOT_HZ: f32 = 55.0;
const FIFTH_HZ: f32 = 82.5;
const SWELL_HZ: f32 = 0.07;

/// Output gain shared with the audio callback as raw `f32` bits.
#[derive(Clone, Default)]
struct Gain(Arc<AtomicU32>);

impl Gain {
    fn set(&self, v: f32) {
        self.0.store(v.to_bits(), Ordering::Relaxed);
    }

    fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }
}

struct Drone {
    sample_rate: f32,
    phase: [f32; 3],
    gain: Gain,
    /// Smoothed gain so mute toggles don't click.
    level: f32,
}

impl Drone {
    fn next(&mut self) -> f32 {
        let incs = [ROOT_HZ, FIFTH_HZ, SWELL_HZ].map(|hz| TAU * hz / self.sample_rate);
        for (p, inc) in self.phase.iter_mut().zip(incs) {
            *p = (*p + inc) % TAU;
        }
        self.level += (self.gain.get() - self.level) * 0.001;
        let swell = 0.75 + 0.25 * self.phase[2].sin();
        let v = 0.6 * self.phase[0].sin() + 0.4 * self.phase[1].sin();
        v * swell * self.level
    }
}

pub struct AmbientBed {
    stream: Option<cpal::Stream>,
    gain: Gain,
    volume: f32,
    hub: AudioHub,
}

impl AmbientBed {
    pub fn new(volume: f32) -> Self {
        Self {
            stream: None,
            gain: Gain::default(),
            volume: volume.clamp(0.0, 1.0),
            hub: AudioHub::new(),
        }
    }

    pub fn hub_mut(&mut self) -> &mut AudioHub {
        &mut self.hub
    }

    /// Feed `event` through the autoplay machine and carry out whatever it
    /// asks for, reporting play outcomes back until it settles.
    pub fn send(&mut self, event: AutoplayEvent) {
        let mut next = Some(event);
        while let Some(event) = next.take() {
            next = match self.hub.dispatch(event) {
                Some(AudioCommand::Play { muted }) => Some(self.play(muted)),
                Some(AudioCommand::SetMuted(muted)) => {
                    self.set_muted(muted);
                    None
                }
                None => None,
            };
        }
    }

    fn set_muted(&self, muted: bool) {
        self.gain.set(if muted { 0.0 } else { self.volume });
    }

    fn play(&mut self, muted: bool) -> AutoplayEvent {
        if self.stream.is_none() {
            match open_stream(self.gain.clone()) {
                Ok(stream) => self.stream = Some(stream),
                Err(e) => {
                    log::warn!("[audio] no output stream: {e:#}");
                    return AutoplayEvent::PlayFailed;
                }
            }
        }
        let Some(stream) = &self.stream else {
            return AutoplayEvent::PlayFailed;
        };
        match stream.play() {
            Ok(()) => {
                self.set_muted(muted);
                AutoplayEvent::PlaySucceeded
            }
            Err(e) => {
                log::warn!("[audio] play refused: {e}");
                AutoplayEvent::PlayFailed
            }
        }
    }
}

fn open_stream(gain: Gain) -> anyhow::Result<cpal::Stream> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("no default output device"))?;
    let config = device.default_output_config()?;
    let channels = config.channels() as usize;
    let mut drone = Drone {
        sample_rate: config.sample_rate().0 as f32,
        phase: [0.0; 3],
        gain,
        level: 0.0,
    };
    let err_fn = |err: cpal::StreamError| log::error!("[audio] stream error: {err}");

    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                for frame in data.chunks_mut(channels) {
                    frame.fill(drone.next());
                }
            },
            err_fn,
            None,
        )?,
        cpal::SampleFormat::I16 => device.build_output_stream(
            &config.into(),
            move |data: &mut [i16], _| {
                for frame in data.chunks_mut(channels) {
                    frame.fill((drone.next() * i16::MAX as f32) as i16);
                }
            },
            err_fn,
            None,
        )?,
        cpal::SampleFormat::U16 => device.build_output_stream(
            &config.into(),
            move |data: &mut [u16], _| {
                for frame in data.chunks_mut(channels) {
                    let v = (drone.next() * 0.5 + 0.5).clamp(0.0, 1.0);
                    frame.fill((v * u16::MAX as f32) as u16);
                }
            },
            err_fn,
            None,
        )?,
        other => anyhow::bail!("unsupported sample format {other:?}"),
    };
    Ok(stream)
}
