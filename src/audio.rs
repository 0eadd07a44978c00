//! `<audio>` element driven by the core autoplay machine.

use crate::overlay;
use folio_core::audio::sound_bars_class;
use folio_core::config::AudioConfig;
use folio_core::{AudioCommand, AudioHub, AudioObserver, AudioStatus, AutoplayEvent};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[derive(Clone)]
pub struct BackgroundAudio {
    element: web::HtmlAudioElement,
    hub: Rc<RefCell<AudioHub>>,
}

impl BackgroundAudio {
    pub fn new(document: &web::Document, config: &AudioConfig) -> anyhow::Result<Self> {
        let element: web::HtmlAudioElement = document
            .create_element("audio")
            .map_err(|e| anyhow::anyhow!("create audio: {:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("not an audio element: {:?}", e))?;
        element.set_src(&config.source);
        element.set_loop(config.looped);
        element.set_volume(config.volume as f64);
        element.set_preload("auto");
        if let Some(body) = document.body() {
            _ = body.append_child(&element);
        }
        log::info!("[audio] source={} volume={:.2}", config.source, config.volume);
        Ok(Self {
            element,
            hub: Rc::new(RefCell::new(AudioHub::new())),
        })
    }

    pub fn subscribe(&self, observer: Box<dyn AudioObserver>) {
        self.hub.borrow_mut().subscribe(observer);
    }

    /// Feed `event` to the autoplay machine and carry out its command.
    pub fn send(&self, event: AutoplayEvent) {
        let command = self.hub.borrow_mut().dispatch(event);
        if let Some(c) = command {
            self.execute(c);
        }
    }

    fn execute(&self, command: AudioCommand) {
        match command {
            AudioCommand::Play { muted } => {
                self.element.set_muted(muted);
                self.play();
            }
            AudioCommand::SetMuted(muted) => {
                self.element.set_muted(muted);
                if self.element.paused() {
                    self.play();
                }
            }
        }
    }

    fn play(&self) {
        match self.element.play() {
            Ok(promise) => {
                let this = self.clone();
                spawn_local(async move {
                    let event = match JsFuture::from(promise).await {
                        Ok(_) => AutoplayEvent::PlaySucceeded,
                        Err(e) => {
                            log::warn!("[audio] play rejected: {:?}", e);
                            AutoplayEvent::PlayFailed
                        }
                    };
                    this.send(event);
                });
            }
            Err(e) => {
                log::warn!("[audio] play threw: {:?}", e);
                self.send(AutoplayEvent::PlayFailed);
            }
        }
    }
}

/// Hero overlay sound bars.
pub struct SoundBars {
    element: web::Element,
}

impl SoundBars {
    pub fn new(element: web::Element) -> Self {
        Self { element }
    }
}

impl AudioObserver for SoundBars {
    fn on_status(&mut self, status: AudioStatus) {
        overlay::set_sound_bars(&self.element, sound_bars_class(status));
    }
}
