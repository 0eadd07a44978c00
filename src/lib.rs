#![cfg(target_arch = "wasm32")]
use folio_core::{AutoplayEvent, FrameDriver, LandingConfig, LoadingGate, Viewport};
use glam::Vec2;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

use constants::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn load_config(window: &web::Window) -> LandingConfig {
    let mut config = LandingConfig::default();
    let search = window.location().search().unwrap_or_default();
    if let Err(e) = config.apply_overrides(&search) {
        log::warn!("[config] {}; using defaults", e);
        config = LandingConfig::default();
    }
    config
}

fn wire_loading_screen(window: &web::Window, document: &web::Document, audio: &audio::BackgroundAudio) {
    let gate = Rc::new(RefCell::new(LoadingGate::new()));
    overlay::show_loading(document);

    let gate_ready = gate.clone();
    let doc_ready = document.clone();
    events::on_document_load(window, move || {
        gate_ready.borrow_mut().assets_ready();
        overlay::show_ready(&doc_ready);
    });

    let doc_continue = document.clone();
    let audio_continue = audio.clone();
    dom::add_click_listener(document, LOADING_CONTINUE_ID, move || {
        let Some(event) = gate.borrow_mut().continue_pressed() else {
            return;
        };
        overlay::start_exit(&doc_continue);
        audio_continue.send(event);
        let gate_exit = gate.clone();
        let doc_exit = doc_continue.clone();
        let exit_ms = folio_core::LOADING_EXIT_MS;
        dom::set_timeout(exit_ms as i32, move || {
            gate_exit.borrow_mut().exit_elapsed(exit_ms);
            if !gate_exit.borrow().is_visible() {
                overlay::hide(&doc_exit);
                log::info!("[loading] hidden");
            }
        });
    });
}

fn wire_audio(document: &web::Document, config: &LandingConfig) -> anyhow::Result<audio::BackgroundAudio> {
    let audio = audio::BackgroundAudio::new(document, &config.audio)?;
    if let Some(bars) = document.get_element_by_id(SOUND_BARS_ID) {
        audio.subscribe(Box::new(audio::SoundBars::new(bars)));
    }
    let audio_toggle = audio.clone();
    dom::add_click_listener(document, SOUND_TOGGLE_ID, move || {
        audio_toggle.send(AutoplayEvent::ToggleMute);
    });
    audio.send(AutoplayEvent::Start);
    Ok(audio)
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let config = load_config(&window);

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let pixel_ratio = events::wire_canvas_resize(&canvas);

    let audio = wire_audio(&document, &config)?;
    wire_loading_screen(&window, &document, &audio);

    let pointer = Rc::new(Cell::new(Vec2::ZERO));
    events::wire_pointer(&window, pointer.clone());

    let gpu = render::GpuState::new(&canvas).await?;
    let viewport = Viewport {
        width: canvas.width(),
        height: canvas.height(),
        pixel_ratio: pixel_ratio as f32,
    };
    let driver = FrameDriver::new(gpu, &config, viewport);

    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        driver,
        canvas,
        pointer,
        started: now,
        last_instant: now,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
