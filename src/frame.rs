use crate::dom;
use crate::render::GpuState;
use folio_core::{FrameClock, FrameDriver, Viewport};
use glam::Vec2;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub driver: FrameDriver<GpuState>,
    pub canvas: web::HtmlCanvasElement,
    pub pointer: Rc<Cell<Vec2>>,
    pub started: Instant,
    pub last_instant: Instant,
}

impl FrameContext {
    /// One animation frame. Returns `false` once rendering cannot continue.
    pub fn frame(&mut self) -> bool {
        let now = Instant::now();
        let delta = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let elapsed = (now - self.started).as_secs_f32();

        let dpr = web::window()
            .map(|w| dom::render_pixel_ratio(&w))
            .unwrap_or(1.0);
        let viewport = Viewport {
            width: self.canvas.width(),
            height: self.canvas.height(),
            pixel_ratio: dpr as f32,
        };
        self.driver
            .tick(FrameClock::new(elapsed, delta), viewport, self.pointer.get());
        !self.driver.backend().is_fatal()
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut ctx = frame_ctx.borrow_mut();
        if !ctx.frame() {
            ctx.driver.detach();
            return;
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
