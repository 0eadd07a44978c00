use crate::input;
use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Track the pointer over the whole window as `[-1, 1]` coordinates, y up.
/// Wired once at startup; gestures do not rebind it.
pub fn wire_pointer(window: &web::Window, pointer: Rc<Cell<Vec2>>) {
    let win = window.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
        let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
        pointer.set(input::pointer_ndc(
            ev.client_x() as f32,
            ev.client_y() as f32,
            w,
            h,
        ));
    }) as Box<dyn FnMut(web::PointerEvent)>);
    _ = window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}
