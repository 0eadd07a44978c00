mod pointer;

pub use pointer::wire_pointer;

use crate::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keep the canvas backing store in sync with its CSS size. Returns the
/// pixel ratio of the initial sizing.
pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) -> f64 {
    let pixel_ratio = dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
    pixel_ratio
}

/// Call `handler` once the document has finished loading (immediately if it
/// already has).
pub fn on_document_load(window: &web::Window, handler: impl FnOnce() + 'static) {
    let complete = window
        .document()
        .map(|d| d.ready_state() == "complete")
        .unwrap_or(false);
    if complete {
        handler();
        return;
    }
    let closure = Closure::once(handler);
    _ = window.add_event_listener_with_callback("load", closure.as_ref().unchecked_ref());
    closure.forget();
}
