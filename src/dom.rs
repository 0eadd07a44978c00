use crate::constants::{MOBILE_DPR_CAP, MOBILE_MEDIA_QUERY};
use crate::input;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] missing #{}", element_id);
    }
}

/// Run `handler` once after `ms` milliseconds.
pub fn set_timeout(ms: i32, handler: impl FnOnce() + 'static) {
    let closure = Closure::once(handler);
    if let Some(w) = web::window() {
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ms,
        );
    }
    closure.forget();
}

pub fn is_mobile(window: &web::Window) -> bool {
    window
        .match_media(MOBILE_MEDIA_QUERY)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Device pixel ratio the canvas renders at: capped on mobile.
pub fn render_pixel_ratio(window: &web::Window) -> f64 {
    input::effective_dpr(window.device_pixel_ratio(), is_mobile(window), MOBILE_DPR_CAP)
}

/// Resize the canvas backing store to its CSS size times the (possibly capped)
/// device pixel ratio. Returns the ratio used.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> f64 {
    let Some(w) = web::window() else {
        return 1.0;
    };
    let dpr = render_pixel_ratio(&w);
    let rect = canvas.get_bounding_client_rect();
    let (w_px, h_px) = input::backing_size(rect.width(), rect.height(), dpr);
    if canvas.width() != w_px || canvas.height() != h_px {
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
    dpr
}
