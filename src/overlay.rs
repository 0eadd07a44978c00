//! Loading screen and hero sound-bar markup updates.

use crate::constants::*;
use web_sys as web;

pub fn show_ready(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_ID) {
        _ = el.class_list().add_1(CLASS_READY);
    }
    if let Some(el) = document.get_element_by_id(LOADING_TEXT_ID) {
        el.set_text_content(Some(CONTINUE_TEXT));
    }
}

pub fn show_loading(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_TEXT_ID) {
        el.set_text_content(Some(LOADING_TEXT));
    }
}

pub fn start_exit(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_ID) {
        _ = el.class_list().add_1(CLASS_EXITING);
    }
}

pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_ID) {
        let cl = el.class_list();
        _ = cl.remove_1(CLASS_EXITING);
        _ = cl.add_1(CLASS_HIDDEN);
        // fallback for pages without the stylesheet
        _ = el.set_attribute("style", "display:none");
    }
}

pub fn set_sound_bars(bars: &web::Element, class: &str) {
    let cl = bars.class_list();
    _ = cl.remove_2(CLASS_PLAYING, CLASS_STOPPED);
    _ = cl.add_1(class);
}
