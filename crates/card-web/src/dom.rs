use card_core::{CardConfig, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Milliseconds on the page clock, the same origin rAF timestamps use.
#[inline]
pub fn now_ms() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Seed for the core's `StdRng`s.
pub fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}

pub fn element<T: JsCast>(document: &web::Document, id: &str) -> Option<T> {
    let el = document.get_element_by_id(id);
    if el.is_none() {
        log::warn!("missing #{}", id);
    }
    el.and_then(|e| e.dyn_into::<T>().ok())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("missing #{}; click handler not installed", element_id);
    }
}

/// Listen on the window for the lifetime of the page.
pub fn add_window_listener(event: &str, mut handler: impl FnMut() + 'static) {
    if let Some(w) = web::window() {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = w.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// One-shot listener that removes itself after the first event.
pub fn add_once_listener(target: &web::EventTarget, event: &str, handler: impl FnOnce() + 'static) {
    let opts = web::AddEventListenerOptions::new();
    opts.set_once(true);
    let closure = Closure::once_into_js(handler);
    let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.unchecked_ref(),
        &opts,
    );
}

/// `setTimeout` with a one-shot closure; returns the browser handle.
pub fn set_timeout_once(ms: i32, handler: impl FnOnce() + 'static) -> Option<i32> {
    let w = web::window()?;
    let closure = Closure::once_into_js(handler);
    w.set_timeout_with_callback_and_timeout_and_arguments_0(closure.unchecked_ref(), ms)
        .ok()
}

pub fn clear_timeout(handle: i32) {
    if let Some(w) = web::window() {
        w.clear_timeout_with_handle(handle);
    }
}

pub fn add_class(el: &web::Element, class: &str) {
    let _ = el.class_list().add_1(class);
}

pub fn remove_class(el: &web::Element, class: &str) {
    let _ = el.class_list().remove_1(class);
}

pub fn set_hidden(el: &web::HtmlElement, hidden: bool) {
    el.set_hidden(hidden);
}

pub fn set_text(el: &web::Element, text: &str) {
    el.set_text_content(Some(text));
}

/// Current window size in CSS pixels plus the device pixel ratio.
pub fn window_viewport() -> Viewport {
    match web::window() {
        Some(w) => {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            Viewport::new(width as f32, height as f32, w.device_pixel_ratio() as f32)
        }
        None => Viewport::new(0.0, 0.0, 1.0),
    }
}

/// Size the canvas backing store for `viewport` (DPR clamped to [1, 2]) and
/// pin its CSS size to the logical size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let (w_px, h_px) = viewport.backing_size();
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{}px", viewport.width));
    let _ = style.set_property("height", &format!("{}px", viewport.height));
}

/// Page configuration from `<script type="application/json" id="card-config">`.
pub fn read_config(document: &web::Document) -> CardConfig {
    let json = document
        .get_element_by_id(crate::constants::ID_CONFIG)
        .and_then(|el| el.text_content());
    match json {
        Some(json) if !json.trim().is_empty() => CardConfig::from_json_or_default(&json),
        _ => CardConfig::default(),
    }
}
