//! Thin helpers over `web_sys` shared by the page controllers.

use gloo::timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Window};

use crate::capabilities::Capabilities;
use crate::debounce::Scheduler;

/// Best-effort text for a thrown JS value.
pub fn describe(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{err:?}")
}

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| "no window".into())
}

pub fn document() -> Result<Document, JsValue> {
    window()?.document().ok_or_else(|| "no document".into())
}

/// First match for `selector`; an invalid selector counts as no match.
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_as<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    query(document, selector)?.dyn_into::<T>().ok()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

pub fn reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}

/// Reads the host's feature set once at startup.
pub fn probe_capabilities(window: &Window) -> Capabilities {
    let has = |name: &str| js_sys::Reflect::has(window, &JsValue::from_str(name)).unwrap_or(false);
    Capabilities {
        intersection_observer: has("IntersectionObserver"),
        webgl2: has("WebGL2RenderingContext"),
        reduced_motion: reduced_motion(window),
    }
}

/// `setTimeout`-backed scheduler; dropping the returned `Timeout` clears it.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowScheduler;

impl Scheduler for WindowScheduler {
    type Pending = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}
