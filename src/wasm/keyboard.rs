use std::cell::Cell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, KeyboardEvent};

use super::dom;
use crate::focus::FocusMode;

/// Keeps the keyboard-navigation marker on `body` in sync with input.
pub fn listen(document: &Document, body: HtmlElement, class: &'static str) -> Vec<EventListener> {
    let mode = Rc::new(Cell::new(FocusMode::default()));

    let apply = {
        let mode = Rc::clone(&mode);
        move |next: Option<FocusMode>| {
            if let Some(next) = next {
                mode.set(next);
                dom::set_class(&body, class, next == FocusMode::Keyboard);
            }
        }
    };
    let on_pointer = apply.clone();

    let key_mode = Rc::clone(&mode);
    let keydown = EventListener::new(document, "keydown", move |event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
            apply(key_mode.get().on_key(&key.key()));
        }
    });
    let mousedown = EventListener::new(document, "mousedown", move |_| {
        on_pointer(mode.get().on_pointer());
    });
    vec![keydown, mousedown]
}
