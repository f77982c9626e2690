use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, ScrollBehavior, ScrollToOptions, Window};

use super::dom;
use crate::anchor::{fragment_target, Travel};
use crate::capabilities::Capabilities;
use crate::config::PageConfig;

/// Element an in-page `href` points at, if it exists.
pub fn resolve(document: &Document, href: &str) -> Option<Element> {
    document.get_element_by_id(fragment_target(href)?)
}

/// Scrolls to `target` and records `href` in history without navigating.
pub fn travel_to(window: &Window, target: &Element, href: &str, travel: Travel) -> Result<(), JsValue> {
    let top = target.get_bounding_client_rect().top() + window.scroll_y()?;
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(match travel {
        Travel::Smooth => ScrollBehavior::Smooth,
        Travel::Instant => ScrollBehavior::Instant,
    });
    window.scroll_to_with_scroll_to_options(&options);
    window
        .history()?
        .push_state_with_url(&JsValue::NULL, "", Some(href))
}

/// Intercepts clicks on every in-page anchor currently in the document.
pub fn listen(
    document: &Document,
    config: &PageConfig,
    caps: Capabilities,
) -> Result<Vec<EventListener>, JsValue> {
    let window = dom::window()?;
    let travel = Travel::for_motion(caps.reduced_motion);
    let listeners = dom::query_all(document, config.selectors.anchors)
        .into_iter()
        .map(|anchor| {
            let window = window.clone();
            let document = document.clone();
            let href = anchor.get_attribute("href").unwrap_or_default();
            EventListener::new_with_options(
                &anchor,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    let Some(target) = resolve(&document, &href) else {
                        return;
                    };
                    event.prevent_default();
                    if let Err(err) = travel_to(&window, &target, &href, travel) {
                        log::warn!("scroll to {href} failed: {}", dom::describe(&err));
                    }
                },
            )
        })
        .collect();
    Ok(listeners)
}
