use js_sys::Array;
use gloo::events::EventListener;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use super::dom;
use crate::capabilities::Capabilities;
use crate::config::PageConfig;

/// Swaps the deferred source into `src` and fades the image in once it
/// loads. Returns `false` when the image has already been revealed.
pub fn reveal(image: &HtmlImageElement, source_attr: &str) -> bool {
    let Some(source) = image.get_attribute(source_attr) else {
        return false;
    };
    let style = image.style();
    let _ = style.set_property("opacity", "0");
    let _ = style.set_property("transition", "opacity 0.4s ease");

    let target = image.clone();
    EventListener::once(image, "load", move |_| {
        let _ = target.style().set_property("opacity", "1");
    })
    .forget();

    image.set_src(&source);
    let _ = image.remove_attribute(source_attr);
    true
}

/// Observer revealing images as they approach the viewport.
pub struct LazyImages {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl LazyImages {
    pub fn observe(&self, image: &HtmlImageElement) {
        self.observer.observe(image);
    }
}

impl Drop for LazyImages {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Without intersection observation every image is revealed immediately.
pub fn mount(
    document: &Document,
    config: &PageConfig,
    caps: Capabilities,
) -> Result<Option<LazyImages>, JsValue> {
    let images: Vec<HtmlImageElement> = dom::query_all(document, config.selectors.lazy_images)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlImageElement>().ok())
        .collect();
    if images.is_empty() {
        return Ok(None);
    }

    if !caps.intersection_observer {
        for image in &images {
            reveal(image, config.lazy_source_attr);
        }
        return Ok(None);
    }

    let lazy = observer(config.lazy_source_attr, config.lazy_root_margin)?;
    for image in &images {
        lazy.observe(image);
    }
    Ok(Some(lazy))
}

pub fn observer(source_attr: &'static str, root_margin: &str) -> Result<LazyImages, JsValue> {
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                if let Some(image) = target.dyn_ref::<HtmlImageElement>() {
                    reveal(image, source_attr);
                }
                observer.unobserve(&target);
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin(root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    Ok(LazyImages {
        observer,
        _callback: callback,
    })
}
