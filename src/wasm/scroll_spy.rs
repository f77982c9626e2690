use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use super::dom;
use crate::capabilities::Capabilities;
use crate::config::PageConfig;
use crate::scroll_spy::{NavHighlight, SectionHit};

/// Navigation links whose active marker follows the section in view.
pub struct NavMarker {
    links: Vec<Element>,
    nav: RefCell<NavHighlight>,
    active_class: &'static str,
}

impl NavMarker {
    pub fn new(links: Vec<Element>, threshold: f64, active_class: &'static str) -> Option<Rc<Self>> {
        let hrefs: Vec<String> = links
            .iter()
            .map(|link| link.get_attribute("href").unwrap_or_default())
            .collect();
        let nav = NavHighlight::new(hrefs, threshold);
        if nav.is_empty() {
            return None;
        }
        Some(Rc::new(Self {
            links,
            nav: RefCell::new(nav),
            active_class,
        }))
    }

    pub fn apply(&self, hits: &[SectionHit<'_>]) {
        let mut nav = self.nav.borrow_mut();
        if !nav.observe(hits) {
            return;
        }
        for (index, link) in self.links.iter().enumerate() {
            dom::set_class(link, self.active_class, nav.is_active(index));
        }
    }
}

/// Live observer feeding a [`NavMarker`]; observation stops when dropped.
pub struct ScrollSpy {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for ScrollSpy {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub fn mount(
    document: &Document,
    config: &PageConfig,
    caps: Capabilities,
) -> Result<Option<ScrollSpy>, JsValue> {
    if !caps.intersection_observer {
        return Ok(None);
    }
    let sections = dom::query_all(document, config.selectors.sections);
    if sections.is_empty() {
        return Ok(None);
    }
    let links = dom::query_all(document, config.selectors.nav_links);
    let Some(marker) = NavMarker::new(links, config.scroll_spy_threshold, config.classes.active)
    else {
        return Ok(None);
    };
    observe(marker, &sections, config.scroll_spy_threshold).map(Some)
}

pub fn observe(
    marker: Rc<NavMarker>,
    sections: &[Element],
    threshold: f64,
) -> Result<ScrollSpy, JsValue> {
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            let observed: Vec<(String, bool, f64)> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| {
                    (
                        entry.target().id(),
                        entry.is_intersecting(),
                        entry.intersection_ratio(),
                    )
                })
                .collect();
            let hits: Vec<SectionHit<'_>> = observed
                .iter()
                .map(|(id, intersecting, ratio)| SectionHit {
                    id: id.as_str(),
                    intersecting: *intersecting,
                    ratio: *ratio,
                })
                .collect();
            marker.apply(&hits);
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for section in sections {
        observer.observe(section);
    }
    Ok(ScrollSpy {
        observer,
        _callback: callback,
    })
}
