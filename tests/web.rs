#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo_timers::future::TimeoutFuture;
use portfolio_wasm::capabilities::Capabilities;
use portfolio_wasm::config::{Classes, PageConfig};
use portfolio_wasm::scroll_spy::SectionHit;
use portfolio_wasm::wasm::scroll_spy::{self, NavMarker};
use portfolio_wasm::wasm::sidebar::Sidebar;
use portfolio_wasm::wasm::{keyboard, smooth_scroll};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn append(document: &Document, tag: &str) -> HtmlElement {
    let el = document
        .create_element(tag)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    document.body().unwrap().append_child(&el).unwrap();
    el
}

fn key(document: &Document, name: &str) {
    let init = KeyboardEventInit::new();
    init.set_key(name);
    init.set_bubbles(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    document.dispatch_event(&event).unwrap();
}

struct SidebarFixture {
    toggle: HtmlElement,
    panel: HtmlElement,
    overlay: HtmlElement,
    link: HtmlElement,
}

impl SidebarFixture {
    fn new(document: &Document) -> Self {
        let toggle = append(document, "button");
        let panel = append(document, "nav");
        let overlay = append(document, "div");
        let link = document
            .create_element("a")
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap();
        link.set_attribute("href", "#nowhere").unwrap();
        panel.append_child(&link).unwrap();
        Self {
            toggle,
            panel,
            overlay,
            link,
        }
    }

    fn sidebar(&self, document: &Document) -> Rc<Sidebar> {
        Sidebar::new(
            self.toggle.clone(),
            self.panel.clone().into(),
            self.overlay.clone().into(),
            document.body(),
            Classes::default(),
        )
    }

    fn open_classes(&self) -> (bool, bool) {
        (
            self.panel.class_list().contains("open"),
            self.overlay.class_list().contains("open"),
        )
    }
}

impl Drop for SidebarFixture {
    fn drop(&mut self) {
        self.toggle.remove();
        self.panel.remove();
        self.overlay.remove();
        if let Some(body) = document().body() {
            let _ = body.class_list().remove_1("sidebar-open");
        }
    }
}

#[wasm_bindgen_test]
fn sidebar_toggle_updates_classes_and_aria() {
    let document = document();
    let fixture = SidebarFixture::new(&document);
    let sidebar = fixture.sidebar(&document);
    let body = document.body().unwrap();

    assert!(!sidebar.is_open());
    assert_eq!(fixture.toggle.get_attribute("aria-expanded").as_deref(), Some("false"));

    assert!(sidebar.toggle(Some(true)));
    assert_eq!(fixture.open_classes(), (true, true));
    assert_eq!(fixture.toggle.get_attribute("aria-expanded").as_deref(), Some("true"));
    assert!(body.class_list().contains("sidebar-open"));

    assert!(!sidebar.toggle(None));
    assert_eq!(fixture.open_classes(), (false, false));
    assert!(!body.class_list().contains("sidebar-open"));

    assert!(!sidebar.toggle(Some(false)));
    assert_eq!(fixture.open_classes(), (false, false));
}

#[wasm_bindgen_test]
fn sidebar_reacts_to_clicks_and_escape() {
    let document = document();
    let fixture = SidebarFixture::new(&document);
    let sidebar = fixture.sidebar(&document);
    let link: Element = fixture.link.clone().into();
    let _listeners = sidebar.listen(&document, &[link]);

    fixture.toggle.click();
    assert!(sidebar.is_open());
    fixture.link.click();
    assert!(!sidebar.is_open());

    fixture.toggle.click();
    fixture.overlay.click();
    assert!(!sidebar.is_open());

    fixture.toggle.click();
    assert!(sidebar.is_open());
    key(&document, "Escape");
    assert!(!sidebar.is_open());
    let focused = document.active_element().unwrap();
    assert!(focused.is_same_node(Some(&fixture.toggle)));
}

#[wasm_bindgen_test]
fn sidebar_starts_from_markup_state() {
    let document = document();
    let fixture = SidebarFixture::new(&document);
    fixture.panel.class_list().add_1("open").unwrap();
    let sidebar = fixture.sidebar(&document);
    assert!(sidebar.is_open());
    assert_eq!(fixture.open_classes(), (true, true));
}

#[wasm_bindgen_test]
fn scroll_spy_marks_only_section_in_view() {
    let document = document();
    let links: Vec<Element> = ["#s1", "#s2", "#s3"]
        .iter()
        .map(|href| {
            let link = append(&document, "a");
            link.set_attribute("href", href).unwrap();
            link.into()
        })
        .collect();
    let marker = NavMarker::new(links.clone(), 0.55, "active").unwrap();

    marker.apply(&[
        SectionHit { id: "s1", intersecting: true, ratio: 0.3 },
        SectionHit { id: "s2", intersecting: true, ratio: 0.7 },
        SectionHit { id: "s3", intersecting: false, ratio: 0.0 },
    ]);

    let active: Vec<bool> = links
        .iter()
        .map(|link| link.class_list().contains("active"))
        .collect();
    assert_eq!(active, [false, true, false]);

    for link in links {
        link.remove();
    }
}

#[wasm_bindgen_test]
fn sidebar_mount_needs_every_element() {
    let document = document();
    let config = PageConfig::default();
    assert!(Sidebar::mount(&document, &config).is_none());

    let toggle = append(&document, "button");
    toggle.set_id("menu-toggle");
    assert!(Sidebar::mount(&document, &config).is_none());

    let panel = append(&document, "nav");
    panel.set_id("sidebar");
    assert!(Sidebar::mount(&document, &config).is_none());

    let overlay = append(&document, "div");
    overlay.set_id("sidebar-overlay");
    let sidebar = Sidebar::mount(&document, &config).unwrap();
    assert!(!sidebar.is_open());

    for el in [toggle, panel, overlay] {
        el.remove();
    }
}

#[wasm_bindgen_test]
async fn scroll_spy_observer_marks_section_on_screen() {
    let document = document();
    let sections: Vec<Element> = [
        ("spy-one", "position:absolute;top:100000px;height:100px"),
        ("spy-two", "position:fixed;top:0;left:0;width:100px;height:100px"),
        ("spy-three", "position:absolute;top:200000px;height:100px"),
    ]
    .iter()
    .map(|(id, style)| {
        let section = append(&document, "section");
        section.set_id(id);
        section.set_attribute("style", style).unwrap();
        section.into()
    })
    .collect();
    let links: Vec<Element> = ["#spy-one", "#spy-two", "#spy-three"]
        .iter()
        .map(|href| {
            let link = append(&document, "a");
            link.set_attribute("href", href).unwrap();
            link.into()
        })
        .collect();
    let marker = NavMarker::new(links.clone(), 0.55, "active").unwrap();

    let spy = scroll_spy::observe(marker, &sections, 0.55).unwrap();
    TimeoutFuture::new(200).await;

    let active: Vec<bool> = links
        .iter()
        .map(|link| link.class_list().contains("active"))
        .collect();
    assert_eq!(active, [false, true, false]);

    drop(spy);
    for el in sections.into_iter().chain(links) {
        el.remove();
    }
}

#[wasm_bindgen_test]
fn scroll_spy_without_links_is_inert() {
    assert!(NavMarker::new(Vec::new(), 0.55, "active").is_none());
}

#[wasm_bindgen_test]
fn bare_hash_anchor_is_left_alone() {
    let document = document();
    let window = web_sys::window().unwrap();
    let anchor = append(&document, "a");
    anchor.set_attribute("href", "#").unwrap();
    assert!(smooth_scroll::resolve(&document, "#").is_none());

    let history_len = window.history().unwrap().length().unwrap();
    let scroll_y = window.scroll_y().unwrap();
    let _router = smooth_scroll::listen(&document, &PageConfig::default(), Capabilities::full()).unwrap();

    // Registered after the router, so it sees the router's decision and then
    // keeps the browser from following the link itself.
    let prevented_by_router = Rc::new(Cell::new(None));
    let seen = Rc::clone(&prevented_by_router);
    let _guard = EventListener::new_with_options(
        &anchor,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            seen.set(Some(event.default_prevented()));
            event.prevent_default();
        },
    );

    anchor.click();

    assert_eq!(prevented_by_router.get(), Some(false));
    assert_eq!(window.history().unwrap().length().unwrap(), history_len);
    assert_eq!(window.scroll_y().unwrap(), scroll_y);
    anchor.remove();
}

#[wasm_bindgen_test]
fn in_page_anchor_is_intercepted_and_recorded() {
    let document = document();
    let window = web_sys::window().unwrap();
    let target = append(&document, "section");
    target.set_id("router-target");
    let anchor = append(&document, "a");
    anchor.set_attribute("href", "#router-target").unwrap();

    let history_len = window.history().unwrap().length().unwrap();
    let reduced = Capabilities::full().with_reduced_motion(true);
    let _router = smooth_scroll::listen(&document, &PageConfig::default(), reduced).unwrap();

    let prevented = Rc::new(Cell::new(false));
    let seen = Rc::clone(&prevented);
    let _probe = EventListener::new(&anchor, "click", move |event| {
        seen.set(event.default_prevented());
    });
    anchor.click();

    assert!(prevented.get());
    assert_eq!(window.history().unwrap().length().unwrap(), history_len + 1);
    assert_eq!(window.location().hash().unwrap(), "#router-target");

    anchor.remove();
    target.remove();
}

#[wasm_bindgen_test]
fn tab_enables_keyboard_marker_until_mouse_press() {
    let document = document();
    let body = document.body().unwrap();
    let _listeners = keyboard::listen(&document, body.clone(), "kbd-test");

    key(&document, "a");
    assert!(!body.class_list().contains("kbd-test"));
    key(&document, "Tab");
    assert!(body.class_list().contains("kbd-test"));

    let press = web_sys::MouseEvent::new("mousedown").unwrap();
    document.dispatch_event(&press).unwrap();
    assert!(!body.class_list().contains("kbd-test"));
}
