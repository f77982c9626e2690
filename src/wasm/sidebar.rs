use std::cell::Cell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

use super::dom;
use crate::config::{Classes, PageConfig};
use crate::sidebar::{SidebarState, SidebarTrigger};

/// Slide-in navigation panel with its dimming overlay.
pub struct Sidebar {
    toggle: HtmlElement,
    panel: Element,
    overlay: Element,
    body: Option<HtmlElement>,
    classes: Classes,
    state: Cell<SidebarState>,
}

impl Sidebar {
    /// `None` unless the toggle control, panel and overlay all exist.
    pub fn mount(document: &Document, config: &PageConfig) -> Option<Rc<Self>> {
        let toggle = dom::query_as::<HtmlElement>(document, config.selectors.menu_toggle)?;
        let panel = dom::query(document, config.selectors.sidebar)?;
        let overlay = dom::query(document, config.selectors.overlay)?;
        Some(Self::new(
            toggle,
            panel,
            overlay,
            document.body(),
            config.classes.clone(),
        ))
    }

    pub fn new(
        toggle: HtmlElement,
        panel: Element,
        overlay: Element,
        body: Option<HtmlElement>,
        classes: Classes,
    ) -> Rc<Self> {
        let open = dom::has_class(&panel, classes.open);
        let sidebar = Rc::new(Self {
            toggle,
            panel,
            overlay,
            body,
            classes,
            state: Cell::new(SidebarState::new(open)),
        });
        sidebar.paint(open);
        sidebar
    }

    pub fn is_open(&self) -> bool {
        self.state.get().is_open()
    }

    /// Forces `explicit` when given, flips otherwise.
    pub fn toggle(&self, explicit: Option<bool>) -> bool {
        let mut state = self.state.get();
        let open = state.toggle(explicit);
        self.state.set(state);
        self.paint(open);
        open
    }

    pub fn handle(&self, trigger: SidebarTrigger) {
        let Some(request) = trigger.request(self.state.get()) else {
            return;
        };
        self.toggle(request);
        if trigger == SidebarTrigger::Escape {
            let _ = self.toggle.focus();
        }
    }

    fn paint(&self, open: bool) {
        dom::set_class(&self.panel, self.classes.open, open);
        dom::set_class(&self.overlay, self.classes.open, open);
        let _ = self
            .toggle
            .set_attribute("aria-expanded", if open { "true" } else { "false" });
        if let Some(body) = &self.body {
            dom::set_class(body, self.classes.body_locked, open);
        }
    }

    /// Wires clicks on the toggle, overlay and `links`, plus Escape on
    /// `document`. Listeners stay registered while the returned handles live.
    pub fn listen(self: &Rc<Self>, document: &Document, links: &[Element]) -> Vec<EventListener> {
        let on = |target: &Element, event: &'static str, trigger: SidebarTrigger| {
            let sidebar = Rc::clone(self);
            EventListener::new(target, event, move |_| sidebar.handle(trigger))
        };

        let mut listeners = vec![
            on(self.toggle.as_ref(), "click", SidebarTrigger::ToggleClicked),
            on(&self.overlay, "click", SidebarTrigger::OverlayClicked),
        ];
        listeners.extend(
            links
                .iter()
                .map(|link| on(link, "click", SidebarTrigger::LinkClicked)),
        );

        let sidebar = Rc::clone(self);
        listeners.push(EventListener::new(document, "keydown", move |event| {
            let is_escape = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|key| key.key() == "Escape");
            if is_escape {
                sidebar.handle(SidebarTrigger::Escape);
            }
        }));
        listeners
    }
}
