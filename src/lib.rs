//! Interactivity for the portfolio page: sidebar, scroll-spy, typing
//! headline, particle background, lazy images, smooth anchors and keyboard
//! focus handling.
//!
//! The state machines below compile everywhere and are tested on the host;
//! the browser bindings in [`wasm`] only exist on `wasm32`.

pub mod anchor;
pub mod capabilities;
pub mod config;
pub mod debounce;
pub mod focus;
pub mod particles;
pub mod scroll_spy;
pub mod sidebar;
pub mod typing;

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo::events::EventListener;
    use wasm_bindgen::prelude::*;

    use crate::config::PageConfig;

    pub mod dom;
    pub mod keyboard;
    pub mod lazy_images;
    pub mod render;
    pub mod scroll_spy;
    pub mod sidebar;
    pub mod smooth_scroll;
    pub mod typing;

    /// Everything wired at init, kept alive for the life of the page.
    #[allow(dead_code)]
    #[derive(Default)]
    struct Page {
        sidebar: Option<Rc<sidebar::Sidebar>>,
        scroll_spy: Option<scroll_spy::ScrollSpy>,
        typing: Option<typing::TypingLoop<dom::WindowScheduler>>,
        particles: Option<render::ParticleField>,
        lazy_images: Option<lazy_images::LazyImages>,
        listeners: Vec<EventListener>,
    }

    thread_local! {
        static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let document = dom::document()?;
        if document.ready_state() == "loading" {
            EventListener::once(&document, "DOMContentLoaded", |_| run()).forget();
        } else {
            run();
        }
        Ok(())
    }

    fn run() {
        if let Err(err) = init(&PageConfig::default()) {
            log::warn!("init failed: {}", dom::describe(&err));
        }
    }

    /// Wires every component whose elements are present. A component that
    /// fails is logged and skipped; the others still start.
    pub fn init(config: &PageConfig) -> Result<(), JsValue> {
        let window = dom::window()?;
        let document = dom::document()?;
        let caps = dom::probe_capabilities(&window);
        let mut page = Page::default();

        if let Some(panel) = sidebar::Sidebar::mount(&document, config) {
            let links = dom::query_all(&document, config.selectors.sidebar_links);
            page.listeners.extend(panel.listen(&document, &links));
            page.sidebar = Some(panel);
            log::info!("sidebar ready");
        }

        match scroll_spy::mount(&document, config, caps) {
            Ok(Some(spy)) => {
                page.scroll_spy = Some(spy);
                log::info!("scroll-spy ready");
            }
            Ok(None) => {}
            Err(err) => log::warn!("scroll-spy disabled: {}", dom::describe(&err)),
        }

        page.typing = typing::mount(&document, config, caps);
        if page.typing.is_some() {
            log::info!("typing animation ready");
        }

        page.particles = render::mount(&document, config, caps);
        if page.particles.is_some() {
            log::info!("particle background ready");
        }

        match lazy_images::mount(&document, config, caps) {
            Ok(lazy) => {
                if lazy.is_some() {
                    log::info!("lazy images observed");
                }
                page.lazy_images = lazy;
            }
            Err(err) => log::warn!("lazy images disabled: {}", dom::describe(&err)),
        }

        match smooth_scroll::listen(&document, config, caps) {
            Ok(listeners) => {
                if !listeners.is_empty() {
                    log::info!("smooth scroll ready");
                }
                page.listeners.extend(listeners);
            }
            Err(err) => log::warn!("smooth scroll disabled: {}", dom::describe(&err)),
        }

        if let Some(body) = document.body() {
            page.listeners
                .extend(keyboard::listen(&document, body, config.classes.keyboard_nav));
        }

        PAGE.with(|slot| *slot.borrow_mut() = Some(page));
        Ok(())
    }
}
