//! Tunables for every page component.
//!
//! The defaults describe the reference markup in `static/index.html`.

use crate::particles::ParticleSettings;
use crate::typing::TypingConfig;

/// CSS selectors used to locate the page's collaborators.
#[derive(Clone, Debug, PartialEq)]
pub struct Selectors {
    pub menu_toggle: &'static str,
    pub sidebar: &'static str,
    pub overlay: &'static str,
    pub sidebar_links: &'static str,
    pub sections: &'static str,
    pub nav_links: &'static str,
    pub typing_text: &'static str,
    pub particle_canvas: &'static str,
    pub lazy_images: &'static str,
    pub anchors: &'static str,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            menu_toggle: "#menu-toggle",
            sidebar: "#sidebar",
            overlay: "#sidebar-overlay",
            sidebar_links: "#sidebar a",
            sections: "section[id]",
            nav_links: ".nav-link",
            typing_text: "#typing-text",
            particle_canvas: "#particle-canvas",
            lazy_images: "img[data-src]",
            anchors: "a[href^='#']",
        }
    }
}

/// Marker classes the controllers write onto the document.
#[derive(Clone, Debug, PartialEq)]
pub struct Classes {
    /// Put on the sidebar panel and overlay while the sidebar is visible.
    pub open: &'static str,
    /// Put on `<body>` while the sidebar is visible to suppress background scroll.
    pub body_locked: &'static str,
    /// Put on the navigation entry of the section in view.
    pub active: &'static str,
    /// Put on `<body>` while the user is navigating with the keyboard.
    pub keyboard_nav: &'static str,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            open: "open",
            body_locked: "sidebar-open",
            active: "active",
            keyboard_nav: "keyboard-nav",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    pub selectors: Selectors,
    pub classes: Classes,
    /// Fraction of a section that must be visible before its link lights up.
    pub scroll_spy_threshold: f64,
    pub lazy_root_margin: &'static str,
    pub lazy_source_attr: &'static str,
    pub resize_debounce_ms: u32,
    pub typing: TypingConfig,
    pub particles: ParticleSettings,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            classes: Classes::default(),
            scroll_spy_threshold: 0.55,
            lazy_root_margin: "100px",
            lazy_source_attr: "data-src",
            resize_debounce_ms: 250,
            typing: TypingConfig::default(),
            particles: ParticleSettings::default(),
        }
    }
}
