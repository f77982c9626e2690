/// Visible/hidden state of the slide-in navigation panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SidebarState {
    open: bool,
}

impl SidebarState {
    pub const fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Forces `explicit` when given, flips otherwise. Returns the new state.
    pub fn toggle(&mut self, explicit: Option<bool>) -> bool {
        self.open = explicit.unwrap_or(!self.open);
        self.open
    }
}

/// Events that drive the sidebar, mapped to the state they request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidebarTrigger {
    ToggleClicked,
    OverlayClicked,
    LinkClicked,
    Escape,
}

impl SidebarTrigger {
    /// The `toggle` argument for this trigger, or `None` when it should be
    /// ignored in the current state.
    pub fn request(self, state: SidebarState) -> Option<Option<bool>> {
        match self {
            SidebarTrigger::ToggleClicked => Some(None),
            SidebarTrigger::OverlayClicked => Some(Some(false)),
            SidebarTrigger::LinkClicked | SidebarTrigger::Escape if state.is_open() => {
                Some(Some(false))
            }
            SidebarTrigger::LinkClicked | SidebarTrigger::Escape => None,
        }
    }
}
