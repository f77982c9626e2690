/// Whether focus rings should be shown: only after the user starts moving
/// through the page with Tab, until the next pointer press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FocusMode {
    #[default]
    Pointer,
    Keyboard,
}

impl FocusMode {
    /// Mode after a key press; `None` when the key does not change it.
    pub fn on_key(self, key: &str) -> Option<FocusMode> {
        (key == "Tab" && self == FocusMode::Pointer).then_some(FocusMode::Keyboard)
    }

    pub fn on_pointer(self) -> Option<FocusMode> {
        (self == FocusMode::Keyboard).then_some(FocusMode::Pointer)
    }
}
