use std::cell::RefCell;
use std::rc::{Rc, Weak};

use web_sys::{Document, Element};

use super::dom::{self, WindowScheduler};
use crate::capabilities::Capabilities;
use crate::config::PageConfig;
use crate::debounce::Scheduler;
use crate::typing::{TypingConfig, Typewriter};

struct LoopState<S: Scheduler> {
    element: Element,
    writer: RefCell<Typewriter>,
    scheduler: S,
    pending: RefCell<Option<S::Pending>>,
}

/// Running typewriter; ticking stops when this handle is dropped.
pub struct TypingLoop<S: Scheduler> {
    state: Rc<LoopState<S>>,
}

impl<S: Scheduler> TypingLoop<S> {
    pub fn phrase_index(&self) -> usize {
        self.state.writer.borrow().phrase_index()
    }
}

pub fn mount(
    document: &Document,
    config: &PageConfig,
    caps: Capabilities,
) -> Option<TypingLoop<WindowScheduler>> {
    let element = dom::query(document, config.selectors.typing_text)?;
    let phrases = element.get_attribute("data-phrases");
    let typing = config
        .typing
        .clone()
        .with_phrase_override(phrases.as_deref());
    start(element, typing, caps.reduced_motion, WindowScheduler)
}

/// Starts ticking into `element`. With reduced motion the first phrase is
/// written once and nothing is scheduled.
pub fn start<S: Scheduler + 'static>(
    element: Element,
    config: TypingConfig,
    reduced_motion: bool,
    scheduler: S,
) -> Option<TypingLoop<S>> {
    let writer = Typewriter::new(config)?;
    if reduced_motion {
        element.set_text_content(Some(writer.static_text()));
        return None;
    }
    element.set_text_content(Some(""));
    let state = Rc::new(LoopState {
        element,
        writer: RefCell::new(writer),
        scheduler,
        pending: RefCell::new(None),
    });
    tick(&state);
    Some(TypingLoop { state })
}

fn tick<S: Scheduler + 'static>(state: &Rc<LoopState<S>>) {
    state.pending.borrow_mut().take();
    let frame = state.writer.borrow_mut().tick();
    state.element.set_text_content(Some(&frame.text));

    let weak: Weak<LoopState<S>> = Rc::downgrade(state);
    let next = state.scheduler.schedule(
        frame.delay_ms,
        Box::new(move || {
            if let Some(state) = weak.upgrade() {
                tick(&state);
            }
        }),
    );
    *state.pending.borrow_mut() = Some(next);
}
