//! Trailing-edge debounce over an injectable timer host.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Runs a task once after a delay. Dropping the returned handle before the
/// delay elapses cancels the task.
pub trait Scheduler {
    type Pending;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Pending;
}

struct Inner<A, S: Scheduler> {
    scheduler: S,
    wait_ms: u32,
    callback: RefCell<Box<dyn FnMut(A)>>,
    pending: RefCell<Option<S::Pending>>,
    armed: Cell<bool>,
}

/// Wrapped callback: each [`Debounced::call`] cancels the pending call and
/// schedules a new one `wait_ms` later, so only the last call of a burst fires.
pub struct Debounced<A, S: Scheduler> {
    inner: Rc<Inner<A, S>>,
}

impl<A: 'static, S: Scheduler + 'static> Debounced<A, S> {
    pub fn new(scheduler: S, wait_ms: u32, callback: impl FnMut(A) + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                scheduler,
                wait_ms,
                callback: RefCell::new(Box::new(callback)),
                pending: RefCell::new(None),
                armed: Cell::new(false),
            }),
        }
    }

    pub fn call(&self, arg: A) {
        let weak: Weak<Inner<A, S>> = Rc::downgrade(&self.inner);
        let task = Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.armed.set(false);
            (inner.callback.borrow_mut())(arg);
        });
        let handle = self.inner.scheduler.schedule(self.inner.wait_ms, task);
        self.inner.armed.set(true);
        // Replacing the previous handle cancels its timer.
        let previous = self.inner.pending.replace(Some(handle));
        drop(previous);
    }

    /// Whether a call is waiting for its quiet period to elapse.
    pub fn is_pending(&self) -> bool {
        self.inner.armed.get()
    }

    /// Drops any scheduled call without running it.
    pub fn cancel(&self) {
        self.inner.armed.set(false);
        self.inner.pending.borrow_mut().take();
    }
}

#[cfg(test)]
pub(crate) mod manual {
    use super::Scheduler;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    type Task = (u64, u64, Box<dyn FnOnce()>);

    /// Virtual clock for driving schedulers deterministically in tests.
    #[derive(Clone, Default)]
    pub struct ManualClock {
        now: Rc<Cell<u64>>,
        next_id: Rc<Cell<u64>>,
        tasks: Rc<RefCell<Vec<Task>>>,
        fired: Rc<Cell<usize>>,
    }

    pub struct ManualPending {
        id: u64,
        tasks: Rc<RefCell<Vec<Task>>>,
    }

    impl Drop for ManualPending {
        fn drop(&mut self) {
            self.tasks.borrow_mut().retain(|(_, id, _)| *id != self.id);
        }
    }

    impl ManualClock {
        pub fn advance(&self, ms: u64) {
            let target = self.now.get() + ms;
            loop {
                let due = {
                    let mut tasks = self.tasks.borrow_mut();
                    let next = tasks
                        .iter()
                        .enumerate()
                        .filter(|(_, (at, _, _))| *at <= target)
                        .min_by_key(|(_, (at, id, _))| (*at, *id))
                        .map(|(idx, _)| idx);
                    next.map(|idx| tasks.remove(idx))
                };
                match due {
                    Some((at, _, task)) => {
                        self.now.set(at);
                        self.fired.set(self.fired.get() + 1);
                        task();
                    }
                    None => break,
                }
            }
            self.now.set(target);
        }

        pub fn scheduled(&self) -> usize {
            self.tasks.borrow().len()
        }

        pub fn fired(&self) -> usize {
            self.fired.get()
        }
    }

    impl Scheduler for ManualClock {
        type Pending = ManualPending;

        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualPending {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            self.tasks
                .borrow_mut()
                .push((self.now.get() + u64::from(delay_ms), id, task));
            ManualPending {
                id,
                tasks: Rc::clone(&self.tasks),
            }
        }
    }
}
