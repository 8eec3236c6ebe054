//! Debounce and throttle
//!
//! Rate-limiting wrappers over a callback, driven by a [`Scheduler`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::scheduler::{SharedScheduler, TimerId};

type Callback<A> = Rc<RefCell<Box<dyn FnMut(A)>>>;

/// Delays invocation until calls have stopped for `wait_ms`.
///
/// Each call cancels the pending invocation; the one that finally runs gets
/// the arguments of the most recent call.
pub struct Debounce<A> {
    scheduler: SharedScheduler,
    wait_ms: u32,
    func: Callback<A>,
    pending: Rc<Cell<Option<TimerId>>>,
}

impl<A: 'static> Debounce<A> {
    pub fn new(scheduler: SharedScheduler, wait_ms: u32, func: impl FnMut(A) + 'static) -> Self {
        Self {
            scheduler,
            wait_ms,
            func: Rc::new(RefCell::new(Box::new(func))),
            pending: Rc::new(Cell::new(None)),
        }
    }

    pub fn call(&self, args: A) {
        self.cancel();

        let func = Rc::clone(&self.func);
        let pending = Rc::clone(&self.pending);
        let id = self.scheduler.set_timeout(
            self.wait_ms,
            Box::new(move || {
                pending.set(None);
                let mut f = func.borrow_mut();
                (&mut **f)(args);
            }),
        );
        self.pending.set(Some(id));
    }

    /// Drop the pending invocation, if any
    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.clear(id);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}

/// Invokes at most once per `limit_ms`; calls inside the window are dropped.
pub struct Throttle<A> {
    scheduler: SharedScheduler,
    limit_ms: u32,
    func: RefCell<Box<dyn FnMut(A)>>,
    in_window: Rc<Cell<bool>>,
}

impl<A: 'static> Throttle<A> {
    pub fn new(scheduler: SharedScheduler, limit_ms: u32, func: impl FnMut(A) + 'static) -> Self {
        Self {
            scheduler,
            limit_ms,
            func: RefCell::new(Box::new(func)),
            in_window: Rc::new(Cell::new(false)),
        }
    }

    /// Returns whether the call went through
    pub fn call(&self, args: A) -> bool {
        if self.in_window.get() {
            return false;
        }

        self.in_window.set(true);
        let in_window = Rc::clone(&self.in_window);
        self.scheduler
            .set_timeout(self.limit_ms, Box::new(move || in_window.set(false)));

        let mut f = self.func.borrow_mut();
        (&mut **f)(args);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::VirtualScheduler;

    #[test]
    fn test_debounce_runs_once_with_last_args() {
        let scheduler = VirtualScheduler::shared();
        let calls = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&calls);
        let clock = Rc::clone(&scheduler);
        let debounced = Debounce::new(scheduler.clone(), 50, move |n: u32| {
            log.borrow_mut().push((clock.now(), n));
        });

        debounced.call(1);
        scheduler.advance(10);
        debounced.call(2);
        scheduler.advance(10);
        debounced.call(3);

        scheduler.advance(49);
        assert!(calls.borrow().is_empty());
        assert!(debounced.is_pending());

        scheduler.advance(1);
        assert_eq!(*calls.borrow(), vec![(70, 3)]);
        assert!(!debounced.is_pending());

        scheduler.advance(500);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_debounce_cancel() {
        let scheduler = VirtualScheduler::shared();
        let count = Rc::new(Cell::new(0));

        let c = Rc::clone(&count);
        let debounced = Debounce::new(scheduler.clone(), 20, move |_: ()| c.set(c.get() + 1));

        debounced.call(());
        debounced.cancel();
        scheduler.advance(100);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_throttle_drops_calls_inside_window() {
        let scheduler = VirtualScheduler::shared();
        let calls = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&calls);
        let clock = Rc::clone(&scheduler);
        let throttled = Throttle::new(scheduler.clone(), 100, move |n: u32| {
            log.borrow_mut().push((clock.now(), n));
        });

        assert!(throttled.call(1));
        scheduler.advance(10);
        assert!(!throttled.call(2));
        scheduler.advance(10);
        assert!(!throttled.call(3));

        scheduler.advance(200);
        assert_eq!(*calls.borrow(), vec![(0, 1)]);
    }

    #[test]
    fn test_throttle_reopens_after_window() {
        let scheduler = VirtualScheduler::shared();
        let count = Rc::new(Cell::new(0));

        let c = Rc::clone(&count);
        let throttled = Throttle::new(scheduler.clone(), 100, move |_: ()| c.set(c.get() + 1));

        throttled.call(());
        scheduler.advance(100);
        assert!(throttled.call(()));
        assert_eq!(count.get(), 2);
    }
}
