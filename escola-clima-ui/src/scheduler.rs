//! Browser timers
//!
//! [`Scheduler`] over gloo-timers. A cancelled timer's closure may be the one
//! currently running (an animation clearing itself on its last frame), so
//! closures are dropped on the next microtask instead of in place.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use escola_clima::{Scheduler, TimerId};
use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen_futures::spawn_local;

pub struct GlooScheduler {
    next_id: Cell<u64>,
    timeouts: Rc<RefCell<HashMap<TimerId, Timeout>>>,
    intervals: RefCell<HashMap<TimerId, Interval>>,
}

impl GlooScheduler {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            timeouts: Rc::new(RefCell::new(HashMap::new())),
            intervals: RefCell::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> TimerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        TimerId(id)
    }
}

fn drop_later<T: 'static>(value: T) {
    spawn_local(async move { drop(value) });
}

impl Scheduler for GlooScheduler {
    fn now_ms(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = self.next_id();
        let timeouts = Rc::clone(&self.timeouts);
        let timeout = Timeout::new(delay_ms, move || {
            let fired = timeouts.borrow_mut().remove(&id);
            callback();
            if let Some(fired) = fired {
                drop_later(fired);
            }
        });
        self.timeouts.borrow_mut().insert(id, timeout);
        id
    }

    fn set_interval(&self, period_ms: u32, mut callback: Box<dyn FnMut()>) -> TimerId {
        let id = self.next_id();
        let interval = Interval::new(period_ms, move || callback());
        self.intervals.borrow_mut().insert(id, interval);
        id
    }

    fn clear(&self, id: TimerId) {
        let timeout = self.timeouts.borrow_mut().remove(&id);
        if let Some(timeout) = timeout {
            drop_later(timeout.cancel());
            return;
        }
        let interval = self.intervals.borrow_mut().remove(&id);
        if let Some(interval) = interval {
            drop_later(interval.cancel());
        }
    }
}
