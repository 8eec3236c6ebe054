//! Timer Scheduling
//!
//! The controller never touches `setTimeout`/`setInterval` directly; it goes
//! through [`Scheduler`]. The browser crate backs it with gloo-timers, tests
//! use [`VirtualScheduler`], which only moves when told to.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Handle for a scheduled timeout or interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Single-threaded timer source.
///
/// Callbacks run to completion on the event loop; clearing an already fired
/// or unknown id is a no-op.
pub trait Scheduler {
    /// Milliseconds on a monotonic-enough clock
    fn now_ms(&self) -> f64;

    /// Run `callback` once after `delay_ms`
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId;

    /// Run `callback` every `period_ms` until cleared
    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> TimerId;

    /// Cancel a timeout or interval
    fn clear(&self, id: TimerId);
}

/// Scheduler shared between handlers
pub type SharedScheduler = Rc<dyn Scheduler>;

enum Task {
    Once(Box<dyn FnOnce()>),
    Repeat(Box<dyn FnMut()>),
}

struct VirtualTimer {
    due: u64,
    period: Option<u64>,
    /// `None` while the callback is running
    task: Option<Task>,
}

struct VirtualInner {
    now: u64,
    next_id: u64,
    timers: BTreeMap<TimerId, VirtualTimer>,
}

/// Deterministic scheduler driven by [`VirtualScheduler::advance`].
///
/// Timers fire in due-time order (ties by creation order) and the clock is
/// set to each timer's due time while its callback runs.
pub struct VirtualScheduler {
    inner: RefCell<VirtualInner>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(VirtualInner {
                now: 0,
                next_id: 1,
                timers: BTreeMap::new(),
            }),
        }
    }

    /// Convenience constructor returning a shared handle
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.inner.borrow().now
    }

    /// Number of live timers
    pub fn pending(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Move the clock forward, firing every timer that falls due
    pub fn advance(&self, ms: u64) {
        let target = self.inner.borrow().now + ms;

        loop {
            let next = {
                let inner = self.inner.borrow();
                inner
                    .timers
                    .iter()
                    .filter(|(_, t)| t.due <= target && t.task.is_some())
                    .min_by_key(|(id, t)| (t.due, **id))
                    .map(|(id, t)| (*id, t.due))
            };

            let Some((id, due)) = next else {
                break;
            };

            let task = {
                let mut inner = self.inner.borrow_mut();
                inner.now = due;
                let repeating = match inner.timers.get(&id) {
                    Some(timer) => timer.period.is_some(),
                    None => continue,
                };
                if repeating {
                    inner.timers.get_mut(&id).and_then(|t| t.task.take())
                } else {
                    inner.timers.remove(&id).and_then(|t| t.task)
                }
            };

            match task {
                Some(Task::Once(callback)) => callback(),
                Some(Task::Repeat(mut callback)) => {
                    callback();
                    let mut inner = self.inner.borrow_mut();
                    // Still present unless the callback cleared itself
                    if let Some(timer) = inner.timers.get_mut(&id) {
                        timer.due += timer.period.unwrap_or(1);
                        timer.task = Some(Task::Repeat(callback));
                    }
                }
                None => {}
            }
        }

        self.inner.borrow_mut().now = target;
    }

    fn insert(&self, delay_ms: u32, period: Option<u64>, task: Task) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let id = TimerId(inner.next_id);
        inner.next_id += 1;
        let due = inner.now + u64::from(delay_ms);
        inner.timers.insert(
            id,
            VirtualTimer {
                due,
                period,
                task: Some(task),
            },
        );
        id
    }
}

impl Default for VirtualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for VirtualScheduler {
    fn now_ms(&self) -> f64 {
        self.now() as f64
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId {
        self.insert(delay_ms, None, Task::Once(callback))
    }

    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> TimerId {
        // A zero period would never let the clock advance
        let period = period_ms.max(1);
        self.insert(period, Some(u64::from(period)), Task::Repeat(callback))
    }

    fn clear(&self, id: TimerId) {
        self.inner.borrow_mut().timers.remove(&id);
    }
}
