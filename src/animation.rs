//! Counter animation
//!
//! Linear, floor-rounded tween of a displayed integer, stepped by an
//! interval timer. The [`Animator`] keeps one live animation per target and
//! cancels the previous one when a new update for the same target arrives.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use crate::timing::{SharedScheduler, TimerId};

/// Interpolation from one value to another over a fixed duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberTween {
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
}

impl NumberTween {
    pub fn new(from: f64, to: f64, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            duration_ms: f64::from(duration_ms),
        }
    }

    /// Fraction of the duration elapsed, clamped to `0..=1`
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Displayed value after `elapsed_ms`
    pub fn value_at(&self, elapsed_ms: f64) -> i64 {
        let p = self.progress(elapsed_ms);
        (self.from + (self.to - self.from) * p).floor() as i64
    }

    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        self.progress(elapsed_ms) >= 1.0
    }
}

/// Runs tweens on a scheduler, at most one per key
pub struct Animator<K> {
    scheduler: SharedScheduler,
    duration_ms: u32,
    frame_ms: u32,
    active: Rc<RefCell<HashMap<K, TimerId>>>,
}

impl<K> Animator<K>
where
    K: Copy + Eq + Hash + Debug + 'static,
{
    pub fn new(scheduler: SharedScheduler, duration_ms: u32, frame_ms: u32) -> Self {
        Self {
            scheduler,
            duration_ms,
            frame_ms: frame_ms.max(1),
            active: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Start tweening `key` from `from` to `to`, feeding each step to `sink`.
    ///
    /// Any animation already running for `key` is cancelled first.
    pub fn animate(
        &self,
        key: K,
        from: f64,
        to: f64,
        mut sink: impl FnMut(i64) + 'static,
    ) -> TimerId {
        if self.cancel(key) {
            tracing::debug!(?key, "superseding running animation");
        }

        let tween = NumberTween::new(from, to, self.duration_ms);
        let start = self.scheduler.now_ms();
        let scheduler = Rc::downgrade(&self.scheduler);
        let active = Rc::clone(&self.active);
        let handle: Rc<Cell<Option<TimerId>>> = Rc::new(Cell::new(None));
        let own_handle = Rc::clone(&handle);

        let id = self.scheduler.set_interval(
            self.frame_ms,
            Box::new(move || {
                let Some(scheduler) = scheduler.upgrade() else {
                    return;
                };
                let elapsed = scheduler.now_ms() - start;
                sink(tween.value_at(elapsed));

                if tween.is_complete(elapsed) {
                    if let Some(id) = own_handle.get() {
                        scheduler.clear(id);
                        let mut active = active.borrow_mut();
                        if active.get(&key) == Some(&id) {
                            active.remove(&key);
                        }
                    }
                }
            }),
        );

        handle.set(Some(id));
        self.active.borrow_mut().insert(key, id);
        id
    }

    /// Stop the animation for `key`; returns whether one was running
    pub fn cancel(&self, key: K) -> bool {
        let id = self.active.borrow_mut().remove(&key);
        match id {
            Some(id) => {
                self.scheduler.clear(id);
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&self) {
        let ids: Vec<TimerId> = self.active.borrow_mut().drain().map(|(_, id)| id).collect();
        for id in ids {
            self.scheduler.clear(id);
        }
    }

    pub fn is_animating(&self, key: K) -> bool {
        self.active.borrow().contains_key(&key)
    }

    pub fn active_count(&self) -> usize {
        self.active.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::VirtualScheduler;

    fn animator(scheduler: &Rc<VirtualScheduler>) -> Animator<&'static str> {
        Animator::new(scheduler.clone(), 300, 16)
    }

    #[test]
    fn test_tween_endpoints() {
        let tween = NumberTween::new(10.0, 20.0, 300);
        assert_eq!(tween.value_at(0.0), 10);
        assert_eq!(tween.value_at(150.0), 15);
        assert_eq!(tween.value_at(299.0), 19);
        assert_eq!(tween.value_at(300.0), 20);
        assert_eq!(tween.value_at(10_000.0), 20);
    }

    #[test]
    fn test_tween_floors_downward_moves() {
        let tween = NumberTween::new(20.0, 10.0, 300);
        assert_eq!(tween.value_at(15.0), 19);
        assert_eq!(tween.value_at(300.0), 10);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let tween = NumberTween::new(3.0, 9.0, 0);
        assert!(tween.is_complete(0.0));
        assert_eq!(tween.value_at(0.0), 9);
    }

    #[test]
    fn test_animation_reaches_target_monotonically() {
        let scheduler = VirtualScheduler::shared();
        let animator = animator(&scheduler);
        let samples = Rc::new(RefCell::new(Vec::new()));

        let out = Rc::clone(&samples);
        animator.animate("total", 10.0, 20.0, move |v| out.borrow_mut().push(v));

        scheduler.advance(1000);

        let samples = samples.borrow();
        assert!(!samples.is_empty());
        assert_eq!(*samples.last().unwrap(), 20);
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
        assert!(!animator.is_animating("total"));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_new_animation_supersedes_running_one() {
        let scheduler = VirtualScheduler::shared();
        let animator = animator(&scheduler);
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));

        let out = Rc::clone(&first);
        animator.animate("alerts", 0.0, 100.0, move |v| out.borrow_mut().push(v));
        scheduler.advance(100);
        let first_len = first.borrow().len();

        let out = Rc::clone(&second);
        animator.animate("alerts", 30.0, 5.0, move |v| out.borrow_mut().push(v));
        assert_eq!(animator.active_count(), 1);

        scheduler.advance(1000);
        assert_eq!(first.borrow().len(), first_len);
        assert_eq!(*second.borrow().last().unwrap(), 5);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_independent_keys_run_together() {
        let scheduler = VirtualScheduler::shared();
        let animator = animator(&scheduler);

        animator.animate("a", 0.0, 1.0, |_| {});
        animator.animate("b", 0.0, 1.0, |_| {});
        assert_eq!(animator.active_count(), 2);

        animator.cancel_all();
        assert_eq!(animator.active_count(), 0);
        assert_eq!(scheduler.pending(), 0);
    }
}
