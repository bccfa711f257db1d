//! Cooperative recurring timers.
//!
//! Nothing here runs on its own thread: the event loop calls [`Scheduler::run_due`]
//! on every tick and each due task runs synchronously on the UI thread. Tasks
//! owned by a window are cancelled by the window manager when that window
//! closes; the scheduler keeps the owner around so leaks can be detected.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use crate::window::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

pub type TimerTask = Box<dyn FnMut()>;

struct Scheduled {
    owner: Option<WindowId>,
    interval: Duration,
    next_due: Instant,
    task: TimerTask,
}

pub struct Scheduler {
    next_id: u64,
    tasks: BTreeMap<TimerId, Scheduled>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("next_id", &self.next_id)
            .field("tasks", &self.tasks.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            tasks: BTreeMap::new(),
        }
    }

    /// Schedule `task` to run every `interval`, first at `now + interval`.
    pub fn schedule_repeating(
        &mut self,
        owner: Option<WindowId>,
        interval: Duration,
        now: Instant,
        task: TimerTask,
    ) -> TimerId {
        self.next_id = self.next_id.saturating_add(1);
        let id = TimerId(self.next_id);
        // A zero interval would make `run_due` spin on the same task.
        let interval = interval.max(Duration::from_millis(1));
        self.tasks.insert(
            id,
            Scheduled {
                owner,
                interval,
                next_due: now + interval,
                task,
            },
        );
        tracing::trace!(timer = %id, ?owner, ?interval, "scheduled timer");
        id
    }

    /// Stop a timer. Returns `false` if it was not scheduled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let removed = self.tasks.remove(&id).is_some();
        if removed {
            tracing::trace!(timer = %id, "cancelled timer");
        }
        removed
    }

    /// Run every task whose deadline has passed. Each task runs at most once
    /// per call even if several intervals elapsed; its next deadline is
    /// re-anchored on `now` so a stalled loop does not cause a burst.
    pub fn run_due(&mut self, now: Instant) -> usize {
        let mut ran = 0;
        for scheduled in self.tasks.values_mut() {
            if scheduled.next_due <= now {
                (scheduled.task)();
                scheduled.next_due = now + scheduled.interval;
                ran += 1;
            }
        }
        ran
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.tasks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of timers still scheduled on behalf of `owner`.
    pub fn owned_by(&self, owner: WindowId) -> usize {
        self.tasks
            .values()
            .filter(|scheduled| scheduled.owner == Some(owner))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, TimerTask) {
        let hits = Rc::new(Cell::new(0));
        let inner = hits.clone();
        (hits, Box::new(move || inner.set(inner.get() + 1)))
    }

    #[test]
    fn runs_only_when_due() {
        let mut s = Scheduler::new();
        let start = Instant::now();
        let (hits, task) = counter();
        s.schedule_repeating(None, Duration::from_millis(100), start, task);

        assert_eq!(s.run_due(start + Duration::from_millis(50)), 0);
        assert_eq!(s.run_due(start + Duration::from_millis(100)), 1);
        assert_eq!(s.run_due(start + Duration::from_millis(150)), 0);
        assert_eq!(s.run_due(start + Duration::from_millis(200)), 1);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn stalled_loop_does_not_burst() {
        let mut s = Scheduler::new();
        let start = Instant::now();
        let (hits, task) = counter();
        s.schedule_repeating(None, Duration::from_millis(10), start, task);
        s.run_due(start + Duration::from_secs(5));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn cancel_stops_the_task() {
        let mut s = Scheduler::new();
        let start = Instant::now();
        let (hits, task) = counter();
        let id = s.schedule_repeating(None, Duration::from_millis(10), start, task);
        assert!(s.is_scheduled(id));
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        s.run_due(start + Duration::from_secs(1));
        assert_eq!(hits.get(), 0);
        assert!(s.is_empty());
    }

    #[test]
    fn owners_are_tracked() {
        let mut s = Scheduler::new();
        let now = Instant::now();
        let owner = WindowId::from_raw(7);
        s.schedule_repeating(Some(owner), Duration::from_millis(5), now, Box::new(|| {}));
        s.schedule_repeating(None, Duration::from_millis(5), now, Box::new(|| {}));
        assert_eq!(s.owned_by(owner), 1);
        assert_eq!(s.len(), 2);
    }
}
