// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Timer scheduling
//!
//! A minimal single-threaded callback scheduler. The host event loop is
//! expected to call [`run_due`] periodically (or whenever [`Scheduler::next_wake`]
//! elapses); tests drive it directly with crafted instants.

use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Handle to a scheduled callback
///
/// Tokens are unique per [`Scheduler`] instance and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerToken(u64);

type Callback = Box<dyn FnOnce()>;

/// A single-threaded callback scheduler
///
/// Callbacks fire at approximately `now + delay`, in time order. A scheduled
/// callback may be cancelled until it fires; re-scheduling after a cancel is
/// how debounce windows are re-armed.
#[derive(Default)]
pub struct Scheduler {
    next_token: u64,
    // Reverse sorted by time: soonest last
    queue: SmallVec<[(Instant, TimerToken, Callback); 8]>,
}

impl Scheduler {
    pub fn new() -> Self {
        Scheduler::default()
    }

    /// Schedule `cb` to run at approximately `Instant::now() + delay`
    pub fn schedule(&mut self, delay: Duration, cb: impl FnOnce() + 'static) -> TimerToken {
        let time = Instant::now() + delay;
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        log::trace!(
            target: "lvc_core::schedule",
            "schedule: {token:?} at now+{}ms",
            delay.as_millis()
        );
        self.queue.push((time, token, Box::new(cb)));
        self.queue.sort_by(|a, b| b.0.cmp(&a.0)); // reverse sort
        token
    }

    /// Cancel a scheduled callback, returning `true` if it had not yet fired
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        if let Some(index) = self.queue.iter().position(|row| row.1 == token) {
            self.queue.remove(index);
            true
        } else {
            false
        }
    }

    /// Time at which the next callback is due
    pub fn next_wake(&self) -> Option<Instant> {
        self.queue.last().map(|row| row.0)
    }

    /// Whether any callbacks are scheduled
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    fn take_due(&mut self, now: Instant) -> SmallVec<[Callback; 8]> {
        let mut due = SmallVec::new();
        while self.queue.last().is_some_and(|row| row.0 <= now) {
            if let Some((_, _, cb)) = self.queue.pop() {
                due.push(cb);
            }
        }
        due
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("next_token", &self.next_token)
            .field("queue_len", &self.queue.len())
            .finish()
    }
}

/// Run all callbacks due at `now`, returning the number run
///
/// Due callbacks are removed from the queue before any of them runs, so a
/// callback may freely schedule further work — including at zero delay, which
/// is picked up within the same call. A callback unconditionally
/// re-scheduling itself at zero delay would therefore never return; don't.
pub fn run_due(scheduler: &Rc<RefCell<Scheduler>>, now: Instant) -> usize {
    let mut count = 0;
    loop {
        let due = scheduler.borrow_mut().take_due(now);
        if due.is_empty() {
            return count;
        }
        count += due.len();
        for cb in due {
            cb();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared() -> Rc<RefCell<Scheduler>> {
        Rc::new(RefCell::new(Scheduler::new()))
    }

    #[test]
    fn fires_in_time_order() {
        let scheduler = shared();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (name, ms) in [("b", 20), ("a", 10), ("c", 30)] {
            let log = log.clone();
            scheduler
                .borrow_mut()
                .schedule(Duration::from_millis(ms), move || log.borrow_mut().push(name));
        }

        // Nothing is due yet
        assert_eq!(run_due(&scheduler, Instant::now()), 0);

        let later = Instant::now() + Duration::from_secs(1);
        assert_eq!(run_due(&scheduler, later), 3);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert!(scheduler.borrow().is_idle());
    }

    #[test]
    fn cancel_prevents_firing() {
        let scheduler = shared();
        let log = Rc::new(RefCell::new(Vec::new()));
        let token = {
            let log = log.clone();
            scheduler
                .borrow_mut()
                .schedule(Duration::from_millis(10), move || log.borrow_mut().push(1))
        };
        assert!(scheduler.borrow_mut().cancel(token));
        assert!(!scheduler.borrow_mut().cancel(token));

        let later = Instant::now() + Duration::from_secs(1);
        assert_eq!(run_due(&scheduler, later), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn callbacks_may_reschedule() {
        let scheduler = shared();
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let log = log.clone();
            let inner_scheduler = scheduler.clone();
            scheduler.borrow_mut().schedule(Duration::ZERO, move || {
                log.borrow_mut().push("outer");
                let log = log.clone();
                inner_scheduler
                    .borrow_mut()
                    .schedule(Duration::ZERO, move || log.borrow_mut().push("inner"));
            });
        }

        let later = Instant::now() + Duration::from_secs(1);
        assert_eq!(run_due(&scheduler, later), 2);
        assert_eq!(*log.borrow(), vec!["outer", "inner"]);
    }
}
