// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Mismatch timer handle.
use std::{fmt, time::Duration};

/// A handle to a scheduled mismatch clear.
///
/// Deadlines are measured on the session clock, that is the elapsed time
/// since a front end defined start, so the same handle works on native and
/// wasm targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    id: u64,
    deadline: Duration,
}

impl TimerHandle {
    /// The time at which the timer fires.
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Time left before the timer fires.
    pub fn remaining(&self, now: Duration) -> Duration {
        self.deadline.saturating_sub(now)
    }

    /// Checks if the timer has expired.
    pub fn is_expired(&self, now: Duration) -> bool {
        now >= self.deadline
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}@{}ms", self.id, self.deadline.as_millis())
    }
}

/// Holds at most one pending timer.
#[derive(Debug, Default)]
pub struct Timer {
    next_id: u64,
    pending: Option<TimerHandle>,
}

impl Timer {
    /// Schedules a new timer replacing any pending one.
    pub fn schedule(&mut self, now: Duration, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle {
            id: self.next_id,
            deadline: now.saturating_add(delay),
        };

        self.pending = Some(handle);
        handle
    }

    /// Cancels the pending timer, returns the cancelled handle if any.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.pending.take()
    }

    /// The pending timer if any.
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Consumes the pending timer if it is the given handle.
    ///
    /// Returns false for a cancelled or superseded handle.
    pub fn take_if(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Consumes the pending timer if it has expired.
    pub fn take_expired(&mut self, now: Duration) -> Option<TimerHandle> {
        match self.pending {
            Some(handle) if handle.is_expired(now) => self.pending.take(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(1000);

    #[test]
    fn expire() {
        let mut timer = Timer::default();
        let handle = timer.schedule(Duration::from_millis(500), DELAY);
        assert_eq!(handle.deadline(), Duration::from_millis(1500));
        assert_eq!(
            handle.remaining(Duration::from_millis(1000)),
            Duration::from_millis(500)
        );

        assert!(timer.take_expired(Duration::from_millis(1499)).is_none());
        assert_eq!(timer.take_expired(Duration::from_millis(1500)), Some(handle));
        assert!(timer.pending().is_none());
    }

    #[test]
    fn deadline_saturates() {
        let mut timer = Timer::default();
        let handle = timer.schedule(Duration::from_millis(10), Duration::MAX);
        assert_eq!(handle.deadline(), Duration::MAX);
        assert!(timer.take_expired(Duration::from_secs(3600)).is_none());
        assert_eq!(timer.take_expired(Duration::MAX), Some(handle));
    }

    #[test]
    fn stale_handles() {
        let mut timer = Timer::default();
        let h1 = timer.schedule(Duration::ZERO, DELAY);
        let h2 = timer.schedule(Duration::ZERO, DELAY);
        assert_ne!(h1, h2);

        // A superseded handle doesn't fire.
        assert!(!timer.take_if(h1));
        assert!(timer.take_if(h2));
        assert!(!timer.take_if(h2));

        // A cancelled handle doesn't fire.
        let h3 = timer.schedule(Duration::ZERO, DELAY);
        assert_eq!(timer.cancel(), Some(h3));
        assert!(!timer.take_if(h3));
        assert!(timer.take_expired(Duration::from_secs(10)).is_none());
    }
}
