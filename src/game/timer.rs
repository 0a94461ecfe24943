//! Repeating timer driven by caller-supplied instants.
//!
//! The timer never reads the wall clock. A front end passes `Instant::now()`,
//! tests pass synthetic instants and advance ticks without sleeping.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Idle,
    Armed { period: Duration, next: Instant },
}

/// A single periodic schedule with cancel-and-reschedule semantics.
///
/// There is at most one schedule at any time: `arm` replaces whatever was
/// there, so a period change can never leave an old schedule firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatingTimer {
    state: TimerState,
}

impl RepeatingTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
        }
    }

    /// Cancel any schedule and start a new one whose first fire is at
    /// `now + period`
    pub fn arm(&mut self, now: Instant, period: Duration) {
        self.cancel();
        self.state = TimerState::Armed {
            period,
            next: now + period,
        };
    }

    pub fn cancel(&mut self) {
        self.state = TimerState::Idle;
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, TimerState::Armed { .. })
    }

    pub fn period(&self) -> Option<Duration> {
        match self.state {
            TimerState::Armed { period, .. } => Some(period),
            TimerState::Idle => None,
        }
    }

    /// Instant of the next fire, if armed
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            TimerState::Armed { next, .. } => Some(next),
            TimerState::Idle => None,
        }
    }

    /// Consume one due fire.
    ///
    /// Returns the instant the fire was scheduled for and moves the schedule
    /// one period forward. Returns `None` when idle or not yet due; call in a
    /// loop to catch up on several missed fires.
    pub fn poll(&mut self, now: Instant) -> Option<Instant> {
        match &mut self.state {
            TimerState::Armed { period, next } if now >= *next => {
                let fired_at = *next;
                *next += *period;
                Some(fired_at)
            }
            _ => None,
        }
    }
}

impl Default for RepeatingTimer {
    fn default() -> Self {
        Self::new()
    }
}
