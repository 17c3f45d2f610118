use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_secs(1);

/// One-second countdown clock for test rounds.
///
/// Deadline-based and cooperative: the owner calls `poll` from its event
/// loop and reacts to expirations. Cancelling clears the deadline, so
/// timers can never overlap across mode changes.
#[derive(Debug, Default)]
pub struct RoundTimer {
    deadline: Option<Instant>,
}

impl RoundTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) ticking from `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + TICK);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Report one elapsed tick, re-arming from the previous deadline so a
    /// slow caller drains every missed second without drift. Returns false
    /// while cancelled or before the next deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = Some(deadline + TICK);
                true
            }
            _ => false,
        }
    }
}
