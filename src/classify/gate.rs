use crate::hand::{Landmark, LandmarkFrame};
use std::time::{Duration, Instant};

/// Lossy rate limiter between raw detector output and the classification
/// service.
///
/// Video frames vastly outnumber useful classification opportunities, so
/// excess frames are dropped, never queued: at most one request is in
/// flight, and at most one is dispatched per cooldown window.
#[derive(Debug)]
pub struct PredictionGate {
    cooldown: Duration,
    last_dispatch: Option<Instant>,
    in_flight: bool,
}

impl PredictionGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_dispatch: None,
            in_flight: false,
        }
    }

    /// Admit at most one hand from a detector result.
    ///
    /// Selects the first hand only; a hand without exactly 21 points is
    /// dropped silently. Returns `None` while a request is in flight or the
    /// cooldown window is still open. On acceptance the dispatch timestamp
    /// advances immediately, before any response arrives.
    pub fn admit(&mut self, hands: &[Vec<Landmark>], now: Instant) -> Option<LandmarkFrame> {
        let first = hands.first()?;
        let frame = LandmarkFrame::from_hand(first)?;

        if self.in_flight {
            return None;
        }
        if let Some(last) = self.last_dispatch {
            if now.duration_since(last) < self.cooldown {
                return None;
            }
        }

        self.last_dispatch = Some(now);
        self.in_flight = true;
        Some(frame)
    }

    /// Mark the outstanding request as finished. Called for every response,
    /// stale ones included, so the gate cannot wedge.
    pub fn complete(&mut self) {
        self.in_flight = false;
    }

    /// Clear all gate state. Called on every mode transition.
    pub fn reset(&mut self) {
        self.last_dispatch = None;
        self.in_flight = false;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_millis(2000);

    fn hand() -> Vec<Landmark> {
        vec![Landmark::default(); 21]
    }

    #[test]
    fn admits_first_valid_hand() {
        let mut gate = PredictionGate::new(COOLDOWN);
        let now = Instant::now();

        let hands = vec![hand(), vec![Landmark::default(); 20]];
        assert!(gate.admit(&hands, now).is_some());
        assert!(gate.in_flight());
    }

    #[test]
    fn drops_empty_and_malformed_detections() {
        let mut gate = PredictionGate::new(COOLDOWN);
        let now = Instant::now();

        assert!(gate.admit(&[], now).is_none());
        assert!(gate.admit(&[vec![Landmark::default(); 20]], now).is_none());
        assert!(gate.admit(&[vec![Landmark::default(); 22]], now).is_none());
        assert!(!gate.in_flight(), "Rejected detections must not open a dispatch");
    }

    #[test]
    fn only_first_hand_is_considered() {
        let mut gate = PredictionGate::new(COOLDOWN);
        let now = Instant::now();

        // A malformed first hand is dropped even when a valid second exists.
        let hands = vec![vec![Landmark::default(); 5], hand()];
        assert!(gate.admit(&hands, now).is_none());
    }

    #[test]
    fn rejects_while_in_flight() {
        let mut gate = PredictionGate::new(COOLDOWN);
        let now = Instant::now();

        assert!(gate.admit(&[hand()], now).is_some());
        assert!(gate.admit(&[hand()], now + COOLDOWN * 2).is_none());

        gate.complete();
        assert!(gate.admit(&[hand()], now + COOLDOWN * 2).is_some());
    }

    #[test]
    fn never_dispatches_twice_within_cooldown() {
        let mut gate = PredictionGate::new(COOLDOWN);
        let start = Instant::now();

        assert!(gate.admit(&[hand()], start).is_some());
        gate.complete();

        // Hammer the gate at frame rate for one window: nothing gets through.
        for ms in (0..2000).step_by(16) {
            let now = start + Duration::from_millis(ms);
            assert!(gate.admit(&[hand()], now).is_none(), "Dispatched at +{}ms", ms);
        }

        assert!(gate.admit(&[hand()], start + COOLDOWN).is_some());
    }

    #[test]
    fn reset_reopens_the_window() {
        let mut gate = PredictionGate::new(COOLDOWN);
        let now = Instant::now();

        assert!(gate.admit(&[hand()], now).is_some());
        gate.reset();
        assert!(gate.admit(&[hand()], now).is_some());
    }
}
