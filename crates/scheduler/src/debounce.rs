//! Debounce scheduler state machine
//!
//! Tracks the threshold currently being computed and at most one pending
//! follow-up value. Both operations run on the coordination thread only, so
//! no locking is needed; workers report back through a channel rather than
//! by touching this state.

/// Minimum difference from the in-flight threshold for a new request to be
/// treated as materially different, on the [0, 255] sample scale.
pub const DEBOUNCE_EPSILON: u8 = 5;

/// Coalescing scheduler for slider-driven recomputation.
///
/// Invariants:
/// - at most one computation is in flight at any instant;
/// - at most one pending value is held, overwritten rather than queued;
/// - the last value the user settles on is eventually dispatched.
///
/// The scheduler never runs work itself. [`request`](Self::request) and
/// [`complete`](Self::complete) return the threshold the caller must
/// dispatch, if any, keeping dispatch mechanics out of the state machine.
#[derive(Debug, Default)]
pub struct DebounceScheduler {
    in_flight: Option<u8>,
    pending: Option<u8>,
}

impl DebounceScheduler {
    /// Create an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a recomputation at `threshold`.
    ///
    /// Returns `Some(threshold)` when the caller should dispatch a worker
    /// now. Returns `None` when the request was coalesced: either parked as
    /// the pending value (it differs from the in-flight value by more than
    /// [`DEBOUNCE_EPSILON`]) or dropped as in-progress jitter.
    pub fn request(&mut self, threshold: u8) -> Option<u8> {
        let Some(in_flight) = self.in_flight else {
            self.in_flight = Some(threshold);
            return Some(threshold);
        };

        if threshold.abs_diff(in_flight) > DEBOUNCE_EPSILON {
            // Overwrites any earlier pending value; only the latest wins.
            self.pending = Some(threshold);
        } else {
            log::trace!("dropped threshold {threshold}, within epsilon of {in_flight}");
        }

        None
    }

    /// Record that the in-flight computation finished.
    ///
    /// Called on success and on failure alike, so a failed worker can never
    /// strand the in-flight marker. Returns the pending threshold to
    /// dispatch next, if one accumulated while the worker ran.
    pub fn complete(&mut self) -> Option<u8> {
        self.in_flight = None;

        match self.pending.take() {
            Some(threshold) => self.request(threshold),
            None => None,
        }
    }

    /// The threshold currently being computed, if any.
    pub fn in_flight(&self) -> Option<u8> {
        self.in_flight
    }

    /// The threshold waiting for the current computation to finish, if any.
    pub fn pending(&self) -> Option<u8> {
        self.pending
    }

    /// True when nothing is running and nothing is pending.
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none() && self.pending.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_request_dispatches() {
        let mut scheduler = DebounceScheduler::new();

        assert_eq!(scheduler.request(100), Some(100));
        assert_eq!(scheduler.in_flight(), Some(100));
        assert_eq!(scheduler.pending(), None);
    }

    #[test]
    fn test_request_within_epsilon_is_dropped() {
        let mut scheduler = DebounceScheduler::new();
        scheduler.request(100);

        // abs_diff == DEBOUNCE_EPSILON is still "close enough".
        assert_eq!(scheduler.request(105), None);
        assert_eq!(scheduler.request(95), None);

        assert_eq!(scheduler.in_flight(), Some(100));
        assert_eq!(scheduler.pending(), None);
    }

    #[test]
    fn test_request_beyond_epsilon_parks_pending() {
        let mut scheduler = DebounceScheduler::new();
        scheduler.request(100);

        assert_eq!(scheduler.request(106), None);

        assert_eq!(scheduler.in_flight(), Some(100));
        assert_eq!(scheduler.pending(), Some(106));
    }

    #[test]
    fn test_jitter_leaves_existing_pending_unchanged() {
        let mut scheduler = DebounceScheduler::new();
        scheduler.request(100);
        scheduler.request(200);

        // Back within epsilon of the in-flight value: dropped, and the
        // parked pending value stays as it was.
        assert_eq!(scheduler.request(103), None);
        assert_eq!(scheduler.pending(), Some(200));
    }

    #[test]
    fn test_pending_is_overwritten_not_queued() {
        let mut scheduler = DebounceScheduler::new();
        scheduler.request(100);

        scheduler.request(150);
        scheduler.request(200);
        scheduler.request(30);

        assert_eq!(scheduler.pending(), Some(30));
    }

    #[test]
    fn test_complete_without_pending_goes_idle() {
        let mut scheduler = DebounceScheduler::new();
        scheduler.request(100);

        assert_eq!(scheduler.complete(), None);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_complete_dispatches_pending_exactly_once() {
        let mut scheduler = DebounceScheduler::new();
        scheduler.request(100);
        scheduler.request(200);

        assert_eq!(scheduler.complete(), Some(200));
        assert_eq!(scheduler.in_flight(), Some(200));
        assert_eq!(scheduler.pending(), None);

        // The follow-up dispatch behaves like any other in-flight job.
        assert_eq!(scheduler.complete(), None);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_only_one_in_flight_at_a_time() {
        let mut scheduler = DebounceScheduler::new();

        assert!(scheduler.request(10).is_some());
        assert!(scheduler.request(20).is_none());
        assert!(scheduler.request(30).is_none());
        assert!(scheduler.request(40).is_none());

        assert_eq!(scheduler.in_flight(), Some(10));
    }

    #[test]
    fn test_zero_is_a_valid_threshold() {
        let mut scheduler = DebounceScheduler::new();

        // 0 must behave like any other value, not like "absent".
        assert_eq!(scheduler.request(0), Some(0));
        assert_eq!(scheduler.in_flight(), Some(0));

        assert_eq!(scheduler.request(255), None);
        assert_eq!(scheduler.pending(), Some(255));

        assert_eq!(scheduler.complete(), Some(255));
    }

    #[test]
    fn test_zero_pending_survives_completion() {
        let mut scheduler = DebounceScheduler::new();
        scheduler.request(200);
        scheduler.request(0);

        assert_eq!(scheduler.pending(), Some(0));
        assert_eq!(scheduler.complete(), Some(0));
        assert_eq!(scheduler.in_flight(), Some(0));
    }

    #[test]
    fn test_complete_after_failure_clears_marker() {
        let mut scheduler = DebounceScheduler::new();
        scheduler.request(100);

        // The caller invokes complete() on worker failure as well; the
        // marker must clear so later requests can dispatch again.
        assert_eq!(scheduler.complete(), None);
        assert_eq!(scheduler.request(100), Some(100));
    }

    #[test]
    fn test_slider_scrub_settles_on_last_value() {
        let mut scheduler = DebounceScheduler::new();

        let mut dispatched = Vec::new();
        if let Some(t) = scheduler.request(50) {
            dispatched.push(t);
        }

        // Scrub while the worker runs; only the latest value matters.
        for value in [80, 120, 160, 240] {
            assert_eq!(scheduler.request(value), None);
        }

        while let Some(t) = scheduler.complete() {
            dispatched.push(t);
        }

        assert_eq!(dispatched, vec![50, 240]);
        assert!(scheduler.is_idle());
    }
}
