//! Refresh scheduling - poll interval, in-flight dedup and request fencing
//!
//! Every issued request gets a sequence number. Only the completion event
//! carrying the latest number for its target is applied; a target with a
//! request still in flight is not re-issued by the poll tick.

use super::FetchTarget;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Refresh scheduler - interval tracking plus per-target request state
pub struct RefreshScheduler {
    interval: Duration,
    last_tick: Instant,
    next_seq: u64,
    in_flight: HashMap<FetchTarget, u64>,
}

impl RefreshScheduler {
    /// Create a scheduler with the given poll interval
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: Instant::now(),
            next_seq: 0,
            in_flight: HashMap::new(),
        }
    }

    /// True when the poll interval has elapsed since the last tick
    pub fn due(&self) -> bool {
        self.last_tick.elapsed() >= self.interval
    }

    /// Reset the poll clock
    pub fn mark_ticked(&mut self) {
        self.last_tick = Instant::now();
    }

    /// Issue a sequence number unless a request is already in flight
    pub fn begin(&mut self, target: FetchTarget) -> Option<u64> {
        if self.in_flight.contains_key(&target) {
            log::debug!("Skipping {:?}: request already in flight", target);
            return None;
        }
        Some(self.issue(target))
    }

    /// Issue unconditionally, superseding any in-flight request
    pub fn force_begin(&mut self, target: FetchTarget) -> u64 {
        self.issue(target)
    }

    fn issue(&mut self, target: FetchTarget) -> u64 {
        self.next_seq += 1;
        self.in_flight.insert(target, self.next_seq);
        self.next_seq
    }

    /// Resolve a completion. Returns true when the event carries the latest
    /// sequence number for its target; stale events must be dropped.
    pub fn complete(&mut self, target: FetchTarget, seq: u64) -> bool {
        match self.in_flight.get(&target) {
            Some(&current) if current == seq => {
                self.in_flight.remove(&target);
                true
            }
            _ => false,
        }
    }

    pub fn is_in_flight(&self, target: FetchTarget) -> bool {
        self.in_flight.contains_key(&target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_dedup() {
        let mut scheduler = RefreshScheduler::new(Duration::from_secs(30));

        let seq = scheduler.begin(FetchTarget::Transactions);
        assert!(seq.is_some());
        // A second begin for the same target is suppressed until completion
        assert!(scheduler.begin(FetchTarget::Transactions).is_none());
        // Other targets are independent
        assert!(scheduler.begin(FetchTarget::Clients).is_some());

        assert!(scheduler.complete(FetchTarget::Transactions, seq.unwrap()));
        assert!(scheduler.begin(FetchTarget::Transactions).is_some());
    }

    #[test]
    fn test_stale_sequence_is_rejected() {
        let mut scheduler = RefreshScheduler::new(Duration::from_secs(30));

        let first = scheduler.force_begin(FetchTarget::TransactionDetail);
        let second = scheduler.force_begin(FetchTarget::TransactionDetail);
        assert_ne!(first, second);

        // The superseded request resolves late: dropped
        assert!(!scheduler.complete(FetchTarget::TransactionDetail, first));
        assert!(scheduler.is_in_flight(FetchTarget::TransactionDetail));

        assert!(scheduler.complete(FetchTarget::TransactionDetail, second));
        assert!(!scheduler.is_in_flight(FetchTarget::TransactionDetail));
    }

    #[test]
    fn test_completion_of_unknown_target() {
        let mut scheduler = RefreshScheduler::new(Duration::from_secs(30));
        assert!(!scheduler.complete(FetchTarget::Stats, 42));
    }

    #[test]
    fn test_due_respects_interval() {
        let scheduler = RefreshScheduler::new(Duration::from_secs(3600));
        assert!(!scheduler.due());

        let scheduler = RefreshScheduler::new(Duration::ZERO);
        assert!(scheduler.due());
    }
}
