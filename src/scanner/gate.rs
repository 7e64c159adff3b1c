//! Admission gate for bounded concurrency.
//!
//! A counting gate built on a tokio `Semaphore`. It also tracks how many
//! slots are held right now and the highest count ever observed, which is
//! how tests prove the concurrency ceiling holds.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

/// Limits the number of simultaneously in-flight probes.
///
/// Cloning is cheap; clones share the same slots and counters.
#[derive(Clone)]
pub struct AdmissionGate {
    semaphore: Arc<Semaphore>,
    counters: Arc<Counters>,
    capacity: usize,
}

#[derive(Default)]
struct Counters {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl AdmissionGate {
    /// Create a gate with `capacity` slots. Capacity must be non-zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            counters: Arc::new(Counters::default()),
            capacity,
        }
    }

    /// Wait until a slot is free and take it.
    ///
    /// The slot is returned when the [`Slot`] is dropped.
    pub async fn acquire(&self) -> Result<Slot, AcquireError> {
        let permit = Arc::clone(&self.semaphore).acquire_owned().await?;

        let now = self.counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak.fetch_max(now, Ordering::SeqCst);

        Ok(Slot {
            _permit: permit,
            counters: Arc::clone(&self.counters),
        })
    }

    /// Configured ceiling.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently held.
    pub fn in_flight(&self) -> usize {
        self.counters.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of slots held at once since creation.
    pub fn peak(&self) -> usize {
        self.counters.peak.load(Ordering::SeqCst)
    }
}

/// A held admission slot.
pub struct Slot {
    _permit: OwnedSemaphorePermit,
    counters: Arc<Counters>,
}

impl Drop for Slot {
    fn drop(&mut self) {
        // Runs before `_permit` is released.
        self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_gate_counts_slots() {
        let gate = AdmissionGate::new(2);
        let a = gate.acquire().await.unwrap();
        let b = gate.acquire().await.unwrap();
        assert_eq!(gate.in_flight(), 2);
        assert_eq!(gate.peak(), 2);

        drop(a);
        assert_eq!(gate.in_flight(), 1);
        drop(b);
        assert_eq!(gate.in_flight(), 0);
        assert_eq!(gate.peak(), 2);
    }

    #[tokio::test]
    async fn test_gate_blocks_when_full() {
        let gate = AdmissionGate::new(1);
        let held = gate.acquire().await.unwrap();

        let waiter = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.acquire().await.map(|_| ()) })
        };

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(held);
        waiter.await.unwrap().unwrap();
        assert_eq!(gate.peak(), 1);
    }

    #[test]
    fn test_gate_clone_shares_state() {
        let gate = AdmissionGate::new(4);
        let clone = gate.clone();
        assert_eq!(clone.capacity(), 4);
        assert_eq!(clone.in_flight(), gate.in_flight());
    }
}
