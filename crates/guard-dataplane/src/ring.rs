//! Bounded non-blocking event rings
//!
//! Multi-producer, single-consumer transport between the packet path and
//! the telemetry consumer. Submission never blocks and never spins
//! unboundedly; when the ring is at capacity the record is dropped on the
//! floor and counted, which is always preferred over stalling a packet.

use crossbeam::queue::ArrayQueue;
use std::sync::atomic::{AtomicU64, Ordering};

use guard_common::{NetworkEvent, SchedSwitchEvent, EVENT_RING_BYTES};

/// Fixed-layout record that can ride an [`EventRing`]
pub trait RingRecord: Copy + Send {
    /// Encoded size used to derive ring capacity from the byte budget
    const WIRE_SIZE: usize;
}

impl RingRecord for NetworkEvent {
    const WIRE_SIZE: usize = NetworkEvent::WIRE_SIZE;
}

impl RingRecord for SchedSwitchEvent {
    const WIRE_SIZE: usize = SchedSwitchEvent::WIRE_SIZE;
}

/// Bounded lock-free ring carrying one record type
pub struct EventRing<T> {
    queue: ArrayQueue<T>,
    submitted: AtomicU64,
    dropped: AtomicU64,
}

impl<T: RingRecord> EventRing<T> {
    /// Ring with the default [`EVENT_RING_BYTES`] budget
    pub fn new() -> Self {
        Self::with_byte_budget(EVENT_RING_BYTES)
    }

    /// Ring sized to hold `budget` bytes worth of records (at least one)
    pub fn with_byte_budget(budget: usize) -> Self {
        let capacity = (budget / T::WIRE_SIZE).max(1);
        Self {
            queue: ArrayQueue::new(capacity),
            submitted: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    /// Submit a record, best-effort
    ///
    /// On success ownership moves to the ring and the record becomes visible
    /// to the consumer. On a full ring the record is discarded, never
    /// retried, and `false` is returned so callers can count the loss.
    #[inline]
    pub fn try_submit(&self, record: T) -> bool {
        match self.queue.push(record) {
            Ok(()) => {
                self.submitted.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(_) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Consumer side: pop the oldest record, non-blocking
    #[inline]
    pub fn try_recv(&self) -> Option<T> {
        self.queue.pop()
    }

    /// Records the ring can hold
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Records currently queued
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if no records are queued
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Snapshot of submission counters
    pub fn stats(&self) -> RingStats {
        RingStats {
            submitted: self.submitted.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            queued: self.queue.len(),
        }
    }
}

impl<T: RingRecord> Default for EventRing<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-atomic snapshot of ring counters
#[derive(Debug, Clone, Default)]
pub struct RingStats {
    /// Records accepted since creation
    pub submitted: u64,
    /// Records discarded because the ring was full
    pub dropped: u64,
    /// Records queued at snapshot time
    pub queued: usize,
}
