//! Fixed-capacity concurrent policy table

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use guard_common::{GuardError, GuardResult, POLICY_MAX_ENTRIES};

/// Concurrent map from source address to policy flag
///
/// Sharded internally, so simultaneous lookups from multiple cores proceed
/// without contending on a single lock while the control plane writes.
pub struct PolicyTable {
    entries: DashMap<u32, u8>,
    capacity: usize,

    // Metrics
    lookups: AtomicU64,
    hits: AtomicU64,
}

impl PolicyTable {
    /// Create a table with the default capacity of [`POLICY_MAX_ENTRIES`]
    pub fn new() -> Self {
        Self::with_capacity(POLICY_MAX_ENTRIES)
    }

    /// Create a table bounded to `capacity` live entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::with_capacity(capacity),
            capacity,
            lookups: AtomicU64::new(0),
            hits: AtomicU64::new(0),
        }
    }

    /// Look up the flag for a source address
    ///
    /// Hot path: called once per IPv4 frame. Returns a copy of the flag so
    /// no shard guard is held past the call.
    #[inline]
    pub fn lookup(&self, saddr: u32) -> Option<u8> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let flag = self.entries.get(&saddr).map(|entry| *entry);
        if flag.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        flag
    }

    /// Insert or update an entry (control plane only)
    ///
    /// Fails with [`GuardError::TableFull`] when inserting a new key into a
    /// table already at capacity; updates to existing keys always succeed.
    pub fn upsert(&self, saddr: u32, flag: u8) -> GuardResult<()> {
        if !self.entries.contains_key(&saddr) && self.entries.len() >= self.capacity {
            return Err(GuardError::TableFull {
                capacity: self.capacity,
            });
        }
        self.entries.insert(saddr, flag);
        debug!(saddr, flag, "policy entry upserted");
        Ok(())
    }

    /// Remove an entry (control plane only); returns the flag if present
    pub fn remove(&self, saddr: u32) -> Option<u8> {
        let removed = self.entries.remove(&saddr).map(|(_, flag)| flag);
        if removed.is_some() {
            debug!(saddr, "policy entry removed");
        }
        removed
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured entry limit
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of lookup counters
    pub fn stats(&self) -> TableStats {
        TableStats {
            lookups: self.lookups.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-atomic snapshot of table counters
#[derive(Debug, Clone, Default)]
pub struct TableStats {
    /// Total lookups served
    pub lookups: u64,
    /// Lookups that found an entry
    pub hits: u64,
    /// Live entries at snapshot time
    pub entries: usize,
}
