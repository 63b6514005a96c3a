//! Engine statistics
//!
//! Lock-free counters for the egress monitor. Updated from the packet path
//! with relaxed atomics only.

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-engine counters (cache-line aligned)
#[repr(C, align(64))]
#[derive(Default)]
pub struct MonitorStats {
    /// IPv4 frames that reached the decision procedure
    pub ipv4_frames: AtomicU64,
    /// Frames passed through untouched (non-IPv4 or truncated)
    pub passthrough: AtomicU64,
    /// Frames dropped by policy
    pub blocked: AtomicU64,
}

impl MonitorStats {
    #[inline(always)]
    pub(crate) fn record_ipv4(&self) {
        self.ipv4_frames.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub(crate) fn record_passthrough(&self) {
        self.passthrough.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub(crate) fn record_blocked(&self) {
        self.blocked.fetch_add(1, Ordering::Relaxed);
    }

    /// Non-atomic snapshot
    pub fn snapshot(&self) -> MonitorStatsSnapshot {
        MonitorStatsSnapshot {
            ipv4_frames: self.ipv4_frames.load(Ordering::Relaxed),
            passthrough: self.passthrough.load(Ordering::Relaxed),
            blocked: self.blocked.load(Ordering::Relaxed),
        }
    }
}

/// Stats snapshot (non-atomic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorStatsSnapshot {
    /// IPv4 frames that reached the decision procedure
    pub ipv4_frames: u64,
    /// Frames passed through untouched
    pub passthrough: u64,
    /// Frames dropped by policy
    pub blocked: u64,
}

impl MonitorStatsSnapshot {
    /// Fraction of decided frames that were blocked
    pub fn block_rate(&self) -> f64 {
        if self.ipv4_frames == 0 {
            return 0.0;
        }
        self.blocked as f64 / self.ipv4_frames as f64
    }
}
