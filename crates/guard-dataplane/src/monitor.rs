//! Egress verdict engine
//!
//! One synchronous, run-to-completion decision per outbound frame: parse,
//! look up the source address, decide, then best-effort telemetry. No state
//! survives an invocation and nothing on this path blocks or allocates.

use std::sync::Arc;

use guard_common::NetworkEvent;
use guard_policy::{PolicyTable, FLAG_BLOCK};

use crate::frame::FrameView;
use crate::ring::EventRing;
use crate::stats::MonitorStats;

/// Binary outcome for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Let the frame leave the host
    Forward,
    /// Discard the frame
    Drop,
}

impl Verdict {
    /// Traffic-control action code for an egress classifier hook
    /// (`TC_ACT_OK` / `TC_ACT_SHOT`)
    #[inline]
    pub const fn tc_action(self) -> i32 {
        match self {
            Verdict::Forward => 0,
            Verdict::Drop => 2,
        }
    }

    /// Check for the drop outcome
    #[inline]
    pub const fn is_drop(self) -> bool {
        matches!(self, Verdict::Drop)
    }
}

/// Per-packet policy enforcement and telemetry engine
///
/// Shared across cores behind `Arc`; each invocation of [`process`] is
/// independent and reads only the policy table and the event ring.
///
/// [`process`]: EgressMonitor::process
pub struct EgressMonitor {
    table: Arc<PolicyTable>,
    events: Arc<EventRing<NetworkEvent>>,
    stats: MonitorStats,
}

impl EgressMonitor {
    /// Build an engine over an externally managed table and ring
    pub fn new(table: Arc<PolicyTable>, events: Arc<EventRing<NetworkEvent>>) -> Self {
        Self {
            table,
            events,
            stats: MonitorStats::default(),
        }
    }

    /// Decide the fate of one outbound frame
    ///
    /// Non-IPv4 and truncated frames pass through with no table query and
    /// no telemetry. For IPv4 frames the verdict is decided before the
    /// telemetry submission is attempted, so a saturated ring can
    /// under-report but never change enforcement.
    pub fn process(&self, frame: &[u8]) -> Verdict {
        let Some(header) = FrameView::new(frame).parse() else {
            self.stats.record_passthrough();
            return Verdict::Forward;
        };
        self.stats.record_ipv4();

        let flag = self.table.lookup(header.saddr);
        let blocked = flag == Some(FLAG_BLOCK);

        let event = NetworkEvent {
            saddr: header.saddr,
            daddr: header.daddr,
            sport: header.sport,
            dport: header.dport,
            protocol: header.protocol,
            blocked: blocked as u8,
            found_in_map: flag.is_some() as u8,
            block_flag_value: flag.unwrap_or(0),
            saddr_lookup: header.saddr,
        };
        self.events.try_submit(event);

        if blocked {
            self.stats.record_blocked();
            Verdict::Drop
        } else {
            Verdict::Forward
        }
    }

    /// Counters for this engine
    pub fn stats(&self) -> &MonitorStats {
        &self.stats
    }
}
