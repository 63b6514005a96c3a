//! Podguard Dataplane
//!
//! Per-packet egress enforcement and telemetry on the container fast path.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    EGRESS MONITOR (per core)                 │
//! │                                                              │
//! │  frame ──► FrameView ──► parse ──┬── not IPv4 ──► Forward    │
//! │                                  │                           │
//! │                                  ▼                           │
//! │                          PolicyTable.lookup(saddr)           │
//! │                                  │                           │
//! │                                  ▼                           │
//! │                        flag == 1 ? Drop : Forward            │
//! │                                  │                           │
//! │                                  ▼                           │
//! │                 EventRing.try_submit(event)  (best-effort)   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine runs to completion once per frame on whichever core carries
//! the packet: no blocking, no allocation, no suspension points, every path
//! bounded. The policy table and event ring are the only shared state, and
//! neither can make the packet path wait indefinitely.
//!
//! The scheduler-switch tracer in [`sched`] is a separate passive probe
//! sharing nothing with the monitor except the ring implementation.

#![warn(missing_docs)]

pub mod frame;
pub mod monitor;
pub mod ring;
pub mod sched;
pub mod stats;

#[cfg(test)]
pub(crate) mod testutil;

pub use frame::{FrameView, ParsedHeader};
pub use monitor::{EgressMonitor, Verdict};
pub use ring::{EventRing, RingRecord, RingStats};
pub use sched::SchedSwitchTracer;
pub use stats::{MonitorStats, MonitorStatsSnapshot};
