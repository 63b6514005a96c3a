//! Source-Address Policy Table
//!
//! Concurrent `source address -> flag` map shared between the control plane
//! (writer) and the packet path (readers on every core).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  upsert/remove   ┌─────────────────┐
//! │ Control Plane│ ───────────────► │   PolicyTable   │
//! └──────────────┘                  │ (sharded, 1024) │
//! ┌──────────────┐     lookup       │                 │
//! │ Packet Path  │ ───────────────► │  u32 -> u8 flag │
//! │ (per core)   │                  └─────────────────┘
//! └──────────────┘
//! ```
//!
//! The packet path only ever reads; a lookup never waits on a writer beyond
//! the shard's internal guard. Absence of an entry is the common case and
//! means "not blocked".

#![warn(missing_docs)]

pub mod table;

pub use table::{PolicyTable, TableStats};

/// Flag value that blocks traffic from a source. Strict equality: any other
/// value, including values above 1, is monitor-only.
pub const FLAG_BLOCK: u8 = 1;

/// Flag value for monitor-only entries
pub const FLAG_MONITOR: u8 = 0;
