//! Podguard Common - Shared types for the egress enforcement dataplane
//!
//! This crate provides the pieces shared by the policy table and the
//! dataplane engines:
//! - Telemetry record layouts (network events, scheduler-switch events)
//! - Wire constants for frame parsing
//! - Error handling

#![warn(missing_docs)]

pub mod error;
pub mod event;

pub use error::*;
pub use event::*;

/// Ethernet header length in bytes
pub const ETH_HLEN: usize = 14;

/// EtherType for IPv4
pub const ETH_P_IP: u16 = 0x0800;

/// Minimal IPv4 header length in bytes (IHL = 5)
pub const IPV4_MIN_HLEN: usize = 20;

/// IP protocol number for TCP
pub const IPPROTO_TCP: u8 = 6;

/// IP protocol number for UDP
pub const IPPROTO_UDP: u8 = 17;

/// Kernel task name length (null-padded, truncating)
pub const TASK_COMM_LEN: usize = 16;

/// Byte budget for each bounded event ring
pub const EVENT_RING_BYTES: usize = 256 * 1024;

/// Maximum number of live policy table entries
pub const POLICY_MAX_ENTRIES: usize = 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(ETH_HLEN + IPV4_MIN_HLEN, 34);
        assert!(EVENT_RING_BYTES / NetworkEvent::WIRE_SIZE >= POLICY_MAX_ENTRIES);
    }
}
