//! Telemetry record layouts
//!
//! Fixed-layout records carried by the bounded event rings. Field order and
//! sizing match what the userspace consumer decodes: addresses travel in the
//! byte order captured from the wire, ports and task ids in host order.

use bytes::{Buf, BufMut};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

use crate::{GuardError, GuardResult, TASK_COMM_LEN};

/// One observation of a processed IPv4 frame and the verdict taken
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(C)]
pub struct NetworkEvent {
    /// Source IPv4 address
    pub saddr: u32,
    /// Destination IPv4 address
    pub daddr: u32,
    /// Source port (0 when not TCP/UDP or transport header truncated)
    pub sport: u16,
    /// Destination port (0 when not TCP/UDP or transport header truncated)
    pub dport: u16,
    /// IP protocol number
    pub protocol: u8,
    /// 1 when the packet was dropped
    pub blocked: u8,
    /// 1 when the source address had a policy table entry
    pub found_in_map: u8,
    /// Raw policy value observed (0 when absent)
    pub block_flag_value: u8,
    /// Diagnostic copy of the address used for the table lookup
    pub saddr_lookup: u32,
}

impl NetworkEvent {
    /// Encoded size: 4 + 4 + 2 + 2 + 1 + 1 + 1 + 1 + 4
    pub const WIRE_SIZE: usize = 20;

    /// Source address as a displayable [`Ipv4Addr`]
    #[inline]
    pub fn src(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.saddr)
    }

    /// Destination address as a displayable [`Ipv4Addr`]
    #[inline]
    pub fn dst(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.daddr)
    }

    /// Append the fixed wire layout to `buf`
    pub fn encode(&self, buf: &mut impl BufMut) {
        buf.put_u32(self.saddr);
        buf.put_u32(self.daddr);
        buf.put_u16_ne(self.sport);
        buf.put_u16_ne(self.dport);
        buf.put_u8(self.protocol);
        buf.put_u8(self.blocked);
        buf.put_u8(self.found_in_map);
        buf.put_u8(self.block_flag_value);
        buf.put_u32(self.saddr_lookup);
    }

    /// Decode one record from `buf`
    pub fn decode(buf: &mut impl Buf) -> GuardResult<Self> {
        if buf.remaining() < Self::WIRE_SIZE {
            return Err(GuardError::TruncatedRecord {
                needed: Self::WIRE_SIZE,
                got: buf.remaining(),
            });
        }
        Ok(Self {
            saddr: buf.get_u32(),
            daddr: buf.get_u32(),
            sport: buf.get_u16_ne(),
            dport: buf.get_u16_ne(),
            protocol: buf.get_u8(),
            blocked: buf.get_u8(),
            found_in_map: buf.get_u8(),
            block_flag_value: buf.get_u8(),
            saddr_lookup: buf.get_u32(),
        })
    }
}

/// One task-context-switch observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(C)]
pub struct SchedSwitchEvent {
    /// Task id switched out
    pub prev_pid: i32,
    /// Task id switched in
    pub next_pid: i32,
    /// Name of the task switched out, null-padded
    pub prev_comm: [u8; TASK_COMM_LEN],
    /// Name of the task switched in, null-padded
    pub next_comm: [u8; TASK_COMM_LEN],
}

impl SchedSwitchEvent {
    /// Encoded size: 4 + 4 + 16 + 16
    pub const WIRE_SIZE: usize = 40;

    /// Build an event, truncating names to [`TASK_COMM_LEN`]
    pub fn new(prev_pid: i32, prev_comm: &str, next_pid: i32, next_comm: &str) -> Self {
        Self {
            prev_pid,
            next_pid,
            prev_comm: pack_comm(prev_comm),
            next_comm: pack_comm(next_comm),
        }
    }

    /// Previous task name up to the first null byte
    pub fn prev_comm_str(&self) -> &str {
        comm_str(&self.prev_comm)
    }

    /// Next task name up to the first null byte
    pub fn next_comm_str(&self) -> &str {
        comm_str(&self.next_comm)
    }

    /// Append the fixed wire layout to `buf`
    pub fn encode(&self, buf: &mut impl BufMut) {
        buf.put_i32_ne(self.prev_pid);
        buf.put_i32_ne(self.next_pid);
        buf.put_slice(&self.prev_comm);
        buf.put_slice(&self.next_comm);
    }

    /// Decode one record from `buf`
    pub fn decode(buf: &mut impl Buf) -> GuardResult<Self> {
        if buf.remaining() < Self::WIRE_SIZE {
            return Err(GuardError::TruncatedRecord {
                needed: Self::WIRE_SIZE,
                got: buf.remaining(),
            });
        }
        let prev_pid = buf.get_i32_ne();
        let next_pid = buf.get_i32_ne();
        let mut prev_comm = [0u8; TASK_COMM_LEN];
        let mut next_comm = [0u8; TASK_COMM_LEN];
        buf.copy_to_slice(&mut prev_comm);
        buf.copy_to_slice(&mut next_comm);
        Ok(Self {
            prev_pid,
            next_pid,
            prev_comm,
            next_comm,
        })
    }
}

fn pack_comm(name: &str) -> [u8; TASK_COMM_LEN] {
    let mut comm = [0u8; TASK_COMM_LEN];
    let bytes = name.as_bytes();
    let len = bytes.len().min(TASK_COMM_LEN);
    comm[..len].copy_from_slice(&bytes[..len]);
    comm
}

fn comm_str(comm: &[u8; TASK_COMM_LEN]) -> &str {
    let end = comm.iter().position(|&b| b == 0).unwrap_or(TASK_COMM_LEN);
    std::str::from_utf8(&comm[..end]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn test_network_event_roundtrip() {
        let event = NetworkEvent {
            saddr: u32::from(Ipv4Addr::new(10, 0, 0, 5)),
            daddr: u32::from(Ipv4Addr::new(8, 8, 8, 8)),
            sport: 4444,
            dport: 53,
            protocol: 17,
            blocked: 1,
            found_in_map: 1,
            block_flag_value: 1,
            saddr_lookup: u32::from(Ipv4Addr::new(10, 0, 0, 5)),
        };

        let mut buf = BytesMut::new();
        event.encode(&mut buf);
        assert_eq!(buf.len(), NetworkEvent::WIRE_SIZE);

        let decoded = NetworkEvent::decode(&mut buf).unwrap();
        assert_eq!(decoded, event);
        assert_eq!(decoded.src(), Ipv4Addr::new(10, 0, 0, 5));
    }

    #[test]
    fn test_network_event_truncated() {
        let mut buf = &[0u8; 10][..];
        let err = NetworkEvent::decode(&mut buf).unwrap_err();
        assert!(matches!(err, GuardError::TruncatedRecord { needed: 20, got: 10 }));
    }

    #[test]
    fn test_sched_event_comm_truncation() {
        let event = SchedSwitchEvent::new(42, "a-task-name-longer-than-sixteen", 43, "swapper/0");
        assert_eq!(event.prev_comm_str(), "a-task-name-long");
        assert_eq!(event.next_comm_str(), "swapper/0");

        let mut buf = BytesMut::new();
        event.encode(&mut buf);
        assert_eq!(buf.len(), SchedSwitchEvent::WIRE_SIZE);
        assert_eq!(SchedSwitchEvent::decode(&mut buf).unwrap(), event);
    }
}
