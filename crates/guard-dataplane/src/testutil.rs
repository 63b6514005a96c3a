//! Frame builders shared by the dataplane tests

use std::net::Ipv4Addr;

/// Ethernet + IPv4 + 20 payload bytes (54 total), ports written big-endian
/// at the transport offset regardless of `protocol`
pub fn ipv4_frame(src: &str, dst: &str, protocol: u8, sport: u16, dport: u16) -> Vec<u8> {
    let src: Ipv4Addr = src.parse().unwrap();
    let dst: Ipv4Addr = dst.parse().unwrap();

    let mut frame = vec![0u8; 54];
    // Ethernet
    frame[12] = 0x08;
    frame[13] = 0x00;
    // IPv4, IHL = 5
    frame[14] = 0x45;
    frame[22] = 64; // TTL
    frame[23] = protocol;
    frame[26..30].copy_from_slice(&src.octets());
    frame[30..34].copy_from_slice(&dst.octets());
    // Transport
    frame[34..36].copy_from_slice(&sport.to_be_bytes());
    frame[36..38].copy_from_slice(&dport.to_be_bytes());
    frame
}

/// Minimal IPv6 frame (ethertype 0x86DD)
pub fn ipv6_frame() -> Vec<u8> {
    let mut frame = vec![0u8; 74];
    frame[12] = 0x86;
    frame[13] = 0xdd;
    frame[14] = 0x60;
    frame
}
