//! Checked frame view and header extraction
//!
//! Every read goes through [`FrameView`], which cannot express an
//! out-of-bounds access: a read past the frame returns `None`, and the
//! parser turns that into the "not applicable" outcome. Fail-open on
//! truncation falls out of the type rather than a threaded length check.

use guard_common::{ETH_HLEN, ETH_P_IP, IPPROTO_TCP, IPPROTO_UDP, IPV4_MIN_HLEN};

/// Borrowed, bounds-checked view over one raw frame
///
/// The view lives only for the duration of one engine invocation; nothing
/// in the dataplane retains frame bytes past the call.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    data: &'a [u8],
}

impl<'a> FrameView<'a> {
    /// Wrap a raw frame
    #[inline(always)]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Frame length in bytes
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the frame is empty
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `len` bytes starting at `offset`, if fully inside the frame
    #[inline(always)]
    fn slice(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        self.data.get(offset..offset.checked_add(len)?)
    }

    /// Single byte at `offset`
    #[inline(always)]
    pub fn u8_at(&self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    /// Big-endian u16 at `offset`
    #[inline(always)]
    pub fn u16_be_at(&self, offset: usize) -> Option<u16> {
        let bytes = self.slice(offset, 2)?;
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// 32-bit address at `offset`, in the byte order captured from the wire
    #[inline(always)]
    pub fn addr_at(&self, offset: usize) -> Option<u32> {
        let bytes = self.slice(offset, 4)?;
        Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Extract the IPv4 header fields, if this is a well-formed IPv4 frame
    ///
    /// Returns `None` for anything the monitor must pass through untouched:
    /// frames too short for an Ethernet header, non-IPv4 ethertypes, and
    /// frames truncated inside the minimal IPv4 header. Ports stay 0 unless
    /// the protocol is TCP/UDP and the first 4 transport bytes are present.
    pub fn parse(&self) -> Option<ParsedHeader> {
        let ethertype = self.u16_be_at(ETH_HLEN - 2)?;
        if ethertype != ETH_P_IP {
            return None;
        }

        // The whole minimal IPv4 header must be present before any field
        // of it is interpreted.
        self.slice(ETH_HLEN, IPV4_MIN_HLEN)?;

        let ihl_words = self.u8_at(ETH_HLEN)? & 0x0f;
        let protocol = self.u8_at(ETH_HLEN + 9)?;
        let saddr = self.addr_at(ETH_HLEN + 12)?;
        let daddr = self.addr_at(ETH_HLEN + 16)?;

        // Transport offset comes from the declared header length, which may
        // point past the frame; the checked reads below tolerate that.
        let transport = ETH_HLEN + usize::from(ihl_words) * 4;

        let mut sport = 0;
        let mut dport = 0;
        if protocol == IPPROTO_TCP || protocol == IPPROTO_UDP {
            if let (Some(sp), Some(dp)) =
                (self.u16_be_at(transport), self.u16_be_at(transport + 2))
            {
                sport = sp;
                dport = dp;
            }
        }

        Some(ParsedHeader {
            saddr,
            daddr,
            protocol,
            sport,
            dport,
        })
    }
}

/// Header fields extracted from one IPv4 frame
///
/// Only ever constructed after the bounds checks in [`FrameView::parse`]
/// have confirmed every read field lies within the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedHeader {
    /// Source address, wire byte order
    pub saddr: u32,
    /// Destination address, wire byte order
    pub daddr: u32,
    /// IP protocol number
    pub protocol: u8,
    /// Source port, host order (0 when unavailable)
    pub sport: u16,
    /// Destination port, host order (0 when unavailable)
    pub dport: u16,
}
