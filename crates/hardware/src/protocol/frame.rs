//! Write frame encoding.
//!
//! Every memory write travels as one select-asserted burst of exactly five bytes:
//!
//! ```text
//! byte:   0         1           2            3             4
//!       [address | data[0..8) | data[8..16) | data[16..24) | data[24..32)]
//! ```
//!
//! The address comes first, followed by the data word least-significant byte first. The
//! peer's load logic shifts bytes in this order, so the layout is a wire contract.

use std::fmt;

use crate::common::{FRAME_LEN, MemAddr, Word};

/// One encoded memory-write command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    /// Encodes a write of `data` to `address`.
    pub const fn encode(address: MemAddr, data: Word) -> Self {
        let d = data.to_le_bytes();
        Self([address.val(), d[0], d[1], d[2], d[3]])
    }

    /// Wraps five raw bytes received off the wire.
    pub const fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the bytes in transmission order.
    pub const fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// Target address of the write.
    pub const fn address(&self) -> MemAddr {
        MemAddr::new(self.0[0])
    }

    /// Data word carried by the frame.
    pub const fn word(&self) -> Word {
        Word::from_le_bytes([self.0[1], self.0[2], self.0[3], self.0[4]])
    }
}

impl TryFrom<&[u8]> for Frame {
    type Error = usize;

    /// Builds a frame from a received burst; fails with the burst length if it is not
    /// exactly [`FRAME_LEN`] bytes.
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; FRAME_LEN]>::try_from(bytes)
            .map(Self)
            .map_err(|_| bytes.len())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {:#010X}", self.address(), self.word())
    }
}

/// Encodes a write of `data` to `address` into its wire frame.
///
/// Shorthand for [`Frame::encode`].
#[inline]
pub const fn encode(address: MemAddr, data: Word) -> Frame {
    Frame::encode(address, data)
}
