//! Peer memory address type.
//!
//! The peer core exposes a word-addressed memory window reachable over SPI. This module
//! provides:
//! 1. **Type Safety:** A strong type so addresses cannot be mixed up with data words.
//! 2. **Wraparound:** Offsetting that stays inside the 8-bit address space (modulo 256).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 32-bit payload written to one memory slot of the peer core.
pub type Word = u32;

/// A word-addressed slot in the peer core's memory map (0-255).
///
/// Addresses count words, not bytes: address `1` is the second 32-bit slot.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MemAddr(pub u8);

impl MemAddr {
    /// Lowest valid address.
    pub const MIN: Self = Self(0);
    /// Highest valid address.
    pub const MAX: Self = Self(u8::MAX);

    /// Creates a new address from a raw 8-bit value.
    #[inline(always)]
    pub const fn new(addr: u8) -> Self {
        Self(addr)
    }

    /// Returns the raw 8-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u8 {
        self.0
    }

    /// Returns the address `offset` slots after this one, wrapping modulo 256.
    ///
    /// # Arguments
    ///
    /// * `offset` - Number of slots to advance.
    pub const fn offset(self, offset: usize) -> Self {
        Self(self.0.wrapping_add((offset % 256) as u8))
    }

    /// Returns `true` if a run of `len` words starting here crosses address 255.
    pub const fn wraps_with(self, len: usize) -> bool {
        len > 0 && self.0 as usize + len - 1 > u8::MAX as usize
    }
}

impl From<u8> for MemAddr {
    fn from(addr: u8) -> Self {
        Self(addr)
    }
}

impl From<MemAddr> for u8 {
    fn from(addr: MemAddr) -> Self {
        addr.0
    }
}

impl fmt::Display for MemAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:3}", self.0)
    }
}
