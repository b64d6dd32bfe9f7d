//! SPI wire protocol spoken by the peer core.
//!
//! The bus runs in mode 0 (clock idle low, sample on the rising edge), MSB first, with
//! 8-bit words. Two transactions exist: a 5-byte write frame and a 1-byte status read.

/// Write frame encoding.
pub mod frame;

pub use frame::{Frame, encode};
