//! Common types shared across the harness.
//!
//! This module provides the fundamental building blocks used by every other component:
//! 1. **Address Types:** The word-addressed peer memory slot and the data word.
//! 2. **Constants:** Wire, timing and diagnostic constants.
//! 3. **Error Handling:** Bus, configuration and program parsing errors.

/// Address type definitions.
pub mod addr;

/// Protocol and diagnostic constants.
pub mod constants;

/// Error types.
pub mod error;

pub use addr::{MemAddr, Word};
pub use constants::{FRAME_LEN, NOP, STATUS_SENTINEL};
pub use error::{BusError, ConfigError, ProgramParseError};
