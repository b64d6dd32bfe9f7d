//! SPI bus access.
//!
//! This module organizes the host side of the link to the peer core:
//! 1. **Traits:** The physical-layer and delay capabilities a host driver supplies.
//! 2. **Delays:** Sleeping and no-op delay providers.
//! 3. **Transport:** Timed frame writes and status reads over those capabilities.

/// Delay providers.
pub mod delay;

/// Capability traits for the physical link.
pub mod traits;

/// Timed frame transport.
pub mod transport;

pub use delay::{NoDelay, StdDelay};
pub use traits::{Delay, SpiBus};
pub use transport::{BusStats, Transport};
