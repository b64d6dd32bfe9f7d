use servdiag_core::bus::{NoDelay, Transport};
use servdiag_core::soc::SimulatedPeer;

use crate::common::mocks::bus::{RecordingBus, RecordingDelay, Timeline};

/// Transport over a recording bus and delay sharing one timeline.
pub struct TestContext {
    pub transport: Transport<RecordingBus, RecordingDelay>,
    pub timeline: Timeline,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_bus(|bus| bus)
    }

    /// Builds the context after letting `configure` adjust the recording bus.
    pub fn with_bus(configure: impl FnOnce(RecordingBus) -> RecordingBus) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("debug")
            .try_init();

        let timeline = Timeline::default();
        let bus = configure(RecordingBus::new(timeline.clone()));
        let delay = RecordingDelay::new(timeline.clone());
        Self {
            transport: Transport::new(bus, delay),
            timeline,
        }
    }
}

/// Transport over a simulated peer that never sleeps.
pub fn peer_transport(peer: SimulatedPeer) -> Transport<SimulatedPeer, NoDelay> {
    Transport::new(peer, NoDelay)
}
