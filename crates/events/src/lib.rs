//! Domain event mechanics: the `Event` contract, envelopes, and the in-process
//! publisher that delivers events synchronously to registered handlers.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod handler;
pub mod in_process_bus;
pub mod recording;

pub use bus::{EventPublisher, PublishError};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use handler::EventHandler;
pub use in_process_bus::{InProcessEventBus, InProcessEventBusBuilder};
pub use recording::RecordingHandler;
