use async_trait::async_trait;

use crate::{EventEnvelope, EventPublisher};

/// Handles published events of the types it was subscribed to.
///
/// The publisher that delivered the event is passed along so a handler can
/// trigger follow-up work (which may publish further events) without holding a
/// reference back to the bus.
#[async_trait]
pub trait EventHandler<M>: Send + Sync {
    /// Stable handler name used in logs and errors.
    fn name(&self) -> &'static str;

    async fn handle(
        &self,
        envelope: &EventEnvelope<M>,
        publisher: &dyn EventPublisher<M>,
    ) -> anyhow::Result<()>;
}
