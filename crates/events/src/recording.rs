use std::sync::Mutex;

use async_trait::async_trait;

use crate::{EventEnvelope, EventHandler, EventPublisher};

/// Handler that keeps every envelope it receives.
///
/// Subscribe it with `subscribe_all` to observe what a flow published.
#[derive(Debug)]
pub struct RecordingHandler<M> {
    received: Mutex<Vec<EventEnvelope<M>>>,
}

impl<M: Clone> RecordingHandler<M> {
    pub fn new() -> Self {
        Self {
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn envelopes(&self) -> Vec<EventEnvelope<M>> {
        match self.received.lock() {
            Ok(received) => received.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn payloads(&self) -> Vec<M> {
        self.envelopes()
            .into_iter()
            .map(EventEnvelope::into_payload)
            .collect()
    }

    pub fn event_types(&self) -> Vec<String> {
        self.envelopes()
            .iter()
            .map(|e| e.event_type().to_string())
            .collect()
    }
}

impl<M: Clone> Default for RecordingHandler<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<M> EventHandler<M> for RecordingHandler<M>
where
    M: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn handle(
        &self,
        envelope: &EventEnvelope<M>,
        _publisher: &dyn EventPublisher<M>,
    ) -> anyhow::Result<()> {
        self.received
            .lock()
            .map_err(|_| anyhow::anyhow!("recording handler lock poisoned"))?
            .push(envelope.clone());
        Ok(())
    }
}
