//! In-process, synchronous event bus.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{Event, EventEnvelope, EventHandler, EventPublisher, PublishError};

enum Subscription {
    /// Only events whose `event_type()` equals this name.
    Type(&'static str),
    /// Every event.
    All,
}

struct Registration<M> {
    subscription: Subscription,
    handler: Arc<dyn EventHandler<M>>,
}

impl Subscription {
    fn matches(&self, event_type: &str) -> bool {
        match self {
            Subscription::Type(t) => *t == event_type,
            Subscription::All => true,
        }
    }
}

/// Collects handler registrations at startup.
pub struct InProcessEventBusBuilder<M> {
    registrations: Vec<Registration<M>>,
}

impl<M> InProcessEventBusBuilder<M> {
    /// Register `handler` for events of type `event_type`.
    pub fn subscribe(
        mut self,
        event_type: &'static str,
        handler: Arc<dyn EventHandler<M>>,
    ) -> Self {
        self.registrations.push(Registration {
            subscription: Subscription::Type(event_type),
            handler,
        });
        self
    }

    /// Register `handler` for every event type.
    pub fn subscribe_all(mut self, handler: Arc<dyn EventHandler<M>>) -> Self {
        self.registrations.push(Registration {
            subscription: Subscription::All,
            handler,
        });
        self
    }

    pub fn build(self) -> InProcessEventBus<M> {
        InProcessEventBus {
            registrations: self.registrations,
        }
    }
}

/// Synchronous in-process pub/sub.
///
/// - Handlers are fixed once the bus is built (no runtime subscription).
/// - Delivery follows registration order, one handler at a time.
/// - The first failing handler aborts delivery and its error is returned.
pub struct InProcessEventBus<M> {
    registrations: Vec<Registration<M>>,
}

impl<M> InProcessEventBus<M> {
    pub fn builder() -> InProcessEventBusBuilder<M> {
        InProcessEventBusBuilder {
            registrations: Vec::new(),
        }
    }

    pub fn handler_count(&self) -> usize {
        self.registrations.len()
    }
}

impl<M> core::fmt::Debug for InProcessEventBus<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let names: Vec<&str> = self.registrations.iter().map(|r| r.handler.name()).collect();
        f.debug_struct("InProcessEventBus")
            .field("handlers", &names)
            .finish()
    }
}

#[async_trait]
impl<M> EventPublisher<M> for InProcessEventBus<M>
where
    M: Event,
{
    async fn publish(&self, message: M) -> Result<(), PublishError> {
        let envelope = EventEnvelope::wrap(message);

        tracing::debug!(
            event_id = %envelope.event_id(),
            event_type = envelope.event_type(),
            aggregate_id = envelope.aggregate_id(),
            "publishing event"
        );

        for registration in &self.registrations {
            if !registration.subscription.matches(envelope.event_type()) {
                continue;
            }

            let handler = &registration.handler;
            if let Err(source) = handler.handle(&envelope, self).await {
                tracing::error!(
                    event_id = %envelope.event_id(),
                    event_type = envelope.event_type(),
                    handler = handler.name(),
                    error = %source,
                    "event handler failed"
                );
                return Err(PublishError {
                    event_type: envelope.event_type().to_string(),
                    handler: handler.name(),
                    source,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{DateTime, Utc};

    use super::*;
    use crate::RecordingHandler;

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Ping(String),
        Pong(String),
    }

    impl Event for TestEvent {
        fn event_type(&self) -> &'static str {
            match self {
                TestEvent::Ping(_) => "test.ping",
                TestEvent::Pong(_) => "test.pong",
            }
        }

        fn version(&self) -> u32 {
            1
        }

        fn aggregate_id(&self) -> &str {
            match self {
                TestEvent::Ping(id) | TestEvent::Pong(id) => id,
            }
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            DateTime::<Utc>::UNIX_EPOCH
        }
    }

    /// Answers every ping with a pong published through the delivering bus.
    struct Responder {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EventHandler<TestEvent> for Responder {
        fn name(&self) -> &'static str {
            "responder"
        }

        async fn handle(
            &self,
            envelope: &EventEnvelope<TestEvent>,
            publisher: &dyn EventPublisher<TestEvent>,
        ) -> anyhow::Result<()> {
            self.seen.lock().unwrap().push(envelope.aggregate_id().to_string());
            if let TestEvent::Ping(id) = envelope.payload() {
                publisher.publish(TestEvent::Pong(id.clone())).await?;
            }
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl EventHandler<TestEvent> for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn handle(
            &self,
            _envelope: &EventEnvelope<TestEvent>,
            _publisher: &dyn EventPublisher<TestEvent>,
        ) -> anyhow::Result<()> {
            anyhow::bail!("boom")
        }
    }

    #[tokio::test]
    async fn delivers_only_to_matching_subscriptions() {
        let responder = Arc::new(Responder {
            seen: Mutex::new(Vec::new()),
        });
        let recorder: Arc<RecordingHandler<TestEvent>> = Arc::new(RecordingHandler::new());
        let bus = InProcessEventBus::<TestEvent>::builder()
            .subscribe("test.ping", responder.clone())
            .subscribe_all(recorder.clone())
            .build();

        bus.publish(TestEvent::Ping("a".into())).await.unwrap();

        assert_eq!(*responder.seen.lock().unwrap(), vec!["a".to_string()]);
        // The pong is delivered (to the recorder) before the ping's delivery finishes.
        assert_eq!(
            recorder.payloads(),
            vec![TestEvent::Pong("a".into()), TestEvent::Ping("a".into())]
        );
    }

    #[tokio::test]
    async fn handler_failure_is_returned_to_publisher() {
        let recorder: Arc<RecordingHandler<TestEvent>> = Arc::new(RecordingHandler::new());
        let bus = InProcessEventBus::<TestEvent>::builder()
            .subscribe("test.ping", Arc::new(Failing))
            .subscribe_all(recorder.clone())
            .build();

        let err = bus.publish(TestEvent::Ping("a".into())).await.unwrap_err();

        assert_eq!(err.handler, "failing");
        assert_eq!(err.event_type, "test.ping");
        assert!(recorder.payloads().is_empty());
        assert_eq!(bus.handler_count(), 2);
    }

    #[tokio::test]
    async fn publishing_without_handlers_succeeds() {
        let bus: InProcessEventBus<TestEvent> = InProcessEventBus::builder().build();
        bus.publish(TestEvent::Pong("x".into())).await.unwrap();
    }
}
