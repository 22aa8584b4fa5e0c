//! Event publication contract.
//!
//! Publication is synchronous and in-process: `publish` returns only after every
//! subscribed handler has finished. There is no queue, no retry and no
//! redelivery, so a handler failure surfaces to the publisher's caller.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Publication failed because a subscribed handler returned an error.
#[derive(Debug, Error)]
#[error("handler `{handler}` failed while handling `{event_type}`: {source}")]
pub struct PublishError {
    pub event_type: String,
    pub handler: &'static str,
    #[source]
    pub source: anyhow::Error,
}

/// Injectable event publisher.
///
/// Actions depend on this trait, never on a concrete bus, so tests and
/// alternative transports can be swapped in.
#[async_trait]
pub trait EventPublisher<M>: Send + Sync {
    async fn publish(&self, message: M) -> Result<(), PublishError>;
}

#[async_trait]
impl<M, P> EventPublisher<M> for Arc<P>
where
    M: Send + 'static,
    P: EventPublisher<M> + ?Sized,
{
    async fn publish(&self, message: M) -> Result<(), PublishError> {
        (**self).publish(message).await
    }
}
