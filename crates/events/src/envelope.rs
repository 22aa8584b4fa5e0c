use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Event;

/// Envelope for a published event.
///
/// The bus wraps every published event so handlers (and logs) can correlate a
/// delivery by `event_id` without the domain event carrying transport metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,
    event_type: String,
    event_version: u32,
    aggregate_id: String,
    occurred_at: DateTime<Utc>,
    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        event_id: Uuid,
        event_type: impl Into<String>,
        event_version: u32,
        aggregate_id: impl Into<String>,
        occurred_at: DateTime<Utc>,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            event_type: event_type.into(),
            event_version,
            aggregate_id: aggregate_id.into(),
            occurred_at,
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn event_version(&self) -> u32 {
        self.event_version
    }

    pub fn aggregate_id(&self) -> &str {
        &self.aggregate_id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

impl<E: Event> EventEnvelope<E> {
    /// Wrap a domain event, assigning a fresh UUIDv7 event id.
    pub fn wrap(event: E) -> Self {
        let event_type = event.event_type();
        let event_version = event.version();
        let aggregate_id = event.aggregate_id().to_string();
        let occurred_at = event.occurred_at();
        Self::new(
            Uuid::now_v7(),
            event_type,
            event_version,
            aggregate_id,
            occurred_at,
            event,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Noted {
        id: String,
        at: DateTime<Utc>,
    }

    impl Event for Noted {
        fn event_type(&self) -> &'static str {
            "test.noted"
        }

        fn version(&self) -> u32 {
            2
        }

        fn aggregate_id(&self) -> &str {
            &self.id
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.at
        }
    }

    #[test]
    fn wrap_copies_metadata_from_the_event() {
        let event = Noted {
            id: "agg-7".to_string(),
            at: Utc::now(),
        };
        let envelope = EventEnvelope::wrap(event.clone());

        assert_eq!(envelope.event_type(), "test.noted");
        assert_eq!(envelope.event_version(), 2);
        assert_eq!(envelope.aggregate_id(), "agg-7");
        assert_eq!(envelope.occurred_at(), event.at);
        assert_eq!(envelope.event_id().get_version_num(), 7);
        assert_eq!(envelope.into_payload(), event);
    }

    #[test]
    fn each_wrap_gets_a_new_event_id() {
        let event = Noted {
            id: "agg-7".to_string(),
            at: Utc::now(),
        };
        let a = EventEnvelope::wrap(event.clone());
        let b = EventEnvelope::wrap(event);
        assert_ne!(a.event_id(), b.event_id());
    }
}
