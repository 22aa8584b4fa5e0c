//! Aggregate root trait and the buffer aggregates record their events into.

/// Aggregate root marker + minimal interface.
///
/// Aggregates are plain in-memory state machines: a mutating operation validates
/// its preconditions, changes state and records exactly the events describing
/// what happened. The caller persists the aggregate and then drains those events
/// with [`AggregateRoot::release_events`] to publish them.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Event type recorded by this aggregate.
    type Event: Clone + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Events recorded since the last release, oldest first.
    fn recorded_events(&self) -> &[Self::Event];

    /// Drain the recorded events.
    ///
    /// A second call returns an empty `Vec` until another mutating operation
    /// records more events.
    fn release_events(&mut self) -> Vec<Self::Event>;
}

/// Ordered, owned buffer of events recorded by an aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecorder<E> {
    pending: Vec<E>,
}

impl<E> EventRecorder<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: E) {
        self.pending.push(event);
    }

    pub fn pending(&self) -> &[E] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Take every pending event, leaving the buffer empty.
    pub fn release(&mut self) -> Vec<E> {
        std::mem::take(&mut self.pending)
    }
}

impl<E> Default for EventRecorder<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}
