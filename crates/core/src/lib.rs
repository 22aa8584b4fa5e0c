//! `invoiceflow-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns)
//! shared by the invoice-reception and approval contexts.

pub mod aggregate;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{AggregateRoot, EventRecorder};
pub use error::{RepositoryError, RepositoryResult};
pub use value_object::ValueObject;

#[doc(hidden)]
pub mod __private {
    pub use uuid::Uuid;
}
