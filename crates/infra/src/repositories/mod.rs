//! Repository adapters for the invoice and approval contracts.
//!
//! Both backends store the persisted row layout rather than the aggregates
//! themselves, so whatever is loaded back is rebuilt through `reconstitute`
//! and never carries unreleased events.

mod in_memory;
mod postgres;
mod rows;

pub use in_memory::{InMemoryApprovalRepository, InMemoryInvoiceRepository};
pub use postgres::{PostgresApprovalRepository, PostgresInvoiceRepository};
