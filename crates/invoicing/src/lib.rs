//! Invoice reception context.
//!
//! Business rules for submitted invoices, implemented as deterministic domain
//! logic (no IO, no HTTP, no storage). Storage is reached only through the
//! [`InvoiceRepository`] contract.

pub mod error;
pub mod invoice;
pub mod repository;
pub mod value_objects;

pub use error::InvalidInvoice;
pub use invoice::{INVOICE_SUBMITTED, Invoice, InvoiceEvent, InvoiceSubmitted};
pub use repository::InvoiceRepository;
pub use value_objects::{Amount, InvoiceId, InvoiceNumber, SubmitterId, SupervisorId};
