//! Approval context.
//!
//! Owns the pending/approved/rejected decision over a submitted invoice. The
//! invoice is referenced by id only; this crate does not depend on the
//! invoice reception context.

pub mod approval;
pub mod error;
pub mod repository;
pub mod status;
pub mod value_objects;

pub use approval::{
    APPROVAL_PROCESS_STARTED, Approval, ApprovalEvent, ApprovalProcessStarted, INVOICE_APPROVED,
    INVOICE_REJECTED, InvoiceApproved, InvoiceRejected,
};
pub use error::InvalidApproval;
pub use repository::ApprovalRepository;
pub use status::{ApprovalStatus, UnknownStatus};
pub use value_objects::{ApprovalId, ApproverId, InvoiceRef};
