//! Application layer: use-case actions, the policy coupling the invoice
//! reception and approval contexts, and the service facade the HTTP surface
//! calls into.

pub mod actions;
pub mod dto;
pub mod error;
pub mod event;
pub mod policy;
pub mod service;

pub use actions::{
    ApproveInvoiceAction, RejectInvoiceAction, StartApprovalProcessAction, SubmitInvoiceAction,
};
pub use dto::{StartApprovalData, SubmitInvoiceData};
pub use error::ActionError;
pub use event::DomainEvent;
pub use policy::StartApprovalOnInvoiceSubmitted;
pub use service::{InvoiceApprovalService, InvoiceApprovalServiceBuilder};
