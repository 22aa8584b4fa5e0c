use thiserror::Error;

/// Business-rule violations of the approval context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidApproval {
    #[error("Cannot modify an already approved invoice.")]
    AlreadyApproved,

    #[error("Cannot modify an already rejected invoice.")]
    AlreadyRejected,

    #[error("Approver ID cannot be empty.")]
    EmptyApproverId,

    #[error("Invoice ID cannot be empty.")]
    EmptyInvoiceId,

    #[error("Approval ID cannot be empty.")]
    EmptyApprovalId,

    #[error("Approval with ID {0} not found.")]
    NotFound(String),
}
