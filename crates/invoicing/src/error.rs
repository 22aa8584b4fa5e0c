use thiserror::Error;

/// Business-rule violations of the invoice reception context.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInvoice {
    #[error("Invoice amount must be greater than zero. Given: {0}")]
    InvalidAmount(f64),

    #[error("Invoice number must be in format INV-YYYY-XXXX. Given: {0}")]
    InvalidInvoiceNumber(String),

    #[error("Submitter ID cannot be empty.")]
    EmptySubmitterId,

    #[error("Supervisor ID cannot be empty.")]
    EmptySupervisorId,

    #[error("Invoice ID cannot be empty.")]
    EmptyInvoiceId,

    #[error("An invoice with number {0} already exists.")]
    DuplicateInvoiceNumber(String),
}
