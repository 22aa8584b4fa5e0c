use thiserror::Error;

use invoiceflow_approval::InvalidApproval;
use invoiceflow_core::RepositoryError;
use invoiceflow_events::PublishError;
use invoiceflow_invoicing::InvalidInvoice;

/// Error returned by every application action.
///
/// Domain errors pass through unmodified so callers can report their message.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    InvalidInvoice(#[from] InvalidInvoice),

    #[error(transparent)]
    InvalidApproval(#[from] InvalidApproval),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl ActionError {
    /// `true` when the caller sent a request the business rules refuse.
    pub fn is_business_rule_violation(&self) -> bool {
        matches!(
            self,
            ActionError::InvalidInvoice(_) | ActionError::InvalidApproval(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_business_rule_violations() {
        assert!(ActionError::from(InvalidInvoice::EmptySubmitterId).is_business_rule_violation());
        assert!(ActionError::from(InvalidApproval::AlreadyRejected).is_business_rule_violation());
        assert!(!ActionError::from(RepositoryError::storage("down")).is_business_rule_violation());
    }

    #[test]
    fn domain_messages_pass_through() {
        let err = ActionError::from(InvalidApproval::NotFound("ap-1".into()));
        assert_eq!(err.to_string(), "Approval with ID ap-1 not found.");
    }
}
