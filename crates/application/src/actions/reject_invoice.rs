use std::sync::Arc;

use invoiceflow_approval::{Approval, ApprovalRepository};
use invoiceflow_core::AggregateRoot;
use invoiceflow_events::EventPublisher;

use super::{load_approval, publish_all, save_decision};
use crate::{ActionError, DomainEvent};

/// Reject the invoice behind a pending approval.
///
/// The reason is stored as given; its length is checked at the HTTP boundary.
#[derive(Clone)]
pub struct RejectInvoiceAction {
    approvals: Arc<dyn ApprovalRepository>,
}

impl RejectInvoiceAction {
    pub fn new(approvals: Arc<dyn ApprovalRepository>) -> Self {
        Self { approvals }
    }

    pub async fn execute(
        &self,
        approval_id: &str,
        reason: &str,
        publisher: &dyn EventPublisher<DomainEvent>,
    ) -> Result<Approval, ActionError> {
        let mut approval = load_approval(self.approvals.as_ref(), approval_id).await?;

        approval.reject(reason)?;
        save_decision(self.approvals.as_ref(), &approval).await?;

        tracing::info!(
            approval_id = %approval.id(),
            invoice_id = %approval.invoice_id(),
            "invoice rejected"
        );

        publish_all(publisher, approval.release_events()).await?;
        Ok(approval)
    }
}
