use std::sync::Arc;

use invoiceflow_approval::{Approval, ApprovalRepository};
use invoiceflow_core::AggregateRoot;
use invoiceflow_events::EventPublisher;

use super::{load_approval, publish_all, save_decision};
use crate::{ActionError, DomainEvent};

/// Approve the invoice behind a pending approval.
#[derive(Clone)]
pub struct ApproveInvoiceAction {
    approvals: Arc<dyn ApprovalRepository>,
}

impl ApproveInvoiceAction {
    pub fn new(approvals: Arc<dyn ApprovalRepository>) -> Self {
        Self { approvals }
    }

    pub async fn execute(
        &self,
        approval_id: &str,
        publisher: &dyn EventPublisher<DomainEvent>,
    ) -> Result<Approval, ActionError> {
        let mut approval = load_approval(self.approvals.as_ref(), approval_id).await?;

        approval.approve()?;
        save_decision(self.approvals.as_ref(), &approval).await?;

        tracing::info!(
            approval_id = %approval.id(),
            invoice_id = %approval.invoice_id(),
            "invoice approved"
        );

        publish_all(publisher, approval.release_events()).await?;
        Ok(approval)
    }
}
