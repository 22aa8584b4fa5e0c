use std::sync::Arc;

use invoiceflow_approval::{Approval, ApprovalRepository, ApproverId, InvoiceRef};
use invoiceflow_core::AggregateRoot;
use invoiceflow_events::EventPublisher;

use super::publish_all;
use crate::{ActionError, DomainEvent, StartApprovalData};

/// Open a pending approval for an invoice. Triggered by the policy.
#[derive(Clone)]
pub struct StartApprovalProcessAction {
    approvals: Arc<dyn ApprovalRepository>,
}

impl StartApprovalProcessAction {
    pub fn new(approvals: Arc<dyn ApprovalRepository>) -> Self {
        Self { approvals }
    }

    pub async fn execute(
        &self,
        data: StartApprovalData,
        publisher: &dyn EventPublisher<DomainEvent>,
    ) -> Result<Approval, ActionError> {
        let invoice_id = InvoiceRef::new(data.invoice_id)?;
        let approver_id = ApproverId::new(data.approver_id)?;

        let mut approval = Approval::start(self.approvals.next_identity(), invoice_id, approver_id);

        self.approvals.save(&approval).await?;

        tracing::info!(
            approval_id = %approval.id(),
            invoice_id = %approval.invoice_id(),
            approver_id = %approval.approver_id(),
            "approval process started"
        );

        publish_all(publisher, approval.release_events()).await?;
        Ok(approval)
    }
}
