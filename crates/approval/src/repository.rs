use std::sync::Arc;

use async_trait::async_trait;

use invoiceflow_core::RepositoryResult;

use crate::{Approval, ApprovalId, InvoiceRef};

/// Storage contract for approvals.
///
/// Saving an approval that already exists must only succeed while the stored
/// status is still pending; otherwise `RepositoryError::Conflict` is returned.
/// This is what keeps two concurrent decisions from both succeeding.
#[async_trait]
pub trait ApprovalRepository: Send + Sync {
    async fn save(&self, approval: &Approval) -> RepositoryResult<()>;

    async fn find_by_id(&self, id: &ApprovalId) -> RepositoryResult<Option<Approval>>;

    async fn find_by_invoice_id(&self, invoice_id: &InvoiceRef)
    -> RepositoryResult<Option<Approval>>;

    fn next_identity(&self) -> ApprovalId {
        ApprovalId::generate()
    }
}

#[async_trait]
impl<R> ApprovalRepository for Arc<R>
where
    R: ApprovalRepository + ?Sized,
{
    async fn save(&self, approval: &Approval) -> RepositoryResult<()> {
        (**self).save(approval).await
    }

    async fn find_by_id(&self, id: &ApprovalId) -> RepositoryResult<Option<Approval>> {
        (**self).find_by_id(id).await
    }

    async fn find_by_invoice_id(
        &self,
        invoice_id: &InvoiceRef,
    ) -> RepositoryResult<Option<Approval>> {
        (**self).find_by_invoice_id(invoice_id).await
    }

    fn next_identity(&self) -> ApprovalId {
        (**self).next_identity()
    }
}
