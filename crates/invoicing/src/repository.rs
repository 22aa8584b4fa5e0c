use std::sync::Arc;

use async_trait::async_trait;

use invoiceflow_core::RepositoryResult;

use crate::{Invoice, InvoiceId, InvoiceNumber};

/// Storage contract for invoices.
///
/// `save` must reject an invoice whose number is already stored under a
/// different id with `RepositoryError::Conflict`, so uniqueness holds even when
/// two submissions race past [`InvoiceRepository::exists_by_number`].
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn save(&self, invoice: &Invoice) -> RepositoryResult<()>;

    async fn find_by_id(&self, id: &InvoiceId) -> RepositoryResult<Option<Invoice>>;

    async fn exists_by_number(&self, number: &InvoiceNumber) -> RepositoryResult<bool>;

    fn next_identity(&self) -> InvoiceId {
        InvoiceId::generate()
    }
}

#[async_trait]
impl<R> InvoiceRepository for Arc<R>
where
    R: InvoiceRepository + ?Sized,
{
    async fn save(&self, invoice: &Invoice) -> RepositoryResult<()> {
        (**self).save(invoice).await
    }

    async fn find_by_id(&self, id: &InvoiceId) -> RepositoryResult<Option<Invoice>> {
        (**self).find_by_id(id).await
    }

    async fn exists_by_number(&self, number: &InvoiceNumber) -> RepositoryResult<bool> {
        (**self).exists_by_number(number).await
    }

    fn next_identity(&self) -> InvoiceId {
        (**self).next_identity()
    }
}
