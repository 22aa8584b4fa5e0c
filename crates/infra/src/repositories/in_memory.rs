use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use invoiceflow_approval::{Approval, ApprovalId, ApprovalRepository, InvoiceRef};
use invoiceflow_core::{RepositoryError, RepositoryResult};
use invoiceflow_invoicing::{Invoice, InvoiceId, InvoiceNumber, InvoiceRepository};

use super::rows::{ApprovalRow, InvoiceRow};

fn poisoned<T>(_: PoisonError<T>) -> RepositoryError {
    RepositoryError::storage("in-memory store lock poisoned")
}

/// In-memory invoice store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceRepository {
    rows: RwLock<HashMap<String, InvoiceRow>>,
}

impl InMemoryInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored invoice, oldest first.
    pub fn all(&self) -> Vec<Invoice> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        let mut rows: Vec<InvoiceRow> = rows.values().cloned().collect();
        rows.sort_by_key(|r| (r.submitted_at, r.id.clone()));
        rows.into_iter()
            .filter_map(|r| r.into_invoice().ok())
            .collect()
    }

    pub fn clear(&self) {
        self.rows
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn save(&self, invoice: &Invoice) -> RepositoryResult<()> {
        let row = InvoiceRow::from(invoice);
        let mut rows = self.rows.write().map_err(poisoned)?;

        let taken = rows
            .values()
            .any(|r| r.invoice_number == row.invoice_number && r.id != row.id);
        if taken {
            return Err(RepositoryError::conflict(format!(
                "invoice number {} already stored",
                row.invoice_number
            )));
        }

        rows.insert(row.id.clone(), row);
        Ok(())
    }

    async fn find_by_id(&self, id: &InvoiceId) -> RepositoryResult<Option<Invoice>> {
        let row = self.rows.read().map_err(poisoned)?.get(id.as_str()).cloned();
        row.map(InvoiceRow::into_invoice).transpose()
    }

    async fn exists_by_number(&self, number: &InvoiceNumber) -> RepositoryResult<bool> {
        let rows = self.rows.read().map_err(poisoned)?;
        Ok(rows.values().any(|r| r.invoice_number == number.as_str()))
    }
}

/// In-memory approval store for tests/dev.
///
/// Applies the same conditional-update rule as the Postgres store: an existing
/// approval is only overwritten while its stored status is still pending.
#[derive(Debug, Default)]
pub struct InMemoryApprovalRepository {
    rows: RwLock<HashMap<String, ApprovalRow>>,
}

impl InMemoryApprovalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored approval, oldest first.
    pub fn all(&self) -> Vec<Approval> {
        let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
        let mut rows: Vec<ApprovalRow> = rows.values().cloned().collect();
        rows.sort_by_key(|r| (r.started_at, r.id.clone()));
        rows.into_iter()
            .filter_map(|r| r.into_approval().ok())
            .collect()
    }

    pub fn clear(&self) {
        self.rows
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[async_trait]
impl ApprovalRepository for InMemoryApprovalRepository {
    async fn save(&self, approval: &Approval) -> RepositoryResult<()> {
        let row = ApprovalRow::from(approval);
        let mut rows = self.rows.write().map_err(poisoned)?;

        if let Some(stored) = rows.get(&row.id) {
            if !stored.is_pending() {
                return Err(RepositoryError::conflict(format!(
                    "approval {} is already {}",
                    row.id, stored.status
                )));
            }
        }

        rows.insert(row.id.clone(), row);
        Ok(())
    }

    async fn find_by_id(&self, id: &ApprovalId) -> RepositoryResult<Option<Approval>> {
        let row = self.rows.read().map_err(poisoned)?.get(id.as_str()).cloned();
        row.map(ApprovalRow::into_approval).transpose()
    }

    async fn find_by_invoice_id(
        &self,
        invoice_id: &InvoiceRef,
    ) -> RepositoryResult<Option<Approval>> {
        let row = self
            .rows
            .read()
            .map_err(poisoned)?
            .values()
            .filter(|r| r.invoice_id == invoice_id.as_str())
            .min_by_key(|r| r.started_at)
            .cloned();
        row.map(ApprovalRow::into_approval).transpose()
    }
}
