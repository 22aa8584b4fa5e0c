use chrono::{DateTime, Utc};

use invoiceflow_approval::{Approval, ApprovalId, ApprovalStatus, ApproverId, InvoiceRef};
use invoiceflow_core::{AggregateRoot, RepositoryError, RepositoryResult};
use invoiceflow_invoicing::{
    Amount, Invoice, InvoiceId, InvoiceNumber, SubmitterId, SupervisorId,
};

/// Persisted shape of an invoice.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct InvoiceRow {
    pub id: String,
    pub invoice_number: String,
    pub amount: f64,
    pub submitter_id: String,
    pub supervisor_id: String,
    pub submitted_at: DateTime<Utc>,
}

impl From<&Invoice> for InvoiceRow {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id().to_string(),
            invoice_number: invoice.number().to_string(),
            amount: invoice.amount().value(),
            submitter_id: invoice.submitter_id().to_string(),
            supervisor_id: invoice.supervisor_id().to_string(),
            submitted_at: invoice.submitted_at(),
        }
    }
}

impl InvoiceRow {
    pub fn into_invoice(self) -> RepositoryResult<Invoice> {
        let corrupt = |e: invoiceflow_invoicing::InvalidInvoice| {
            RepositoryError::storage(format!("corrupt invoice row {}: {e}", self.id))
        };

        Ok(Invoice::reconstitute(
            InvoiceId::new(self.id.clone()).map_err(corrupt)?,
            InvoiceNumber::new(self.invoice_number.clone()).map_err(corrupt)?,
            Amount::new(self.amount).map_err(corrupt)?,
            SubmitterId::new(self.submitter_id.clone()).map_err(corrupt)?,
            SupervisorId::new(self.supervisor_id.clone()).map_err(corrupt)?,
            self.submitted_at,
        ))
    }
}

/// Persisted shape of an approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApprovalRow {
    pub id: String,
    pub invoice_id: String,
    pub approver_id: String,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&Approval> for ApprovalRow {
    fn from(approval: &Approval) -> Self {
        Self {
            id: approval.id().to_string(),
            invoice_id: approval.invoice_id().to_string(),
            approver_id: approval.approver_id().to_string(),
            status: approval.status().as_str().to_string(),
            rejection_reason: approval.rejection_reason().map(str::to_string),
            started_at: approval.started_at(),
            completed_at: approval.completed_at(),
        }
    }
}

impl ApprovalRow {
    pub fn is_pending(&self) -> bool {
        self.status == ApprovalStatus::Pending.as_str()
    }

    pub fn into_approval(self) -> RepositoryResult<Approval> {
        let corrupt = |reason: String| {
            RepositoryError::storage(format!("corrupt approval row {}: {reason}", self.id))
        };

        let status = self
            .status
            .parse::<ApprovalStatus>()
            .map_err(|e| corrupt(e.to_string()))?;

        Ok(Approval::reconstitute(
            ApprovalId::new(self.id.clone()).map_err(|e| corrupt(e.to_string()))?,
            InvoiceRef::new(self.invoice_id.clone()).map_err(|e| corrupt(e.to_string()))?,
            ApproverId::new(self.approver_id.clone()).map_err(|e| corrupt(e.to_string()))?,
            status,
            self.rejection_reason.clone(),
            self.started_at,
            self.completed_at,
        ))
    }
}
