use std::sync::Arc;

use invoiceflow_core::{AggregateRoot, RepositoryError};
use invoiceflow_events::EventPublisher;
use invoiceflow_invoicing::{
    Amount, InvalidInvoice, Invoice, InvoiceNumber, InvoiceRepository, SubmitterId, SupervisorId,
};

use super::publish_all;
use crate::{ActionError, DomainEvent, SubmitInvoiceData};

/// Submit an invoice: the entry point of the workflow.
#[derive(Clone)]
pub struct SubmitInvoiceAction {
    invoices: Arc<dyn InvoiceRepository>,
}

impl SubmitInvoiceAction {
    pub fn new(invoices: Arc<dyn InvoiceRepository>) -> Self {
        Self { invoices }
    }

    pub async fn execute(
        &self,
        data: SubmitInvoiceData,
        publisher: &dyn EventPublisher<DomainEvent>,
    ) -> Result<Invoice, ActionError> {
        let number = InvoiceNumber::new(data.invoice_number)?;
        let amount = Amount::new(data.amount)?;
        let submitter_id = SubmitterId::new(data.submitter_id)?;
        let supervisor_id = SupervisorId::new(data.supervisor_id)?;

        if self.invoices.exists_by_number(&number).await? {
            return Err(InvalidInvoice::DuplicateInvoiceNumber(number.to_string()).into());
        }

        let mut invoice = Invoice::submit(
            self.invoices.next_identity(),
            number,
            amount,
            submitter_id,
            supervisor_id,
        );

        // A concurrent submission may have taken the number since the check.
        match self.invoices.save(&invoice).await {
            Ok(()) => {}
            Err(RepositoryError::Conflict(_)) => {
                return Err(
                    InvalidInvoice::DuplicateInvoiceNumber(invoice.number().to_string()).into(),
                );
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(
            invoice_id = %invoice.id(),
            invoice_number = %invoice.number(),
            amount = %invoice.amount(),
            "invoice submitted"
        );

        if let Err(err) = publish_all(publisher, invoice.release_events()).await {
            tracing::error!(
                invoice_id = %invoice.id(),
                invoice_number = %invoice.number(),
                error = %err,
                "invoice stored but follow-up handling failed; no approval process was started"
            );
            return Err(err.into());
        }

        Ok(invoice)
    }
}
