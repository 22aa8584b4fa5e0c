//! Inbound use-case surface.
//!
//! `InvoiceApprovalService` wires the repositories, the actions, the policy and
//! the in-process bus together once at startup. Callers only see the three
//! commands and a few lookups.

use std::sync::Arc;

use invoiceflow_approval::{Approval, ApprovalId, ApprovalRepository, InvoiceRef};
use invoiceflow_events::{EventHandler, InProcessEventBus};
use invoiceflow_invoicing::{INVOICE_SUBMITTED, Invoice, InvoiceId, InvoiceRepository};

use crate::{
    ActionError, ApproveInvoiceAction, DomainEvent, RejectInvoiceAction,
    StartApprovalOnInvoiceSubmitted, StartApprovalProcessAction, SubmitInvoiceAction,
    SubmitInvoiceData,
};

pub struct InvoiceApprovalServiceBuilder {
    invoices: Arc<dyn InvoiceRepository>,
    approvals: Arc<dyn ApprovalRepository>,
    observers: Vec<Arc<dyn EventHandler<DomainEvent>>>,
}

impl InvoiceApprovalServiceBuilder {
    /// Additionally deliver every published event to `handler`.
    ///
    /// Observers run before the policy, so they see events in causal order.
    pub fn observe(mut self, handler: Arc<dyn EventHandler<DomainEvent>>) -> Self {
        self.observers.push(handler);
        self
    }

    pub fn build(self) -> InvoiceApprovalService {
        let policy = StartApprovalOnInvoiceSubmitted::new(StartApprovalProcessAction::new(
            self.approvals.clone(),
        ));

        let mut bus = InProcessEventBus::builder();
        for observer in self.observers {
            bus = bus.subscribe_all(observer);
        }
        let bus = bus.subscribe(INVOICE_SUBMITTED, Arc::new(policy)).build();

        tracing::debug!(?bus, "event bus configured");

        InvoiceApprovalService {
            submit: SubmitInvoiceAction::new(self.invoices.clone()),
            approve: ApproveInvoiceAction::new(self.approvals.clone()),
            reject: RejectInvoiceAction::new(self.approvals.clone()),
            invoices: self.invoices,
            approvals: self.approvals,
            bus,
        }
    }
}

pub struct InvoiceApprovalService {
    invoices: Arc<dyn InvoiceRepository>,
    approvals: Arc<dyn ApprovalRepository>,
    bus: InProcessEventBus<DomainEvent>,
    submit: SubmitInvoiceAction,
    approve: ApproveInvoiceAction,
    reject: RejectInvoiceAction,
}

impl InvoiceApprovalService {
    pub fn builder(
        invoices: Arc<dyn InvoiceRepository>,
        approvals: Arc<dyn ApprovalRepository>,
    ) -> InvoiceApprovalServiceBuilder {
        InvoiceApprovalServiceBuilder {
            invoices,
            approvals,
            observers: Vec::new(),
        }
    }

    pub fn new(
        invoices: Arc<dyn InvoiceRepository>,
        approvals: Arc<dyn ApprovalRepository>,
    ) -> Self {
        Self::builder(invoices, approvals).build()
    }

    /// Submit an invoice; the policy starts its approval before this returns.
    pub async fn submit_invoice(&self, data: SubmitInvoiceData) -> Result<Invoice, ActionError> {
        self.submit.execute(data, &self.bus).await
    }

    pub async fn approve_invoice(&self, approval_id: &str) -> Result<Approval, ActionError> {
        self.approve.execute(approval_id, &self.bus).await
    }

    pub async fn reject_invoice(
        &self,
        approval_id: &str,
        reason: &str,
    ) -> Result<Approval, ActionError> {
        self.reject.execute(approval_id, reason, &self.bus).await
    }

    pub async fn find_invoice(&self, invoice_id: &str) -> Result<Option<Invoice>, ActionError> {
        let Ok(id) = InvoiceId::new(invoice_id) else {
            return Ok(None);
        };
        Ok(self.invoices.find_by_id(&id).await?)
    }

    pub async fn find_approval(&self, approval_id: &str) -> Result<Option<Approval>, ActionError> {
        let Ok(id) = ApprovalId::new(approval_id) else {
            return Ok(None);
        };
        Ok(self.approvals.find_by_id(&id).await?)
    }

    /// The approval attached to an invoice, if one was started.
    ///
    /// A stored invoice without an approval means the policy failed for it.
    pub async fn find_approval_by_invoice(
        &self,
        invoice_id: &str,
    ) -> Result<Option<Approval>, ActionError> {
        let Ok(id) = InvoiceRef::new(invoice_id) else {
            return Ok(None);
        };
        Ok(self.approvals.find_by_invoice_id(&id).await?)
    }
}
